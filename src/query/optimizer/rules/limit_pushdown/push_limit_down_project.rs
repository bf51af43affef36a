//! 将LIMIT下推到投影之下的规则

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::define_opt_rule;
use crate::query::optimizer::plan::{MatchedResult, OptContext, Pattern, TransformResult};
use crate::query::optimizer::rule_traits::OptRule;
use crate::query::optimizer::rules::detached;
use crate::query::planner::plan::core::nodes::{LimitNode, PlanNode, SingleInputNode};
use crate::query::planner::plan::core::PlanNodeKind;

define_opt_rule! {
    /// 将LIMIT下推到投影之下的规则
    ///
    /// 投影不改变行数，先截断再投影可以少计算被丢弃的行。
    ///
    /// # 转换示例
    ///
    /// Before:
    /// ```text
    ///   Limit(1)
    ///       |
    ///   Project
    ///       |
    ///   Traverse
    /// ```
    ///
    /// After:
    /// ```text
    ///   Project
    ///       |
    ///   Limit(1)
    ///       |
    ///   Traverse
    /// ```
    pub struct PushLimitDownProjectRule;
    pattern: Pattern::create(PlanNodeKind::Limit)
        .with_dependency(Pattern::create(PlanNodeKind::Project))
}

impl OptRule for PushLimitDownProjectRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn transform(
        &self,
        ctx: &mut OptContext<'_>,
        matched: &MatchedResult,
    ) -> OptimizeResult<TransformResult> {
        let limit = ctx
            .plan_node(matched.node)?
            .as_limit()
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("匹配的根节点不是 Limit"))?;
        let project_match = matched
            .result(&[0])
            .ok_or_else(|| OptimizeError::precondition("Limit 缺少输入"))?;
        let project = ctx
            .plan_node(project_match.node)?
            .as_project()
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("Limit 的输入不是 Project"))?;
        let project_input = project
            .input()
            .ok_or_else(|| OptimizeError::precondition("Project 缺少输入"))?;
        let project_deps = ctx.group_node(project_match.node)?.dependencies().to_vec();

        let new_limit = LimitNode::new(project_input, limit.offset(), limit.count());
        let new_limit = ctx.add_plan_node(new_limit.into_enum())?;
        let limit_group = ctx.new_group_with(new_limit, project_deps)?;

        let mut new_project = detached(&project);
        new_project.set_input(new_limit);
        new_project.set_output_var(limit.output_var().to_string());
        let new_project = ctx.add_plan_node(new_project.into_enum())?;

        let group = ctx.group_node(matched.node)?.group();
        let node = ctx.create_group_node(group, new_project, vec![limit_group])?;
        Ok(TransformResult::replace(node))
    }
}
