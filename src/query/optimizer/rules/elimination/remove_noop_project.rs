//! 移除无操作投影的规则

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::core::{Expression, YieldColumn};
use crate::define_opt_rule;
use crate::query::optimizer::plan::{MatchedResult, OptContext, Pattern, TransformResult};
use crate::query::optimizer::rule_traits::{check_dataflow, OptRule};
use crate::query::planner::plan::core::{PlanNodeId, PlanNodeKind};

define_opt_rule! {
    /// 移除无操作投影的规则
    ///
    /// # 转换示例
    ///
    /// Before:
    /// ```text
    ///   Project($-.v1 AS v1, $-.v2 AS v2)
    ///       |
    ///   ScanVertices (输出 v1, v2)
    /// ```
    ///
    /// After:
    /// ```text
    ///   ScanVertices (输出变量沿用 Project 的)
    /// ```
    ///
    /// # 适用条件
    ///
    /// - 每一列都是对同名输入列的直接引用
    /// - 输出列与子节点的输出列完全相同，顺序一致
    pub struct RemoveNoopProjectRule;
    pattern: Pattern::create(PlanNodeKind::Project).with_dependency(Pattern::any())
}

fn is_noop_projection(columns: &[YieldColumn], child_col_names: &[String]) -> bool {
    if columns.is_empty() || columns.len() != child_col_names.len() {
        return false;
    }
    columns.iter().zip(child_col_names).all(|(column, child_col)| {
        matches!(&column.expr, Expression::InputProperty(col) if col == child_col)
            && column.name() == *child_col
    })
}

impl OptRule for RemoveNoopProjectRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn matches(&self, ctx: &OptContext<'_>, matched: &MatchedResult) -> bool {
        if !check_dataflow(ctx, matched) {
            return false;
        }
        let Ok(project) = ctx.plan_node(matched.node) else {
            return false;
        };
        let Some(child) = matched.result(&[0]) else {
            return false;
        };
        let Ok(child) = ctx.plan_node(child.node) else {
            return false;
        };
        project
            .as_project()
            .map(|p| is_noop_projection(p.columns(), child.col_names()))
            .unwrap_or(false)
    }

    fn transform(
        &self,
        ctx: &mut OptContext<'_>,
        matched: &MatchedResult,
    ) -> OptimizeResult<TransformResult> {
        let project_var = ctx.plan_node(matched.node)?.output_var().to_string();
        let child = matched
            .result(&[0])
            .ok_or_else(|| OptimizeError::precondition("Project 缺少输入"))?;
        let child_deps = ctx.group_node(child.node)?.dependencies().to_vec();

        let mut replacement = ctx.plan_node(child.node)?.clone();
        replacement.set_id(PlanNodeId::UNASSIGNED);
        replacement.set_output_var(project_var);
        let replacement = ctx.add_plan_node(replacement)?;

        let group = ctx.group_node(matched.node)?.group();
        let node = ctx.create_group_node(group, replacement, child_deps)?;
        Ok(TransformResult::replace(node))
    }
}
