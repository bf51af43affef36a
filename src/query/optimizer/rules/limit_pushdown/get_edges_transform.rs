//! LIMIT 位于投影之上时的边扫描改写规则

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::define_opt_rule;
use crate::query::optimizer::plan::{MatchedResult, OptContext, Pattern, TransformResult};
use crate::query::optimizer::rule_traits::{check_dataflow, OptRule};
use crate::query::optimizer::rules::detached;
use crate::query::planner::plan::core::nodes::{PlanNode, SingleInputNode};
use crate::query::planner::plan::core::PlanNodeKind;

use super::get_edges_transform_limit::{edge_only_projection, EdgeScanSource};

define_opt_rule! {
    /// 单步遍历只取边、LIMIT 在投影之上时改写为边扫描
    ///
    /// Before:
    /// ```text
    ///   Limit(offset, count)
    ///       |
    ///   Project($-.e AS e)
    ///       |
    ///   Traverse(1 步)
    ///       |
    ///   ScanVertices
    /// ```
    ///
    /// After:
    /// ```text
    ///   Limit(offset, count)
    ///       |
    ///   Project([EDGE] AS e)
    ///       |
    ///   ScanEdges(limit=offset+count)
    /// ```
    ///
    /// 适用条件与 [`GetEdgesTransformLimitRule`](super::GetEdgesTransformLimitRule) 相同。
    pub struct GetEdgesTransformRule;
    pattern: Pattern::create(PlanNodeKind::Limit).with_dependency(
        Pattern::create(PlanNodeKind::Project).with_dependency(
            Pattern::create(PlanNodeKind::Traverse)
                .with_dependency(Pattern::create(PlanNodeKind::ScanVertices)),
        ),
    )
}

impl OptRule for GetEdgesTransformRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn matches(&self, ctx: &OptContext<'_>, matched: &MatchedResult) -> bool {
        check_dataflow(ctx, matched)
            && matched
                .result(&[0])
                .map(|project| edge_only_projection(ctx, project.node, matched.result(&[0, 0])))
                .unwrap_or(false)
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
        let alias = matched
            .plan_node_at(&[0])
            .and_then(|id| ctx.qctx().node(id))
            .and_then(|n| n.as_project())
            .and_then(|p| p.columns().first())
            .map(|c| c.name().to_string())
            .ok_or_else(|| OptimizeError::precondition("Limit 的输入不是单列 Project"))?;
        let source = EdgeScanSource::from_match(ctx, matched, &[0, 0])?;

        if source.is_bidirectional() {
            log::trace!("{}: 边类型同时包含正反方向，跳过改写", Self::NAME);
            return Ok(TransformResult::no_transform());
        }
        let (edges_project, project_group) = source.build(ctx, limit.max_rows(), &alias)?;

        let mut new_limit = detached(&limit);
        new_limit.set_input(edges_project);
        new_limit.set_output_var(limit.output_var().to_string());
        let new_limit = ctx.add_plan_node(new_limit.into_enum())?;

        let group = ctx.group_node(matched.node)?.group();
        let node = ctx.create_group_node(group, new_limit, vec![project_group])?;
        Ok(TransformResult::replace(node))
    }
}
