//! 单步遍历只取边时改写为边扫描的规则
//!
//! 例如 `MATCH ()-[e]->() RETURN e LIMIT 1`：不需要任何顶点信息，
//! 直接扫描边并在扫描时截断即可。

use std::collections::HashSet;

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::core::types::EdgeProp;
use crate::core::{Expression, YieldColumn};
use crate::define_opt_rule;
use crate::query::optimizer::plan::{
    GroupId, GroupNodeId, MatchedResult, OptContext, Pattern, TransformResult,
};
use crate::query::optimizer::rule_traits::{check_dataflow, OptRule};
use crate::query::optimizer::rules::detached;
use crate::query::planner::plan::core::nodes::{
    LimitNode, PlanNode, ProjectNode, ScanEdgesNode, SingleInputNode, TraverseNode,
};
use crate::query::planner::plan::core::{PlanNodeId, PlanNodeKind};
use crate::utils::AnonVarGenerator;

define_opt_rule! {
    /// 单步遍历只取边时改写为边扫描的规则
    ///
    /// # 转换示例
    ///
    /// Before:
    /// ```text
    ///   Project($-.e AS e)
    ///       |
    ///   Limit(offset, count)
    ///       |
    ///   Traverse(1 步)
    ///       |
    ///   ScanVertices
    /// ```
    ///
    /// After:
    /// ```text
    ///   Project($-.e AS e)
    ///       |
    ///   Limit(offset, count)
    ///       |
    ///   Project([EDGE] AS e)
    ///       |
    ///   ScanEdges(limit=offset+count)
    /// ```
    ///
    /// # 适用条件
    ///
    /// - Traverse 恰好一步，且没有顶点、边或结果过滤条件
    /// - Traverse 的起点列是匿名的，没有被后续引用
    /// - Project 只有一列，且直接引用 Traverse 输出的边列
    pub struct GetEdgesTransformLimitRule;
    pattern: Pattern::create(PlanNodeKind::Project).with_dependency(
        Pattern::create(PlanNodeKind::Limit).with_dependency(
            Pattern::create(PlanNodeKind::Traverse)
                .with_dependency(Pattern::create(PlanNodeKind::ScanVertices)),
        ),
    )
}

/// 同时包含某种边的正反两个方向
fn has_opposite_edge_types(edge_props: &[EdgeProp]) -> bool {
    let types: HashSet<_> = edge_props.iter().map(|p| p.edge_type).collect();
    types.iter().any(|t| *t != 0 && types.contains(&-*t))
}

fn traverse_applies(traverse: &TraverseNode) -> bool {
    if !traverse.is_one_step()
        || traverse.v_filter().is_some()
        || traverse.e_filter().is_some()
        || traverse.filter().is_some()
    {
        return false;
    }
    let cols = traverse.col_names();
    cols.len() >= 2 && AnonVarGenerator::is_anon_var(&cols[cols.len() - 2])
}

fn project_applies(project: &ProjectNode, edge_col: &str) -> bool {
    match project.columns() {
        [column] => column.expr.column_ref() == Some(edge_col),
        _ => false,
    }
}

/// `project` 只输出 `traverse` 的边列，且 Traverse 可以被边扫描替代
pub(super) fn edge_only_projection(
    ctx: &OptContext<'_>,
    project: GroupNodeId,
    traverse: Option<&MatchedResult>,
) -> bool {
    let project = ctx.plan_node(project).ok().and_then(|n| n.as_project());
    let traverse = traverse
        .and_then(|r| ctx.plan_node(r.node).ok())
        .and_then(|n| n.as_traverse());
    let (Some(project), Some(traverse)) = (project, traverse) else {
        return false;
    };
    traverse_applies(traverse)
        && traverse
            .col_names()
            .last()
            .map(|edge_col| project_applies(project, edge_col))
            .unwrap_or(false)
}

/// 边扫描改写中被替换的 Traverse 及其输入
pub(super) struct EdgeScanSource {
    traverse: TraverseNode,
    scan_vertices: GroupNodeId,
}

impl EdgeScanSource {
    /// 从匹配结果中取出 `path` 处的 Traverse 与其下的 ScanVertices
    pub(super) fn from_match(
        ctx: &OptContext<'_>,
        matched: &MatchedResult,
        path: &[usize],
    ) -> OptimizeResult<Self> {
        let traverse_match = matched
            .result(path)
            .ok_or_else(|| OptimizeError::precondition("缺少 Traverse"))?;
        let traverse = ctx
            .plan_node(traverse_match.node)?
            .as_traverse()
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("匹配位置不是 Traverse"))?;
        let scan_vertices = traverse_match
            .dependencies
            .first()
            .map(|r| r.node)
            .ok_or_else(|| OptimizeError::precondition("Traverse 缺少输入"))?;
        Ok(Self {
            traverse,
            scan_vertices,
        })
    }

    /// 同时包含某种边的正反两个方向时扫描结果会与遍历不同
    pub(super) fn is_bidirectional(&self) -> bool {
        has_opposite_edge_types(self.traverse.edge_props())
    }

    pub(super) fn edge_col(&self) -> OptimizeResult<String> {
        self.traverse
            .col_names()
            .last()
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("Traverse 没有输出列"))
    }

    /// 新建 `Project([EDGE] AS alias) <- ScanEdges(limit)`，返回 Project 及其所在组
    pub(super) fn build(
        &self,
        ctx: &mut OptContext<'_>,
        limit: i64,
        alias: &str,
    ) -> OptimizeResult<(PlanNodeId, GroupId)> {
        let scan_vertices_deps = ctx.plan_node(self.scan_vertices)?.dependencies().to_vec();
        let scan_vertices_groups = ctx.group_node(self.scan_vertices)?.dependencies().to_vec();

        let traverse = &self.traverse;
        let mut scan_edges = ScanEdgesNode::new(traverse.space_id(), traverse.edge_props().to_vec());
        scan_edges.set_dedup(traverse.dedup());
        scan_edges.set_limit(limit);
        scan_edges.set_filter(traverse.filter().cloned());
        scan_edges.set_dependencies(scan_vertices_deps);
        scan_edges.set_col_names(vec![self.edge_col()?]);
        let scan_edges = ctx.add_plan_node(scan_edges.into_enum())?;
        let scan_group = ctx.new_group_with(scan_edges, scan_vertices_groups)?;

        let edges_project = ProjectNode::new(
            scan_edges,
            vec![YieldColumn::new(Expression::List(vec![Expression::Edge]), alias)],
        );
        let edges_project = ctx.add_plan_node(edges_project.into_enum())?;
        let project_group = ctx.new_group_with(edges_project, vec![scan_group])?;
        Ok((edges_project, project_group))
    }
}

impl OptRule for GetEdgesTransformLimitRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn matches(&self, ctx: &OptContext<'_>, matched: &MatchedResult) -> bool {
        check_dataflow(ctx, matched)
            && edge_only_projection(ctx, matched.node, matched.result(&[0, 0]))
    }

    fn transform(
        &self,
        ctx: &mut OptContext<'_>,
        matched: &MatchedResult,
    ) -> OptimizeResult<TransformResult> {
        let project = ctx
            .plan_node(matched.node)?
            .as_project()
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("匹配的根节点不是 Project"))?;
        let limit = matched
            .plan_node_at(&[0])
            .and_then(|id| ctx.qctx().node(id))
            .and_then(|n| n.as_limit())
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("Project 的输入不是 Limit"))?;
        let source = EdgeScanSource::from_match(ctx, matched, &[0, 0])?;

        if source.is_bidirectional() {
            log::trace!("{}: 边类型同时包含正反方向，跳过改写", Self::NAME);
            return Ok(TransformResult::no_transform());
        }
        let edge_col = source.edge_col()?;
        let (edges_project, project_group) = source.build(ctx, limit.max_rows(), &edge_col)?;

        let new_limit = LimitNode::new(edges_project, limit.offset(), limit.count());
        let new_limit = ctx.add_plan_node(new_limit.into_enum())?;
        let limit_group: GroupId = ctx.new_group_with(new_limit, vec![project_group])?;

        let mut new_project = detached(&project);
        new_project.set_input(new_limit);
        new_project.set_output_var(project.output_var().to_string());
        let new_project: PlanNodeId = ctx.add_plan_node(new_project.into_enum())?;

        let group = ctx.group_node(matched.node)?.group();
        let node = ctx.create_group_node(group, new_project, vec![limit_group])?;
        Ok(TransformResult::replace(node))
    }
}
