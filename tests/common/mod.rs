//! 集成测试共享工具模块
//!
//! 提供构造典型计划的辅助函数，供所有集成测试使用

#![allow(dead_code)]

pub mod assertions;

use std::sync::Arc;

use graphdb_optimizer::core::types::EdgeProp;
use graphdb_optimizer::core::{Expression, YieldColumn};
use graphdb_optimizer::query::optimizer::{
    GetEdgesTransformLimitRule, GetEdgesTransformRule, OptimizationConfig, OptimizationPhase,
    Optimizer, RuleSet,
};
use graphdb_optimizer::query::planner::plan::core::nodes::{
    LimitNode, PlanNode, PlanNodeKind, ProjectNode, ScanVerticesNode, StartNode, TraverseNode,
};
use graphdb_optimizer::query::planner::plan::core::PlanNodeId;
use graphdb_optimizer::query::planner::plan::MultiShortestPath;
use graphdb_optimizer::query::QueryContext;

/// 测试使用的图空间
pub const SPACE: i32 = 1;

/// 根 Project 的输出变量
pub const RESULT_VAR: &str = "result";

/// `MATCH ()-[e]->() RETURN e LIMIT 1` 的计划
///
/// ```text
/// Project($-.e AS e) -> result
///   Limit(0, 1)
///     Traverse(1 步, 输出 [__src, e])
///       ScanVertices
/// ```
pub fn edge_limit_plan(qctx: &mut QueryContext) -> PlanNodeId {
    let scan = ScanVerticesNode::new(SPACE, vec![])
        .make(qctx)
        .expect("创建 ScanVertices 失败");
    traverse_limit_project(qctx, scan)
}

/// 在给定输入上构造 Traverse -> Limit -> Project
pub fn traverse_limit_project(qctx: &mut QueryContext, input: PlanNodeId) -> PlanNodeId {
    let traverse = traverse(qctx, input);
    let limit = LimitNode::new(traverse, 0, 1)
        .make(qctx)
        .expect("创建 Limit 失败");
    let mut project = ProjectNode::new(
        limit,
        vec![YieldColumn::new(Expression::input_property("e"), "e")],
    );
    project.set_output_var(RESULT_VAR.to_string());
    project.make(qctx).expect("创建 Project 失败")
}

/// LIMIT 在投影之上的同一查询
///
/// ```text
/// Limit(0, 1) -> result
///   Project($-.e AS e)
///     Traverse(1 步, 输出 [__src, e])
///       ScanVertices
/// ```
pub fn limit_project_edge_plan(qctx: &mut QueryContext) -> PlanNodeId {
    let scan = ScanVerticesNode::new(SPACE, vec![])
        .make(qctx)
        .expect("创建 ScanVertices 失败");
    let traverse = traverse(qctx, scan);
    let project = ProjectNode::new(
        traverse,
        vec![YieldColumn::new(Expression::input_property("e"), "e")],
    )
    .make(qctx)
    .expect("创建 Project 失败");
    let mut limit = LimitNode::new(project, 0, 1);
    limit.set_output_var(RESULT_VAR.to_string());
    limit.make(qctx).expect("创建 Limit 失败")
}

pub fn traverse(qctx: &mut QueryContext, input: PlanNodeId) -> PlanNodeId {
    let mut traverse = TraverseNode::new(input, SPACE, Expression::input_property("v"));
    traverse.set_edge_props(vec![EdgeProp {
        edge_type: 5,
        props: vec!["_src".to_string(), "_dst".to_string()],
    }]);
    traverse.set_col_names(vec!["__src".to_string(), "e".to_string()]);
    traverse.make(qctx).expect("创建 Traverse 失败")
}

/// 没有任何内置规则可以匹配的计划
pub fn vertex_project_plan(qctx: &mut QueryContext) -> PlanNodeId {
    let start = StartNode::new().make(qctx).expect("创建 Start 失败");
    ProjectNode::new(start, vec![YieldColumn::new(Expression::Vertex, "v")])
        .make(qctx)
        .expect("创建 Project 失败")
}

/// 两个单行输入上的多源最短路径
pub fn single_pair_shortest_path_plan(qctx: &mut QueryContext) -> PlanNodeId {
    let left = StartNode::new().make(qctx).expect("创建 Start 失败");
    let right = StartNode::new().make(qctx).expect("创建 Start 失败");
    let mut msp = MultiShortestPath::new(left, right, 4);
    msp.set_left_vid_var("__left_vids");
    msp.set_right_vid_var("__right_vids");
    msp.set_output_var("paths".to_string());
    msp.make(qctx).expect("创建 MultiShortestPath 失败")
}

/// 只启用边扫描改写规则的优化器
pub fn edge_scan_optimizer() -> Optimizer {
    let mut set = RuleSet::new(OptimizationPhase::RuleBased);
    set.add_rule(Arc::new(GetEdgesTransformRule::new()));
    set.add_rule(Arc::new(GetEdgesTransformLimitRule::new()));
    Optimizer::new(vec![set], OptimizationConfig::default())
}

/// 从根节点沿第一个依赖向下的节点类型
pub fn kind_chain(qctx: &QueryContext, root: PlanNodeId) -> Vec<PlanNodeKind> {
    let mut kinds = Vec::new();
    let mut current = Some(root);
    while let Some(id) = current {
        let node = qctx.node(id).expect("节点应存在");
        kinds.push(node.kind());
        current = node.dependencies().first().copied();
    }
    kinds
}

/// 从根节点沿第一个依赖向下第 `depth` 个节点
pub fn node_at_depth(qctx: &QueryContext, root: PlanNodeId, depth: usize) -> PlanNodeId {
    let mut current = root;
    for _ in 0..depth {
        current = qctx
            .node(current)
            .and_then(|n| n.dependencies().first().copied())
            .expect("依赖应存在");
    }
    current
}
