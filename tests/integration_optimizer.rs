//! 优化器集成测试
//!
//! 覆盖完整的 find_best_plan 流程：规则改写、收敛判定、轮数上限、
//! 规则失败的错误传播以及多线程共享优化器。

mod common;

use std::sync::Arc;

use common::assertions::{assert_converged, assert_err_with, assert_ok, assert_unchanged};
use common::*;
use graphdb_optimizer::core::{Expression, OptimizeError, OptimizeResult, YieldColumn};
use graphdb_optimizer::define_opt_rule;
use graphdb_optimizer::query::optimizer::{
    CostModelConfig, GetEdgesTransformLimitRule, GetEdgesTransformRule, MatchedResult, MultiShortestPathToBfsRule,
    OptContext, OptRule, OptimizationConfig, OptimizationPhase, OptimizationStatus, Optimizer, Pattern, RuleRegistry,
    TransformResult,
};
use graphdb_optimizer::query::planner::plan::core::nodes::{
    LimitNode, PlanNode, PlanNodeKind, ProjectNode, ScanVerticesNode,
};
use graphdb_optimizer::query::planner::plan::{BiCartesianProduct, MultiShortestPath};
use graphdb_optimizer::query::QueryContext;

#[test]
fn test_edge_scan_rewrite() {
    let mut qctx = QueryContext::new(SPACE);
    let root = edge_limit_plan(&mut qctx);

    let outcome = assert_ok(edge_scan_optimizer().find_best_plan(&mut qctx, root));
    assert_converged(&outcome);
    assert_eq!(outcome.stats.applications_of(GetEdgesTransformLimitRule::NAME), 1);
    assert_eq!(
        kind_chain(&qctx, outcome.root),
        vec![
            PlanNodeKind::Project,
            PlanNodeKind::Limit,
            PlanNodeKind::Project,
            PlanNodeKind::ScanEdges,
        ]
    );

    let root_node = qctx.node(outcome.root).expect("根节点应存在");
    assert_eq!(root_node.output_var(), RESULT_VAR);

    let scan = node_at_depth(&qctx, outcome.root, 3);
    let scan = qctx.node(scan).and_then(|n| n.as_scan_edges()).expect("应为 ScanEdges");
    assert_eq!(scan.limit(), Some(1));
    assert_eq!(scan.edge_props().len(), 1);
    assert_eq!(scan.edge_props()[0].edge_type, 5);

    let edges = node_at_depth(&qctx, outcome.root, 2);
    let edges = qctx.node(edges).and_then(|n| n.as_project()).expect("应为 Project");
    assert_eq!(edges.columns().len(), 1);
    assert_eq!(edges.columns()[0].name(), "e");
    assert!(matches!(edges.columns()[0].expr, Expression::List(_)));
}

#[test]
fn test_edge_scan_rewrite_is_idempotent() {
    let mut qctx = QueryContext::new(SPACE);
    let root = edge_limit_plan(&mut qctx);
    let optimizer = edge_scan_optimizer();

    let first = assert_ok(optimizer.find_best_plan(&mut qctx, root));
    let second = assert_ok(optimizer.find_best_plan(&mut qctx, first.root));
    assert_unchanged(&second);
    assert_eq!(second.root, first.root);
}

#[test]
fn test_limit_over_project_edge_scan_rewrite() {
    let mut qctx = QueryContext::new(SPACE);
    let root = limit_project_edge_plan(&mut qctx);
    let optimizer = edge_scan_optimizer();

    let outcome = assert_ok(optimizer.find_best_plan(&mut qctx, root));
    assert_converged(&outcome);
    assert_eq!(outcome.stats.applications_of(GetEdgesTransformRule::NAME), 1);
    assert_eq!(outcome.stats.applications_of(GetEdgesTransformLimitRule::NAME), 0);
    assert_eq!(
        kind_chain(&qctx, outcome.root),
        vec![PlanNodeKind::Limit, PlanNodeKind::Project, PlanNodeKind::ScanEdges]
    );

    let limit = qctx.node(outcome.root).expect("根节点应存在");
    assert_eq!(limit.output_var(), RESULT_VAR);
    assert_eq!(limit.as_limit().map(|l| (l.offset(), l.count())), Some((0, 1)));

    let edges = node_at_depth(&qctx, outcome.root, 1);
    let edges = qctx.node(edges).and_then(|n| n.as_project()).expect("应为 Project");
    assert_eq!(edges.columns()[0].name(), "e");
    assert!(matches!(edges.columns()[0].expr, Expression::List(_)));

    let scan = node_at_depth(&qctx, outcome.root, 2);
    let scan = qctx.node(scan).and_then(|n| n.as_scan_edges()).expect("应为 ScanEdges");
    assert_eq!(scan.limit(), Some(1));

    let again = assert_ok(optimizer.find_best_plan(&mut qctx, outcome.root));
    assert_unchanged(&again);
    assert_eq!(again.root, outcome.root);
}

#[test]
fn test_builtin_rules_on_limit_over_project() {
    let mut qctx = QueryContext::new(SPACE);
    let root = limit_project_edge_plan(&mut qctx);
    let optimizer = Optimizer::builtin(OptimizationConfig::default());

    let outcome = assert_ok(optimizer.find_best_plan(&mut qctx, root));
    assert_converged(&outcome);
    assert_eq!(outcome.stats.applications_of(GetEdgesTransformRule::NAME), 1);

    let chain = kind_chain(&qctx, outcome.root);
    assert!(!chain.contains(&PlanNodeKind::Traverse), "计划: {:?}", chain);
    assert_eq!(chain.last(), Some(&PlanNodeKind::ScanEdges));
    assert_eq!(
        qctx.node(outcome.root).map(|n| n.output_var().to_string()),
        Some(RESULT_VAR.to_string())
    );
    let scan = node_at_depth(&qctx, outcome.root, chain.len() - 1);
    let scan = qctx.node(scan).and_then(|n| n.as_scan_edges()).expect("应为 ScanEdges");
    assert_eq!(scan.limit(), Some(1));

    let again = assert_ok(optimizer.find_best_plan(&mut qctx, outcome.root));
    assert_unchanged(&again);
}

#[test]
fn test_builtin_rules_reach_fixpoint() {
    let mut qctx = QueryContext::new(SPACE);
    let root = edge_limit_plan(&mut qctx);
    let optimizer = Optimizer::builtin(OptimizationConfig::default());

    let outcome = assert_ok(optimizer.find_best_plan(&mut qctx, root));
    assert_converged(&outcome);
    assert_eq!(
        kind_chain(&qctx, outcome.root),
        vec![PlanNodeKind::Project, PlanNodeKind::Limit, PlanNodeKind::ScanEdges]
    );
    assert_eq!(
        qctx.node(outcome.root).map(|n| n.output_var().to_string()),
        Some(RESULT_VAR.to_string())
    );
    assert!(outcome.stats.plan_nodes_after < outcome.stats.plan_nodes_before);
    assert!(outcome.stats.cost_after < outcome.stats.cost_before);

    let again = assert_ok(optimizer.find_best_plan(&mut qctx, outcome.root));
    assert_unchanged(&again);
}

#[test]
fn test_plan_without_matches_is_unchanged() {
    let mut qctx = QueryContext::new(SPACE);
    let root = vertex_project_plan(&mut qctx);
    let nodes_before = qctx.node_count();

    let outcome = assert_ok(Optimizer::default().find_best_plan(&mut qctx, root));
    assert_unchanged(&outcome);
    assert_eq!(outcome.root, root);
    assert_eq!(qctx.node_count(), nodes_before);
}

#[test]
fn test_zero_iteration_cap() {
    let mut qctx = QueryContext::new(SPACE);
    let root = edge_limit_plan(&mut qctx);
    let config = OptimizationConfig::default().with_max_iteration_rounds(0);

    let outcome = assert_ok(Optimizer::builtin(config).find_best_plan(&mut qctx, root));
    assert_eq!(outcome.status, OptimizationStatus::Exhausted);
    assert_eq!(outcome.root, root);
    assert_eq!(outcome.stats.passes, 0);
    assert_eq!(outcome.stats.transforms_applied, 0);
    assert_eq!(kind_chain(&qctx, root).len(), 4);
}

#[test]
fn test_disabled_rule_is_skipped() {
    let mut qctx = QueryContext::new(SPACE);
    let root = edge_limit_plan(&mut qctx);
    let config = OptimizationConfig {
        disabled_rules: vec![GetEdgesTransformLimitRule::NAME.to_string()],
        ..OptimizationConfig::default()
    };

    let outcome = assert_ok(Optimizer::builtin(config).find_best_plan(&mut qctx, root));
    assert_unchanged(&outcome);
    assert_eq!(
        kind_chain(&qctx, outcome.root),
        vec![
            PlanNodeKind::Project,
            PlanNodeKind::Limit,
            PlanNodeKind::Traverse,
            PlanNodeKind::ScanVertices,
        ]
    );
}

#[test]
fn test_shared_traverse_blocks_rewrite() {
    let mut qctx = QueryContext::new(SPACE);
    let scan = assert_ok(ScanVerticesNode::new(SPACE, vec![]).make(&mut qctx));
    let shared = traverse(&mut qctx, scan);
    let limit = assert_ok(LimitNode::new(shared, 0, 1).make(&mut qctx));
    let project = assert_ok(
        ProjectNode::new(
            limit,
            vec![YieldColumn::new(Expression::input_property("e"), "e")],
        )
        .make(&mut qctx),
    );
    let root = assert_ok(BiCartesianProduct::new(project, &[], shared, &[]).make(&mut qctx));

    let outcome = assert_ok(edge_scan_optimizer().find_best_plan(&mut qctx, root));
    assert_unchanged(&outcome);
    assert_eq!(outcome.stats.applications_of(GetEdgesTransformLimitRule::NAME), 0);

    let right = qctx
        .node(outcome.root)
        .and_then(|n| n.dependencies().get(1).copied())
        .expect("右输入应存在");
    assert_eq!(qctx.node(right).map(|n| n.kind()), Some(PlanNodeKind::Traverse));
}

#[test]
fn test_shortest_path_uses_bfs_for_single_pair() {
    let mut qctx = QueryContext::new(SPACE);
    let root = single_pair_shortest_path_plan(&mut qctx);

    let outcome = assert_ok(Optimizer::default().find_best_plan(&mut qctx, root));
    assert_converged(&outcome);
    assert_eq!(outcome.stats.applications_of(MultiShortestPathToBfsRule::NAME), 1);

    let node = qctx.node(outcome.root).expect("根节点应存在");
    let bfs = node.as_bfs_shortest_path().expect("应选择 BFSShortestPath");
    assert_eq!(bfs.steps(), 4);
    assert_eq!(bfs.left_vid_var(), "__left_vids");
    assert_eq!(bfs.right_vid_var(), "__right_vids");
    assert_eq!(node.output_var(), "paths");
    assert_eq!(
        qctx.node(root).map(|n| n.dependencies().to_vec()),
        Some(node.dependencies().to_vec())
    );
}

#[test]
fn test_shortest_path_without_cost_gain_is_stable() {
    let mut qctx = QueryContext::new(SPACE);
    let root = single_pair_shortest_path_plan(&mut qctx);
    let config = OptimizationConfig {
        cost: CostModelConfig {
            multi_shortest_path_factor: 1.0,
            ..CostModelConfig::default()
        },
        ..OptimizationConfig::default()
    };
    let optimizer = Optimizer::builtin(config);

    let first = assert_ok(optimizer.find_best_plan(&mut qctx, root));
    assert_unchanged(&first);
    assert_eq!(first.root, root);

    let second = assert_ok(optimizer.find_best_plan(&mut qctx, first.root));
    assert_unchanged(&second);
    assert_eq!(second.stats.applications_of(MultiShortestPathToBfsRule::NAME), 0);
    assert_eq!(
        qctx.node(second.root).map(|n| n.kind()),
        Some(PlanNodeKind::MultiShortestPath)
    );
}

#[test]
fn test_cost_based_phase_can_be_disabled() {
    let mut qctx = QueryContext::new(SPACE);
    let root = single_pair_shortest_path_plan(&mut qctx);
    let config = OptimizationConfig {
        enable_cost_based: false,
        ..OptimizationConfig::default()
    };

    let outcome = assert_ok(Optimizer::builtin(config).find_best_plan(&mut qctx, root));
    assert_unchanged(&outcome);
    assert_eq!(
        qctx.node(outcome.root).map(|n| n.kind()),
        Some(PlanNodeKind::MultiShortestPath)
    );
}

#[test]
fn test_multi_source_shortest_path_is_kept() {
    let mut qctx = QueryContext::new(SPACE);
    let left = assert_ok(ScanVerticesNode::new(SPACE, vec![]).make(&mut qctx));
    let right = assert_ok(ScanVerticesNode::new(SPACE, vec![]).make(&mut qctx));
    let root = assert_ok(MultiShortestPath::new(left, right, 3).make(&mut qctx));

    let outcome = assert_ok(Optimizer::default().find_best_plan(&mut qctx, root));
    assert_unchanged(&outcome);
    assert_eq!(outcome.root, root);
}

define_opt_rule! {
    /// transform 总是失败的规则
    pub struct RejectLimitRule;
    pattern: Pattern::create(PlanNodeKind::Limit)
}

impl OptRule for RejectLimitRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn transform(
        &self,
        _ctx: &mut OptContext<'_>,
        _matched: &MatchedResult,
    ) -> OptimizeResult<TransformResult> {
        Err(OptimizeError::precondition("limit 不允许出现在此处"))
    }
}

#[test]
fn test_failing_rule_aborts_optimization() {
    let mut registry = RuleRegistry::new();
    assert_ok(registry.register(OptimizationPhase::RuleBased, Arc::new(RejectLimitRule::new())));
    let optimizer = Optimizer::from_registry(&registry, OptimizationConfig::default());

    let mut qctx = QueryContext::new(SPACE);
    let root = edge_limit_plan(&mut qctx);
    let result = optimizer.find_best_plan(&mut qctx, root);

    match &result {
        Err(OptimizeError::RuleApplication { rule, subtree, .. }) => {
            assert_eq!(rule, RejectLimitRule::NAME);
            assert!(subtree.starts_with("Limit("), "子树描述: {}", subtree);
            assert!(subtree.contains("Traverse("));
        }
        other => panic!("应返回规则应用错误, 实际 {:?}", other),
    }
    assert_err_with(result, "limit 不允许出现在此处");
}

#[test]
fn test_shared_optimizer_across_threads() {
    let optimizer = Optimizer::builtin(OptimizationConfig::default());

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    let mut qctx = QueryContext::new(SPACE);
                    let root = edge_limit_plan(&mut qctx);
                    let outcome = assert_ok(optimizer.find_best_plan(&mut qctx, root));
                    (outcome.status, kind_chain(&qctx, outcome.root))
                })
            })
            .collect();

        for handle in handles {
            let (status, chain) = handle.join().expect("线程不应 panic");
            assert_eq!(status, OptimizationStatus::Converged);
            assert_eq!(
                chain,
                vec![PlanNodeKind::Project, PlanNodeKind::Limit, PlanNodeKind::ScanEdges]
            );
        }
    });
}
