//! 优化器引擎核心实现
//! 提供 Optimizer 结构体及其不动点优化逻辑
//!
//! 每一轮按阶段顺序遍历规则集，每条规则自底向上访问所有可达组，
//! 对组内尚未被该规则探索过的节点尝试匹配与改写。某一轮没有任何改写即收敛；
//! 达到轮数上限仍有改写则以 `Exhausted` 结束，返回当前最好的计划。

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::query::optimizer::core::{OptimizationConfig, OptimizationPhase, OptimizationStats};
use crate::query::optimizer::engine::ExplorationState;
use crate::query::optimizer::plan::{
    GroupId, GroupNodeId, MatchedResult, OptContext, TransformResult,
};
use crate::query::optimizer::rule_registry::RuleRegistry;
use crate::query::optimizer::rule_traits::OptRule;
use crate::query::planner::plan::core::{describe_plan, format_plan, PlanNodeId};
use crate::query::query_context::QueryContext;

/// 同一阶段的规则，按注册顺序执行
#[derive(Debug, Clone)]
pub struct RuleSet {
    phase: OptimizationPhase,
    rules: Vec<Arc<dyn OptRule>>,
}

impl RuleSet {
    pub fn new(phase: OptimizationPhase) -> Self {
        Self {
            phase,
            rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.phase.name()
    }

    pub fn phase(&self) -> OptimizationPhase {
        self.phase
    }

    pub fn add_rule(&mut self, rule: Arc<dyn OptRule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Arc<dyn OptRule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationStatus {
    /// 某一轮没有产生任何改写
    Converged,
    /// 达到轮数上限时仍有改写
    Exhausted,
}

impl fmt::Display for OptimizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationStatus::Converged => write!(f, "converged"),
            OptimizationStatus::Exhausted => write!(f, "exhausted"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    /// 优化后计划的根节点
    pub root: PlanNodeId,
    pub status: OptimizationStatus,
    pub stats: OptimizationStats,
}

#[derive(Debug, Clone)]
pub struct Optimizer {
    rule_sets: Vec<RuleSet>,
    config: OptimizationConfig,
}

impl Optimizer {
    pub fn new(mut rule_sets: Vec<RuleSet>, config: OptimizationConfig) -> Self {
        rule_sets.sort_by_key(|set| set.phase());
        Self { rule_sets, config }
    }

    pub fn from_registry(registry: &RuleRegistry, config: OptimizationConfig) -> Self {
        Self::new(registry.rule_sets().cloned().collect(), config)
    }

    /// 使用全局注册表中的内置规则
    pub fn builtin(config: OptimizationConfig) -> Self {
        Self::from_registry(RuleRegistry::global(), config)
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }

    /// 对以 `root` 为根的计划反复应用规则直到收敛或达到轮数上限
    pub fn find_best_plan(
        &self,
        qctx: &mut QueryContext,
        root: PlanNodeId,
    ) -> OptimizeResult<OptimizationOutcome> {
        let mut stats = OptimizationStats {
            plan_nodes_before: describe_plan(qctx, root).plan_node_descs.len(),
            ..OptimizationStats::default()
        };

        if self.config.max_iteration_rounds == 0 {
            stats.plan_nodes_after = stats.plan_nodes_before;
            log::warn!("Optimization skipped: iteration cap is 0, plan rooted at {} returned unchanged", root);
            return Ok(OptimizationOutcome {
                root,
                status: OptimizationStatus::Exhausted,
                stats,
            });
        }

        let mut ctx = OptContext::new(qctx, self.config.cost.clone());
        ctx.convert_plan(root)?;
        stats.cost_before = ctx.total_cost()?;

        let mut state = ExplorationState::default();
        let status = loop {
            if state.current_round >= self.config.max_iteration_rounds {
                break OptimizationStatus::Exhausted;
            }
            state.reset_round();
            self.explore_round(&mut ctx, &mut state, &mut stats)?;
            stats.passes += 1;
            if state.transforms_in_round() == 0 {
                break OptimizationStatus::Converged;
            }
        };

        stats.cost_after = ctx.total_cost()?;
        let new_root = ctx.extract_plan()?;
        stats.plan_nodes_after = describe_plan(qctx, new_root).plan_node_descs.len();

        if status == OptimizationStatus::Exhausted {
            log::warn!(
                "Optimization exhausted after {} passes with {} transforms",
                stats.passes,
                stats.transforms_applied
            );
        }
        log::info!(
            "Optimization {}: passes={}, transforms={}, nodes {} -> {}, cost {:.2} -> {:.2}",
            status,
            stats.passes,
            stats.transforms_applied,
            stats.plan_nodes_before,
            stats.plan_nodes_after,
            stats.cost_before,
            stats.cost_after
        );

        Ok(OptimizationOutcome {
            root: new_root,
            status,
            stats,
        })
    }

    fn explore_round(
        &self,
        ctx: &mut OptContext<'_>,
        state: &mut ExplorationState,
        stats: &mut OptimizationStats,
    ) -> OptimizeResult<()> {
        for rule_set in &self.rule_sets {
            if rule_set.phase() == OptimizationPhase::CostBased && !self.config.enable_cost_based {
                continue;
            }
            for rule in rule_set.rules() {
                if !self.config.is_rule_enabled(rule.name()) {
                    continue;
                }
                state.reset_rule();
                for group in ctx.live_groups() {
                    if state.is_visited_group(group) {
                        continue;
                    }
                    state.mark_group_visited(group);
                    self.explore_group(ctx, rule.as_ref(), group, state, stats)?;
                }
            }
        }
        Ok(())
    }

    fn explore_group(
        &self,
        ctx: &mut OptContext<'_>,
        rule: &dyn OptRule,
        group: GroupId,
        state: &mut ExplorationState,
        stats: &mut OptimizationStats,
    ) -> OptimizeResult<()> {
        let members = ctx.group(group)?.nodes().to_vec();
        for node in members {
            // 前面的改写可能已经把它移出组
            if !ctx.group(group)?.contains(node) || ctx.group_node(node)?.is_explored(rule.name()) {
                continue;
            }
            ctx.group_node_mut(node)?.set_explored(rule.name());

            let Some(matched) = rule.try_match(ctx, node) else {
                log::trace!("Rule {} does not match {} in group {}", rule.name(), node, group);
                continue;
            };

            let result = rule
                .transform(ctx, &matched)
                .map_err(|e| attribute_to_rule(ctx, rule, &matched, e))?;
            let applied = self
                .apply_transform(ctx, rule, node, group, result)
                .map_err(|e| attribute_to_rule(ctx, rule, &matched, e))?;

            if applied {
                state.record_applied(rule.name());
                stats.record_rule_application(rule.name());
                log::debug!(
                    "Rule {} rewrote group {} in pass {}",
                    rule.name(),
                    group,
                    state.current_round
                );
            }
        }
        Ok(())
    }

    /// 把改写结果合入组，返回组的内容是否发生了变化
    fn apply_transform(
        &self,
        ctx: &mut OptContext<'_>,
        rule: &dyn OptRule,
        node: GroupNodeId,
        group: GroupId,
        result: TransformResult,
    ) -> OptimizeResult<bool> {
        if result.is_no_transform() {
            return Ok(false);
        }

        let mut touched = BTreeSet::new();
        touched.insert(group);
        for new_node in &result.new_group_nodes {
            touched.insert(ctx.group_node(*new_node)?.group());
        }
        let before = self.group_fingerprints(ctx, &touched)?;

        if result.erase_all {
            ctx.group_mut(group)?.clear();
        } else if result.erase_curr {
            ctx.group_mut(group)?.remove_node(node);
        }

        for new_node in &result.new_group_nodes {
            let target = ctx.group_node(*new_node)?.group();
            if ctx.is_duplicate(target, *new_node)? {
                log::trace!("Rule {} produced duplicate {} in group {}", rule.name(), new_node, target);
                continue;
            }
            ctx.group_mut(target)?.add_node(*new_node);
        }

        if ctx.group(group)?.is_empty() {
            return Err(OptimizeError::rule_application(
                rule.name(),
                format!("改写后组 {} 为空", group),
                format_plan(ctx.qctx(), ctx.group_node(node)?.plan_node()),
            ));
        }

        if self.group_fingerprints(ctx, &touched)? == before {
            return Ok(false);
        }
        for target in &touched {
            let dirty = ctx.mark_dirty(*target, result.restart)?;
            log::trace!("Group {} marks {} groups dirty", target, dirty.len());
        }
        Ok(true)
    }

    fn group_fingerprints(
        &self,
        ctx: &OptContext<'_>,
        groups: &BTreeSet<GroupId>,
    ) -> OptimizeResult<Vec<BTreeSet<String>>> {
        let mut result = Vec::with_capacity(groups.len());
        for group in groups {
            let mut fingerprints = BTreeSet::new();
            for node in ctx.group(*group)?.nodes() {
                fingerprints.insert(ctx.fingerprint(*node)?);
            }
            result.push(fingerprints);
        }
        Ok(result)
    }
}

/// 把改写过程中的错误归到规则名下，附带被匹配的子计划
fn attribute_to_rule(
    ctx: &OptContext<'_>,
    rule: &dyn OptRule,
    matched: &MatchedResult,
    err: OptimizeError,
) -> OptimizeError {
    match err {
        OptimizeError::RuleApplication { .. } => err,
        other => OptimizeError::rule_application(
            rule.name(),
            other.to_string(),
            format_plan(ctx.qctx(), matched.plan_node),
        ),
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::builtin(OptimizationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::optimizer::plan::Pattern;
    use crate::query::planner::plan::core::nodes::{LimitNode, PlanNode, PlanNodeKind, StartNode};

    /// 每次都把 Limit 的 count 加一，永远不会收敛
    #[derive(Debug)]
    struct GrowLimitRule {
        pattern: Pattern,
    }

    impl OptRule for GrowLimitRule {
        fn name(&self) -> &'static str {
            "GrowLimitRule"
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
                .ok_or_else(|| OptimizeError::precondition("not a limit"))?;
            let input = limit.dependencies().to_vec();
            let mut grown = LimitNode::new(input[0], limit.offset(), limit.count() + 1);
            grown.set_output_var(limit.output_var().to_string());
            let grown = ctx.add_plan_node(grown.into_enum())?;
            let (group, deps) = {
                let node = ctx.group_node(matched.node)?;
                (node.group(), node.dependencies().to_vec())
            };
            let node = ctx.create_group_node(group, grown, deps)?;
            Ok(TransformResult::replace(node))
        }
    }

    #[derive(Debug)]
    struct FailingRule {
        pattern: Pattern,
    }

    impl OptRule for FailingRule {
        fn name(&self) -> &'static str {
            "FailingRule"
        }

        fn pattern(&self) -> &Pattern {
            &self.pattern
        }

        fn transform(
            &self,
            _ctx: &mut OptContext<'_>,
            _matched: &MatchedResult,
        ) -> OptimizeResult<TransformResult> {
            Err(OptimizeError::precondition("输入列缺失"))
        }
    }

    /// 返回不存在的组节点
    #[derive(Debug)]
    struct DanglingNodeRule {
        pattern: Pattern,
    }

    impl OptRule for DanglingNodeRule {
        fn name(&self) -> &'static str {
            "DanglingNodeRule"
        }

        fn pattern(&self) -> &Pattern {
            &self.pattern
        }

        fn transform(
            &self,
            _ctx: &mut OptContext<'_>,
            _matched: &MatchedResult,
        ) -> OptimizeResult<TransformResult> {
            Ok(TransformResult::replace(GroupNodeId(999)))
        }
    }

    fn optimizer_with(rule: Arc<dyn OptRule>, rounds: usize) -> Optimizer {
        let mut set = RuleSet::new(OptimizationPhase::RuleBased);
        set.add_rule(rule);
        Optimizer::new(vec![set], OptimizationConfig::default().with_max_iteration_rounds(rounds))
    }

    fn limit_plan(qctx: &mut QueryContext) -> PlanNodeId {
        let start = StartNode::new().make(qctx).expect("创建节点失败");
        LimitNode::new(start, 0, 1).make(qctx).expect("创建节点失败")
    }

    #[test]
    fn test_exhausted_at_cap() {
        let rule = Arc::new(GrowLimitRule {
            pattern: Pattern::create(PlanNodeKind::Limit),
        });
        let optimizer = optimizer_with(rule, 3);
        let mut qctx = QueryContext::new(1);
        let root = limit_plan(&mut qctx);

        let outcome = optimizer.find_best_plan(&mut qctx, root).expect("优化失败");
        assert_eq!(outcome.status, OptimizationStatus::Exhausted);
        assert_eq!(outcome.stats.passes, 3);
        assert_eq!(outcome.stats.applications_of("GrowLimitRule"), 3);
        let limit = qctx.node(outcome.root).and_then(|n| n.as_limit()).map(|l| l.count());
        assert_eq!(limit, Some(4));
    }

    #[test]
    fn test_transform_error_carries_rule_and_subtree() {
        let rule = Arc::new(FailingRule {
            pattern: Pattern::create(PlanNodeKind::Limit),
        });
        let optimizer = optimizer_with(rule, 8);
        let mut qctx = QueryContext::new(1);
        let root = limit_plan(&mut qctx);

        let err = optimizer.find_best_plan(&mut qctx, root).expect_err("应当失败");
        match err {
            OptimizeError::RuleApplication { rule, reason, subtree } => {
                assert_eq!(rule, "FailingRule");
                assert!(reason.contains("输入列缺失"));
                assert!(subtree.starts_with("Limit("));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_apply_error_carries_rule_and_subtree() {
        let rule = Arc::new(DanglingNodeRule {
            pattern: Pattern::create(PlanNodeKind::Limit),
        });
        let optimizer = optimizer_with(rule, 8);
        let mut qctx = QueryContext::new(1);
        let root = limit_plan(&mut qctx);

        let err = optimizer.find_best_plan(&mut qctx, root).expect_err("应当失败");
        match err {
            OptimizeError::RuleApplication { rule, subtree, .. } => {
                assert_eq!(rule, "DanglingNodeRule");
                assert!(subtree.starts_with("Limit("));
                assert!(subtree.contains("Start("));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rule_set_sorted_by_phase() {
        let optimizer = Optimizer::new(
            vec![
                RuleSet::new(OptimizationPhase::CostBased),
                RuleSet::new(OptimizationPhase::RuleBased),
            ],
            OptimizationConfig::default(),
        );
        let names: Vec<_> = optimizer.rule_sets().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["rule_based", "cost_based"]);
    }
}
