//! 规则注册机制
//! 提供按阶段组织的规则注册表，以及进程内共享的全局注册表
//!
//! 规则是无状态单例，注册表构造完成后不再修改，可以在多个线程的优化过程之间共享。

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::query::optimizer::core::OptimizationPhase;
use crate::query::optimizer::engine::RuleSet;
use crate::query::optimizer::rule_registrar::register_all_rules;
use crate::query::optimizer::rule_traits::OptRule;

static GLOBAL_REGISTRY: OnceLock<RuleRegistry> = OnceLock::new();

#[derive(Debug, Default)]
pub struct RuleRegistry {
    rule_sets: BTreeMap<OptimizationPhase, RuleSet>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册内置规则的注册表
    pub fn builtin() -> OptimizeResult<Self> {
        let mut registry = Self::new();
        register_all_rules(&mut registry)?;
        Ok(registry)
    }

    /// 全局注册表，首次访问时注册内置规则
    pub fn global() -> &'static RuleRegistry {
        GLOBAL_REGISTRY.get_or_init(|| {
            Self::builtin().unwrap_or_else(|e| {
                log::error!("Failed to register builtin rules: {}", e);
                Self::new()
            })
        })
    }

    /// 规则名在所有阶段之间唯一
    pub fn register(&mut self, phase: OptimizationPhase, rule: Arc<dyn OptRule>) -> OptimizeResult<()> {
        if self.find(rule.name()).is_some() {
            return Err(OptimizeError::DuplicateRule(rule.name().to_string()));
        }
        log::trace!("Register rule {} in phase {}", rule.name(), phase);
        self.rule_sets
            .entry(phase)
            .or_insert_with(|| RuleSet::new(phase))
            .add_rule(rule);
        Ok(())
    }

    pub fn rule_set(&self, phase: OptimizationPhase) -> Option<&RuleSet> {
        self.rule_sets.get(&phase)
    }

    /// 按阶段名查找，如 `rule_based`
    pub fn rule_set_by_name(&self, name: &str) -> Option<&RuleSet> {
        OptimizationPhase::from_name(name).and_then(|phase| self.rule_set(phase))
    }

    /// 按阶段顺序遍历规则集
    pub fn rule_sets(&self) -> impl Iterator<Item = &RuleSet> {
        self.rule_sets.values()
    }

    pub fn find(&self, name: &str) -> Option<Arc<dyn OptRule>> {
        self.rule_sets
            .values()
            .flat_map(|set| set.rules())
            .find(|rule| rule.name() == name)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.rule_sets.values().map(|set| set.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::optimizer::rules::{PushLimitDownScanEdgesRule, RemoveNoopProjectRule};

    #[test]
    fn test_register_and_find() {
        let mut registry = RuleRegistry::new();
        registry
            .register(OptimizationPhase::RuleBased, Arc::new(RemoveNoopProjectRule::new()))
            .expect("注册失败");
        assert_eq!(registry.count(), 1);
        assert!(registry.find("RemoveNoopProjectRule").is_some());
        assert!(registry.rule_set(OptimizationPhase::CostBased).is_none());
        assert_eq!(registry.rule_set_by_name("rule_based").map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_duplicate_rule_rejected() {
        let mut registry = RuleRegistry::new();
        registry
            .register(OptimizationPhase::RuleBased, Arc::new(PushLimitDownScanEdgesRule::new()))
            .expect("注册失败");
        let result = registry.register(OptimizationPhase::CostBased, Arc::new(PushLimitDownScanEdgesRule::new()));
        assert!(matches!(result, Err(OptimizeError::DuplicateRule(name)) if name == "PushLimitDownScanEdgesRule"));
    }

    #[test]
    fn test_global_registry_builtin_order() {
        let registry = RuleRegistry::global();
        let rule_based: Vec<_> = registry
            .rule_set(OptimizationPhase::RuleBased)
            .map(|set| set.rules().iter().map(|r| r.name()).collect())
            .unwrap_or_default();
        assert_eq!(
            rule_based,
            vec![
                "RemoveNoopProjectRule",
                "GetEdgesTransformRule",
                "PushLimitDownProjectRule",
                "GetEdgesTransformLimitRule",
                "PushLimitDownScanEdgesRule",
            ]
        );
        assert!(registry.find("MultiShortestPathToBfsRule").is_some());
        assert_eq!(registry.count(), 6);
    }
}
