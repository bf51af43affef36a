//! 规则注册初始化
//! 按阶段注册所有内置优化规则，注册顺序即执行顺序

use std::sync::Arc;

use crate::core::error::OptimizeResult;
use crate::query::optimizer::core::OptimizationPhase;
use crate::query::optimizer::rule_registry::RuleRegistry;
use crate::query::optimizer::rules::{
    GetEdgesTransformLimitRule, GetEdgesTransformRule, MultiShortestPathToBfsRule,
    PushLimitDownProjectRule, PushLimitDownScanEdgesRule, RemoveNoopProjectRule,
};

pub fn register_all_rules(registry: &mut RuleRegistry) -> OptimizeResult<()> {
    register_rule_based_rules(registry)?;
    register_cost_based_rules(registry)?;
    Ok(())
}

fn register_rule_based_rules(registry: &mut RuleRegistry) -> OptimizeResult<()> {
    let phase = OptimizationPhase::RuleBased;
    registry.register(phase, Arc::new(RemoveNoopProjectRule::new()))?;
    // 须在 Limit 与 Project 交换之前匹配 Limit <- Project <- Traverse
    registry.register(phase, Arc::new(GetEdgesTransformRule::new()))?;
    registry.register(phase, Arc::new(PushLimitDownProjectRule::new()))?;
    registry.register(phase, Arc::new(GetEdgesTransformLimitRule::new()))?;
    registry.register(phase, Arc::new(PushLimitDownScanEdgesRule::new()))?;
    Ok(())
}

fn register_cost_based_rules(registry: &mut RuleRegistry) -> OptimizeResult<()> {
    registry.register(OptimizationPhase::CostBased, Arc::new(MultiShortestPathToBfsRule::new()))
}
