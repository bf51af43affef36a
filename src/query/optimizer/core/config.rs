//! 优化配置和统计
//! 定义优化器的配置参数和统计信息收集

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::cost::CostModelConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    /// 探索轮数上限，为 0 时不做任何改写
    pub max_iteration_rounds: usize,
    /// 是否执行基于代价的阶段
    pub enable_cost_based: bool,
    /// 按名称禁用的规则
    pub disabled_rules: Vec<String>,
    pub cost: CostModelConfig,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            max_iteration_rounds: 32,
            enable_cost_based: true,
            disabled_rules: Vec::new(),
            cost: CostModelConfig::default(),
        }
    }
}

impl OptimizationConfig {
    pub fn with_max_iteration_rounds(mut self, rounds: usize) -> Self {
        self.max_iteration_rounds = rounds;
        self
    }

    pub fn is_rule_enabled(&self, name: &str) -> bool {
        !self.disabled_rules.iter().any(|r| r == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizationStats {
    /// 执行过的完整探索轮数
    pub passes: usize,
    pub transforms_applied: usize,
    /// 每条规则成功改写的次数
    pub rule_applications: BTreeMap<String, usize>,
    pub plan_nodes_before: usize,
    pub plan_nodes_after: usize,
    pub cost_before: f64,
    pub cost_after: f64,
}

impl OptimizationStats {
    pub fn record_rule_application(&mut self, rule: &str) {
        self.transforms_applied += 1;
        *self.rule_applications.entry(rule.to_string()).or_insert(0) += 1;
    }

    pub fn applications_of(&self, rule: &str) -> usize {
        self.rule_applications.get(rule).copied().unwrap_or(0)
    }
}
