//! 优化阶段定义
//!
//! 规则按阶段分组：基于规则的阶段直接替换子树，
//! 基于代价的阶段把候选方案保留为同组的兄弟节点，最终按代价选择。

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum OptimizationPhase {
    #[default]
    RuleBased,
    CostBased,
}

impl OptimizationPhase {
    /// 按执行顺序排列的全部阶段
    pub const ALL: [OptimizationPhase; 2] =
        [OptimizationPhase::RuleBased, OptimizationPhase::CostBased];

    pub fn name(&self) -> &'static str {
        match self {
            OptimizationPhase::RuleBased => "rule_based",
            OptimizationPhase::CostBased => "cost_based",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for OptimizationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
