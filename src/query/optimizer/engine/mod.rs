//! 优化引擎模块
//! 提供优化器的核心引擎实现

pub mod exploration;
pub mod optimizer;

pub use exploration::ExplorationState;
pub use optimizer::{OptimizationOutcome, OptimizationStatus, Optimizer, RuleSet};
