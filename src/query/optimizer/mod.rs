//! 查询优化器模块
//!
//! 基于规则的计划改写框架：计划先转换为组结构，规则在组上做模式匹配与改写，
//! 反复执行直到收敛，最后按代价从每个组中选出一个节点组成新计划。
//!
//! ## 模块结构
//!
//! - `core` - 优化阶段、配置、统计与代价模型
//! - `plan` - 组、组节点、模式与优化上下文
//! - `rule_traits` - 规则接口
//! - `rules` - 内置规则
//! - `rule_registry` / `rule_registrar` - 规则注册
//! - `engine` - 不动点优化驱动
//!
//! ## 使用示例
//!
//! ```rust
//! use graphdb_optimizer::query::optimizer::{OptimizationConfig, Optimizer};
//! use graphdb_optimizer::query::planner::plan::core::nodes::{LimitNode, PlanNode, ScanEdgesNode};
//! use graphdb_optimizer::query::QueryContext;
//!
//! let mut qctx = QueryContext::new(1);
//! let scan = ScanEdgesNode::new(1, vec![]).make(&mut qctx).unwrap();
//! let limit = LimitNode::new(scan, 0, 10).make(&mut qctx).unwrap();
//!
//! let optimizer = Optimizer::builtin(OptimizationConfig::default());
//! let outcome = optimizer.find_best_plan(&mut qctx, limit).unwrap();
//! println!("{:?} after {} passes", outcome.status, outcome.stats.passes);
//! ```

pub mod core;
pub mod engine;
pub mod plan;
pub mod rule_registrar;
pub mod rule_registry;
pub mod rule_traits;
pub mod rules;

pub use self::core::{
    CostEstimate, CostModelConfig, OptimizationConfig, OptimizationPhase, OptimizationStats,
};
pub use engine::{OptimizationOutcome, OptimizationStatus, Optimizer, RuleSet};
pub use plan::{
    GroupId, GroupNodeId, MatchNode, MatchedResult, OptContext, OptGroup, OptGroupNode, Pattern,
    RestartScope, TransformResult,
};
pub use rule_registry::RuleRegistry;
pub use rule_traits::{check_dataflow, OptRule};
pub use rules::{
    GetEdgesTransformLimitRule, GetEdgesTransformRule, MultiShortestPathToBfsRule,
    PushLimitDownProjectRule, PushLimitDownScanEdgesRule, RemoveNoopProjectRule,
};
