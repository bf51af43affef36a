//! GraphDB 查询优化器
//!
//! 提供查询规划阶段的后半部分：
//! - 图遍历相关的计划节点模型，节点统一存放在查询上下文的对象池中
//! - 基于规则与代价的计划优化框架及内置规则
//! - 配置、日志等公共设施

pub mod config;
pub mod core;
pub mod query;
pub mod utils;
