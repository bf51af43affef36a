//! 规划器模块
//!
//! 只包含计划节点模型，由规划阶段构造、由优化器改写。

pub mod plan;
