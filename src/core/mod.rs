//! 核心模块：错误类型、表达式与图结构描述

pub mod error;
pub mod expression;
pub mod types;

pub use error::{DBError, DBResult, OptimizeError, OptimizeResult, PlanNodeError, PlanNodeResult};
pub use expression::{BinaryOperator, Expression, Literal, YieldColumn};
