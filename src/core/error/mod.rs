//! 统一错误处理
//!
//! 错误按产生阶段划分：
//! - 计划节点构造错误（`PlanNodeError`）：构造参数非法，立即返回给规划阶段
//! - 优化错误（`OptimizeError`）：规则在应用时发现前置条件不成立，整个查询编译失败
//!
//! 迭代次数耗尽不是错误，见 `OptimizationStatus::Exhausted`。

use thiserror::Error;

pub mod optimize;
pub mod plan;

pub use optimize::{OptimizeError, OptimizeResult};
pub use plan::{PlanNodeError, PlanNodeResult};

/// 统一的错误类型
#[derive(Error, Debug, Clone)]
pub enum DBError {
    #[error("计划节点错误: {0}")]
    Plan(#[from] PlanNodeError),

    #[error("优化错误: {0}")]
    Optimize(#[from] OptimizeError),

    #[error("配置错误: {0}")]
    Config(String),
}

/// 统一结果类型
pub type DBResult<T> = Result<T, DBError>;

impl From<std::io::Error> for DBError {
    fn from(err: std::io::Error) -> Self {
        DBError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for DBError {
    fn from(err: toml::de::Error) -> Self {
        DBError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DBError {
    fn from(err: toml::ser::Error) -> Self {
        DBError::Config(err.to_string())
    }
}
