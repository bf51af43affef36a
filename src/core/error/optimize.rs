//! 优化器错误类型
//!
//! 规则匹配失败不是错误，只影响控制流；规则在 transform 阶段失败则整个查询编译失败，
//! 错误中带上规则名与被匹配子树的描述以便排查。

use thiserror::Error;

use super::plan::PlanNodeError;

/// 优化器错误类型
#[derive(Error, Debug, Clone)]
pub enum OptimizeError {
    /// 规则应用错误
    #[error("规则 {rule} 应用失败: {reason}\n子树:\n{subtree}")]
    RuleApplication {
        rule: String,
        reason: String,
        subtree: String,
    },

    /// 计划结构非法
    #[error("计划结构非法: {0}")]
    InvalidPlanStructure(String),

    /// 计划中存在环
    #[error("计划中检测到环, 节点: {0}")]
    CycleDetected(usize),

    /// 组不存在
    #[error("组不存在: {0}")]
    GroupNotFound(usize),

    /// 组节点不存在
    #[error("组节点不存在: {0}")]
    GroupNodeNotFound(usize),

    /// 计划节点不存在
    #[error("计划节点不存在: {0}")]
    NodeNotFound(i64),

    /// 同名规则重复注册
    #[error("规则重复注册: {0}")]
    DuplicateRule(String),

    /// 构造新节点失败
    #[error("构造计划节点失败: {0}")]
    Construction(#[from] PlanNodeError),
}

impl OptimizeError {
    pub fn invalid_plan(msg: impl Into<String>) -> Self {
        OptimizeError::InvalidPlanStructure(msg.into())
    }

    /// 规则在 transform 内部发现的前置条件不成立
    ///
    /// 子树描述由优化引擎在向外传播时补全。
    pub fn precondition(msg: impl Into<String>) -> Self {
        OptimizeError::InvalidPlanStructure(msg.into())
    }

    pub fn rule_application(
        rule: impl Into<String>,
        reason: impl Into<String>,
        subtree: impl Into<String>,
    ) -> Self {
        OptimizeError::RuleApplication {
            rule: rule.into(),
            reason: reason.into(),
            subtree: subtree.into(),
        }
    }
}

/// 优化器结果类型
pub type OptimizeResult<T> = Result<T, OptimizeError>;
