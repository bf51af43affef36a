//! 计划节点构造错误

use thiserror::Error;

/// 计划节点构造错误
///
/// 仅在构造参数本身非法时返回，例如向笛卡尔积节点添加重复的输入变量。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanNodeError {
    /// 变量名为空
    #[error("非法参数: 变量名不能为空")]
    EmptyVariable,

    /// 变量重复添加
    #[error("非法参数: 变量 `{0}' 重复")]
    DuplicateVariable(String),

    /// 符号表中不存在该变量
    #[error("非法参数: 变量 `{0}' 不存在")]
    UnknownVariable(String),

    /// 其他非法参数
    #[error("非法参数: {0}")]
    InvalidArgument(String),
}

impl PlanNodeError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        PlanNodeError::InvalidArgument(msg.into())
    }
}

pub type PlanNodeResult<T> = Result<T, PlanNodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_node_error_display() {
        let err = PlanNodeError::DuplicateVariable("a".to_string());
        assert_eq!(err.to_string(), "非法参数: 变量 `a' 重复");

        let err = PlanNodeError::invalid_argument("步数越界");
        assert!(err.to_string().contains("步数越界"));
    }
}
