//! 自定义断言辅助模块
//!
//! 提供测试中的常用断言函数

use graphdb_optimizer::query::optimizer::{OptimizationOutcome, OptimizationStatus};

/// 断言结果成功，返回内部值
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    result.expect("操作应该成功")
}

/// 断言结果失败并匹配错误消息
pub fn assert_err_with<T: std::fmt::Debug, E: std::fmt::Display>(result: Result<T, E>, expected_msg: &str) {
    let err = result.expect_err("操作应该失败");
    let err_str = err.to_string();
    assert!(
        err_str.contains(expected_msg),
        "错误消息应包含 '{}', 实际是 '{}'",
        expected_msg,
        err_str
    );
}

/// 断言优化收敛
pub fn assert_converged(outcome: &OptimizationOutcome) {
    assert_eq!(
        outcome.status,
        OptimizationStatus::Converged,
        "优化应当收敛, 实际 {:?}",
        outcome.stats
    );
}

/// 断言一次优化没有产生任何改写
pub fn assert_unchanged(outcome: &OptimizationOutcome) {
    assert_converged(outcome);
    assert_eq!(outcome.stats.transforms_applied, 0, "不应有改写: {:?}", outcome.stats);
    assert_eq!(outcome.stats.passes, 1);
}
