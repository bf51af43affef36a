//! LIMIT下推优化规则
//!
//! 这些规则负责将LIMIT操作下推到计划树的底层，以减少数据处理量

pub mod get_edges_transform;
pub mod get_edges_transform_limit;
pub mod push_limit_down_project;
pub mod push_limit_down_scan_edges;

// 导出所有规则
pub use get_edges_transform::GetEdgesTransformRule;
pub use get_edges_transform_limit::GetEdgesTransformLimitRule;
pub use push_limit_down_project::PushLimitDownProjectRule;
pub use push_limit_down_scan_edges::PushLimitDownScanEdgesRule;
