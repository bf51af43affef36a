//! 转换规则
//!
//! 基于代价的计划转换：新方案作为同组候选加入，由代价模型在提取计划时选择

pub mod multi_shortest_path_to_bfs;

pub use multi_shortest_path_to_bfs::MultiShortestPathToBfsRule;
