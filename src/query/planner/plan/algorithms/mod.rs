//! 算法相关的计划节点模块
//! 包含路径查找、子图和笛卡尔积等图算法的计划节点

pub mod cartesian_product;
pub mod path_algorithms;
pub mod subgraph;

// 重新导出算法节点类型
pub use cartesian_product::{BiCartesianProduct, CartesianProduct};
pub use path_algorithms::{BFSShortestPath, MultiShortestPath, ProduceAllPaths, ShortestPath};
pub use subgraph::Subgraph;
