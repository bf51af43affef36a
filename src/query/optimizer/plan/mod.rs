//! 优化期间的计划表示
//! 提供组、组节点、模式与规则结果等数据结构

pub mod context;
pub mod group;
pub mod node;
pub mod pattern;
pub mod result;

pub use context::OptContext;
pub use group::{GroupId, OptGroup};
pub use node::{GroupNodeId, OptGroupNode};
pub use pattern::{MatchNode, Pattern};
pub use result::{MatchedResult, RestartScope, TransformResult};
