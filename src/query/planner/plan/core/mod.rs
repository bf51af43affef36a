//! 计划节点核心：节点标识、节点定义与计划描述

pub mod explain;
pub mod node_id;
pub mod nodes;

pub use explain::{describe_plan, format_plan, Pair, PlanDescription, PlanNodeDescription};
pub use node_id::PlanNodeId;
pub use nodes::{PlanNodeEnum, PlanNodeKind};
