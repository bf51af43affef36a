pub mod algorithms;
pub mod core;

pub use algorithms::*;
pub use self::core::nodes::*;
pub use self::core::{describe_plan, format_plan, PlanNodeId};
