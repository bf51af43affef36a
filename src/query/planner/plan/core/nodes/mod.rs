pub mod data_processing_node;
pub mod filter_node;
pub mod graph_scan_node;
pub mod macros;
pub mod plan_node_enum;
pub mod plan_node_traits;
pub mod project_node;
pub mod sort_node;
pub mod start_node;
pub mod traversal_node;

pub use data_processing_node::DedupNode;
pub use filter_node::FilterNode;
pub use graph_scan_node::{GetNeighborsNode, ScanEdgesNode, ScanVerticesNode};
pub use plan_node_enum::{NodeArity, PlanNodeEnum, PlanNodeKind};
pub use plan_node_traits::*;
pub use project_node::ProjectNode;
pub use sort_node::LimitNode;
pub use start_node::StartNode;
pub use traversal_node::TraverseNode;
