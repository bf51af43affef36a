//! 核心类型
//!
//! 只包含优化器需要透传的存储层属性描述，具体语义由执行层解释。

pub mod graph_schema;

pub use graph_schema::{
    EdgeDirection, EdgeProp, EdgeType, GraphSpaceId, MatchStepRange, TagId, VertexProp,
};
