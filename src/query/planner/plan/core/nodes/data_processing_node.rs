//! 数据处理节点实现

use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    /// 去重
    pub struct DedupNode {
    }
    enum: Dedup
    input: SingleInputNode
}

impl DedupNode {
    pub fn new(input: PlanNodeId) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names: vec![],
        }
    }
}

impl Explain for DedupNode {
    fn explain(&self) -> Vec<Pair> {
        Vec::new()
    }
}
