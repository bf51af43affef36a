//! 起始节点实现
//!
//! StartNode 用于表示执行计划的起始点

use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    pub struct StartNode {
    }
    enum: Start
    input: ZeroInputNode
}

impl StartNode {
    pub fn new() -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![],
            output_var: String::new(),
            col_names: vec![],
        }
    }
}

impl Default for StartNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Explain for StartNode {
    fn explain(&self) -> Vec<Pair> {
        Vec::new()
    }
}
