//! 过滤节点实现

use crate::core::Expression;
use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    pub struct FilterNode {
        condition: Expression,
    }
    enum: Filter
    input: SingleInputNode
}

impl FilterNode {
    pub fn new(input: PlanNodeId, condition: Expression) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names: vec![],
            condition,
        }
    }

    pub fn condition(&self) -> &Expression {
        &self.condition
    }
}

impl Explain for FilterNode {
    fn explain(&self) -> Vec<Pair> {
        vec![Pair::new("condition", self.condition.to_string())]
    }
}
