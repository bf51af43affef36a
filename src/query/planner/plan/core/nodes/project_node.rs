//! 投影节点实现

use crate::core::YieldColumn;
use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    pub struct ProjectNode {
        columns: Vec<YieldColumn>,
    }
    enum: Project
    input: SingleInputNode
}

impl ProjectNode {
    /// 输出列名取自各投影列的名称
    pub fn new(input: PlanNodeId, columns: Vec<YieldColumn>) -> Self {
        let col_names = columns.iter().map(|c| c.name()).collect();
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names,
            columns,
        }
    }

    pub fn columns(&self) -> &[YieldColumn] {
        &self.columns
    }
}

impl Explain for ProjectNode {
    fn explain(&self) -> Vec<Pair> {
        let columns: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        vec![Pair::new("columns", columns.join(", "))]
    }
}
