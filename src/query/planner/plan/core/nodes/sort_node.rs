//! 行数限制节点实现

use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    /// 跳过前 offset 行后最多输出 count 行
    pub struct LimitNode {
        offset: i64,
        count: i64,
    }
    enum: Limit
    input: SingleInputNode
}

impl LimitNode {
    pub fn new(input: PlanNodeId, offset: i64, count: i64) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names: vec![],
            offset,
            count,
        }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn count(&self) -> i64 {
        self.count
    }

    /// 下层至多需要产出的行数
    pub fn max_rows(&self) -> i64 {
        self.offset.saturating_add(self.count)
    }
}

impl Explain for LimitNode {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("offset", self.offset.to_string()),
            Pair::new("count", self.count.to_string()),
        ]
    }
}
