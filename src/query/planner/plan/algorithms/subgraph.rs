//! 子图计划节点

use std::collections::BTreeSet;

use crate::core::types::EdgeType;
use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    /// 收集指定步数内可达的顶点和边
    ///
    /// 结果写入 `result_var`，当前步数保存在 `current_step_var`。
    /// `bi_direct_edge_types` 中的边类型无论声明方向如何都按双向遍历。
    pub struct Subgraph {
        result_var: String,
        current_step_var: String,
        steps: u32,
        bi_direct_edge_types: BTreeSet<EdgeType>,
    }
    enum: Subgraph
    input: SingleInputNode
}

impl Subgraph {
    pub fn new(input: PlanNodeId, result_var: &str, current_step_var: &str, steps: u32) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names: vec![],
            result_var: result_var.to_string(),
            current_step_var: current_step_var.to_string(),
            steps,
            bi_direct_edge_types: BTreeSet::new(),
        }
    }

    pub fn result_var(&self) -> &str {
        &self.result_var
    }

    pub fn current_step_var(&self) -> &str {
        &self.current_step_var
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn bi_direct_edge_types(&self) -> &BTreeSet<EdgeType> {
        &self.bi_direct_edge_types
    }

    /// 整体替换，不与已有集合合并
    pub fn set_bi_direct_edge_types(&mut self, edge_types: BTreeSet<EdgeType>) {
        self.bi_direct_edge_types = edge_types;
    }
}

impl Explain for Subgraph {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("resultVar", self.result_var.clone()),
            Pair::new("currentStepVar", self.current_step_var.clone()),
            Pair::new("steps", self.steps.to_string()),
            Pair::json("biDirectEdgeTypes", &self.bi_direct_edge_types),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subgraph_steps() {
        let node = Subgraph::new(PlanNodeId::new(0), "result", "step", 4);
        assert_eq!(node.steps(), 4);
        assert_eq!(node.result_var(), "result");
        assert_eq!(node.current_step_var(), "step");
        assert!(node.bi_direct_edge_types().is_empty());
    }

    #[test]
    fn test_set_bi_direct_edge_types_replaces() {
        let mut node = Subgraph::new(PlanNodeId::new(0), "result", "step", 2);
        node.set_bi_direct_edge_types([1, 2].into_iter().collect());
        node.set_bi_direct_edge_types([3].into_iter().collect());

        let expected: BTreeSet<EdgeType> = [3].into_iter().collect();
        assert_eq!(node.bi_direct_edge_types(), &expected);
    }
}
