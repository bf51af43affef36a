//! 图遍历节点实现
//!
//! Traverse 从输入的起点出发按步数范围扩展，输出列的最后两列依次是
//! 终点顶点和经过的边。

use crate::core::types::{EdgeDirection, EdgeProp, GraphSpaceId, MatchStepRange, VertexProp};
use crate::core::Expression;
use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::graph_scan_node::{expr_text, limit_text};
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    pub struct TraverseNode {
        space_id: GraphSpaceId,
        src: Expression,
        direction: EdgeDirection,
        step_range: MatchStepRange,
        vertex_props: Vec<VertexProp>,
        edge_props: Vec<EdgeProp>,
        v_filter: Option<Expression>,
        e_filter: Option<Expression>,
        filter: Option<Expression>,
        dedup: bool,
        limit: Option<i64>,
        track_prev_path: bool,
    }
    enum: Traverse
    input: SingleInputNode
}

impl TraverseNode {
    pub fn new(input: PlanNodeId, space_id: GraphSpaceId, src: Expression) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names: vec![],
            space_id,
            src,
            direction: EdgeDirection::Out,
            step_range: MatchStepRange::default(),
            vertex_props: vec![],
            edge_props: vec![],
            v_filter: None,
            e_filter: None,
            filter: None,
            dedup: false,
            limit: None,
            track_prev_path: true,
        }
    }

    pub fn space_id(&self) -> GraphSpaceId {
        self.space_id
    }

    pub fn src(&self) -> &Expression {
        &self.src
    }

    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: EdgeDirection) {
        self.direction = direction;
    }

    pub fn step_range(&self) -> MatchStepRange {
        self.step_range
    }

    pub fn set_step_range(&mut self, range: MatchStepRange) {
        self.step_range = range;
    }

    /// 恰好扩展一步
    pub fn is_one_step(&self) -> bool {
        self.step_range.is_one_step()
    }

    pub fn vertex_props(&self) -> &[VertexProp] {
        &self.vertex_props
    }

    pub fn set_vertex_props(&mut self, props: Vec<VertexProp>) {
        self.vertex_props = props;
    }

    pub fn edge_props(&self) -> &[EdgeProp] {
        &self.edge_props
    }

    pub fn set_edge_props(&mut self, props: Vec<EdgeProp>) {
        self.edge_props = props;
    }

    pub fn v_filter(&self) -> Option<&Expression> {
        self.v_filter.as_ref()
    }

    pub fn set_v_filter(&mut self, filter: Expression) {
        self.v_filter = Some(filter);
    }

    pub fn e_filter(&self) -> Option<&Expression> {
        self.e_filter.as_ref()
    }

    pub fn set_e_filter(&mut self, filter: Expression) {
        self.e_filter = Some(filter);
    }

    /// 扩展完成后对结果行的过滤
    pub fn filter(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    pub fn set_filter(&mut self, filter: Expression) {
        self.filter = Some(filter);
    }

    pub fn dedup(&self) -> bool {
        self.dedup
    }

    pub fn set_dedup(&mut self, dedup: bool) {
        self.dedup = dedup;
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn set_limit(&mut self, limit: i64) {
        self.limit = Some(limit);
    }

    pub fn track_prev_path(&self) -> bool {
        self.track_prev_path
    }

    pub fn set_track_prev_path(&mut self, track: bool) {
        self.track_prev_path = track;
    }
}

impl Explain for TraverseNode {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("space", self.space_id.to_string()),
            Pair::new("src", self.src.to_string()),
            Pair::new("edgeDirection", self.direction.to_string()),
            Pair::new("steps", self.step_range.to_string()),
            Pair::json("vertexProps", &self.vertex_props),
            Pair::json("edgeProps", &self.edge_props),
            Pair::new("vertex filter", expr_text(self.v_filter.as_ref())),
            Pair::new("edge filter", expr_text(self.e_filter.as_ref())),
            Pair::new("filter", expr_text(self.filter.as_ref())),
            Pair::new("dedup", self.dedup.to_string()),
            Pair::new("limit", limit_text(self.limit)),
            Pair::new("track prev path", self.track_prev_path.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::planner::plan::core::nodes::plan_node_traits::{PlanNode, SingleInputNode};

    #[test]
    fn test_traverse_defaults() {
        let node = TraverseNode::new(PlanNodeId::new(1), 1, Expression::input_property("v"));
        assert_eq!(node.name(), "Traverse");
        assert_eq!(node.input(), Some(PlanNodeId::new(1)));
        assert!(node.is_one_step());
        assert_eq!(node.direction(), EdgeDirection::Out);
        assert!(node.v_filter().is_none());
        assert!(node.e_filter().is_none());
    }

    #[test]
    fn test_traverse_step_range() {
        let mut node = TraverseNode::new(PlanNodeId::new(1), 1, Expression::input_property("v"));
        node.set_step_range(MatchStepRange::new(1, 3));
        assert!(!node.is_one_step());
        let pairs = node.explain();
        assert!(pairs.iter().any(|p| p.key == "steps" && p.value == "1..3"));
    }
}
