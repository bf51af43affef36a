//! 路径查找算法相关的计划节点
//! 包含最短路径、所有路径等算法相关的计划节点
//!
//! 双输入的路径节点左输入为起点集合，右输入为终点集合，
//! 双向广度优先扩展时左右两侧的当前顶点集合分别暂存在 `left_vid_var` 与 `right_vid_var` 中。

use crate::core::types::{EdgeDirection, EdgeProp, GraphSpaceId, MatchStepRange, VertexProp};
use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

fn path_col_names() -> Vec<String> {
    vec!["path".to_string()]
}

define_plan_node! {
    /// 多源最短路径计划节点
    pub struct MultiShortestPath {
        steps: usize,
        left_vid_var: String,
        right_vid_var: String,
        termination_var: String,
    }
    enum: MultiShortestPath
    input: BinaryInputNode
}

impl MultiShortestPath {
    pub fn new(left: PlanNodeId, right: PlanNodeId, steps: usize) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![left, right],
            output_var: String::new(),
            col_names: path_col_names(),
            steps,
            left_vid_var: String::new(),
            right_vid_var: String::new(),
            termination_var: String::new(),
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn left_vid_var(&self) -> &str {
        &self.left_vid_var
    }

    pub fn right_vid_var(&self) -> &str {
        &self.right_vid_var
    }

    /// 左右两侧扩展相遇时写入的终止标记变量
    pub fn termination_var(&self) -> &str {
        &self.termination_var
    }

    pub fn set_left_vid_var(&mut self, var: &str) {
        self.left_vid_var = var.to_string();
    }

    pub fn set_right_vid_var(&mut self, var: &str) {
        self.right_vid_var = var.to_string();
    }

    pub fn set_termination_var(&mut self, var: &str) {
        self.termination_var = var.to_string();
    }
}

impl Explain for MultiShortestPath {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("steps", self.steps.to_string()),
            Pair::new("leftVidVar", self.left_vid_var.clone()),
            Pair::new("rightVidVar", self.right_vid_var.clone()),
            Pair::new("terminationVar", self.termination_var.clone()),
        ]
    }
}

define_plan_node! {
    /// 广度优先最短路径计划节点
    pub struct BFSShortestPath {
        steps: usize,
        left_vid_var: String,
        right_vid_var: String,
    }
    enum: BFSShortestPath
    input: BinaryInputNode
}

impl BFSShortestPath {
    pub fn new(left: PlanNodeId, right: PlanNodeId, steps: usize) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![left, right],
            output_var: String::new(),
            col_names: path_col_names(),
            steps,
            left_vid_var: String::new(),
            right_vid_var: String::new(),
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn left_vid_var(&self) -> &str {
        &self.left_vid_var
    }

    pub fn right_vid_var(&self) -> &str {
        &self.right_vid_var
    }

    pub fn set_left_vid_var(&mut self, var: &str) {
        self.left_vid_var = var.to_string();
    }

    pub fn set_right_vid_var(&mut self, var: &str) {
        self.right_vid_var = var.to_string();
    }
}

impl Explain for BFSShortestPath {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("steps", self.steps.to_string()),
            Pair::new("leftVidVar", self.left_vid_var.clone()),
            Pair::new("rightVidVar", self.right_vid_var.clone()),
        ]
    }
}

define_plan_node! {
    /// 所有路径计划节点
    ///
    /// `no_loop` 为真时只产出简单路径，重复经过同一顶点的路径由执行层丢弃。
    pub struct ProduceAllPaths {
        steps: usize,
        no_loop: bool,
        left_vid_var: String,
        right_vid_var: String,
    }
    enum: ProduceAllPaths
    input: BinaryInputNode
}

impl ProduceAllPaths {
    pub fn new(left: PlanNodeId, right: PlanNodeId, steps: usize, no_loop: bool) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![left, right],
            output_var: String::new(),
            col_names: path_col_names(),
            steps,
            no_loop,
            left_vid_var: String::new(),
            right_vid_var: String::new(),
        }
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn no_loop(&self) -> bool {
        self.no_loop
    }

    pub fn left_vid_var(&self) -> &str {
        &self.left_vid_var
    }

    pub fn right_vid_var(&self) -> &str {
        &self.right_vid_var
    }

    pub fn set_left_vid_var(&mut self, var: &str) {
        self.left_vid_var = var.to_string();
    }

    pub fn set_right_vid_var(&mut self, var: &str) {
        self.right_vid_var = var.to_string();
    }
}

impl Explain for ProduceAllPaths {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("steps", self.steps.to_string()),
            Pair::new("noLoop", self.no_loop.to_string()),
            Pair::new("leftVidVar", self.left_vid_var.clone()),
            Pair::new("rightVidVar", self.right_vid_var.clone()),
        ]
    }
}

define_plan_node! {
    /// 最短路径计划节点
    ///
    /// 方向为双向时需要从路径两端同时扩展，此时反向扩展使用 `reverse_edge_props`。
    pub struct ShortestPath {
        space_id: GraphSpaceId,
        single_shortest: bool,
        step_range: MatchStepRange,
        edge_direction: EdgeDirection,
        edge_props: Option<Vec<EdgeProp>>,
        reverse_edge_props: Option<Vec<EdgeProp>>,
        vertex_props: Option<Vec<VertexProp>>,
    }
    enum: ShortestPath
    input: SingleInputNode
}

impl ShortestPath {
    pub fn new(input: PlanNodeId, space_id: GraphSpaceId, single_shortest: bool) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names: path_col_names(),
            space_id,
            single_shortest,
            step_range: MatchStepRange::default(),
            edge_direction: EdgeDirection::Out,
            edge_props: None,
            reverse_edge_props: None,
            vertex_props: None,
        }
    }

    pub fn space_id(&self) -> GraphSpaceId {
        self.space_id
    }

    /// 只求一条最短路径，否则求所有最短路径
    pub fn single_shortest(&self) -> bool {
        self.single_shortest
    }

    pub fn step_range(&self) -> MatchStepRange {
        self.step_range
    }

    pub fn set_step_range(&mut self, range: MatchStepRange) {
        self.step_range = range;
    }

    pub fn edge_direction(&self) -> EdgeDirection {
        self.edge_direction
    }

    pub fn set_edge_direction(&mut self, direction: EdgeDirection) {
        self.edge_direction = direction;
    }

    pub fn edge_props(&self) -> Option<&[EdgeProp]> {
        self.edge_props.as_deref()
    }

    pub fn set_edge_props(&mut self, props: Vec<EdgeProp>) {
        self.edge_props = Some(props);
    }

    pub fn reverse_edge_props(&self) -> Option<&[EdgeProp]> {
        self.reverse_edge_props.as_deref()
    }

    pub fn set_reverse_edge_props(&mut self, props: Vec<EdgeProp>) {
        self.reverse_edge_props = Some(props);
    }

    pub fn vertex_props(&self) -> Option<&[VertexProp]> {
        self.vertex_props.as_deref()
    }

    pub fn set_vertex_props(&mut self, props: Vec<VertexProp>) {
        self.vertex_props = Some(props);
    }

    /// 双向扩展时正反两组边属性都必须给出
    pub fn has_required_edge_props(&self) -> bool {
        match self.edge_direction {
            EdgeDirection::Both => self.edge_props.is_some() && self.reverse_edge_props.is_some(),
            _ => self.edge_props.is_some(),
        }
    }
}

impl Explain for ShortestPath {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("space", self.space_id.to_string()),
            Pair::new("singleShortest", self.single_shortest.to_string()),
            Pair::new("steps", self.step_range.to_string()),
            Pair::new("edgeDirection", self.edge_direction.to_string()),
            Pair::json("vertexProps", &self.vertex_props),
            Pair::json("edgeProps", &self.edge_props),
            Pair::json("reverseEdgeProps", &self.reverse_edge_props),
        ]
    }
}
