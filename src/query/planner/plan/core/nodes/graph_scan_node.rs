//! 图扫描相关节点
//!
//! 包含 ScanVertices、ScanEdges 和 GetNeighbors。属性选择器对优化器不透明，
//! 只在改写时原样复制。

use crate::core::types::{EdgeDirection, EdgeProp, EdgeType, GraphSpaceId, VertexProp};
use crate::core::Expression;
use crate::define_plan_node;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    /// 全表扫描顶点
    pub struct ScanVerticesNode {
        space_id: GraphSpaceId,
        vertex_props: Vec<VertexProp>,
        dedup: bool,
        limit: Option<i64>,
        filter: Option<Expression>,
    }
    enum: ScanVertices
    input: ZeroInputNode
}

impl ScanVerticesNode {
    pub fn new(space_id: GraphSpaceId, vertex_props: Vec<VertexProp>) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![],
            output_var: String::new(),
            col_names: vec![],
            space_id,
            vertex_props,
            dedup: false,
            limit: None,
            filter: None,
        }
    }

    /// 扫描计划通常挂在 Start 之后
    pub fn with_input(mut self, input: PlanNodeId) -> Self {
        self.deps = vec![input];
        self
    }

    pub fn space_id(&self) -> GraphSpaceId {
        self.space_id
    }

    pub fn vertex_props(&self) -> &[VertexProp] {
        &self.vertex_props
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

    pub fn filter(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    pub fn set_filter(&mut self, filter: Expression) {
        self.filter = Some(filter);
    }
}

impl Explain for ScanVerticesNode {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("space", self.space_id.to_string()),
            Pair::json("vertexProps", &self.vertex_props),
            Pair::new("dedup", self.dedup.to_string()),
            Pair::new("limit", limit_text(self.limit)),
            Pair::new("filter", expr_text(self.filter.as_ref())),
        ]
    }
}

define_plan_node! {
    /// 全表扫描边
    pub struct ScanEdgesNode {
        space_id: GraphSpaceId,
        edge_props: Vec<EdgeProp>,
        dedup: bool,
        limit: Option<i64>,
        filter: Option<Expression>,
    }
    enum: ScanEdges
    input: ZeroInputNode
}

impl ScanEdgesNode {
    pub fn new(space_id: GraphSpaceId, edge_props: Vec<EdgeProp>) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![],
            output_var: String::new(),
            col_names: vec![],
            space_id,
            edge_props,
            dedup: false,
            limit: None,
            filter: None,
        }
    }

    pub fn with_input(mut self, input: PlanNodeId) -> Self {
        self.deps = vec![input];
        self
    }

    pub fn space_id(&self) -> GraphSpaceId {
        self.space_id
    }

    pub fn edge_props(&self) -> &[EdgeProp] {
        &self.edge_props
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

    pub fn filter(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    pub fn set_filter(&mut self, filter: Option<Expression>) {
        self.filter = filter;
    }
}

impl Explain for ScanEdgesNode {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("space", self.space_id.to_string()),
            Pair::json("edgeProps", &self.edge_props),
            Pair::new("dedup", self.dedup.to_string()),
            Pair::new("limit", limit_text(self.limit)),
            Pair::new("filter", expr_text(self.filter.as_ref())),
        ]
    }
}

define_plan_node! {
    /// 按起点获取邻居
    pub struct GetNeighborsNode {
        space_id: GraphSpaceId,
        src: Expression,
        edge_types: Vec<EdgeType>,
        direction: EdgeDirection,
        vertex_props: Vec<VertexProp>,
        edge_props: Vec<EdgeProp>,
        dedup: bool,
        limit: Option<i64>,
        filter: Option<Expression>,
    }
    enum: GetNeighbors
    input: SingleInputNode
}

impl GetNeighborsNode {
    pub fn new(input: PlanNodeId, space_id: GraphSpaceId, src: Expression) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names: vec![],
            space_id,
            src,
            edge_types: vec![],
            direction: EdgeDirection::Out,
            vertex_props: vec![],
            edge_props: vec![],
            dedup: false,
            limit: None,
            filter: None,
        }
    }

    pub fn space_id(&self) -> GraphSpaceId {
        self.space_id
    }

    pub fn src(&self) -> &Expression {
        &self.src
    }

    pub fn edge_types(&self) -> &[EdgeType] {
        &self.edge_types
    }

    pub fn set_edge_types(&mut self, edge_types: Vec<EdgeType>) {
        self.edge_types = edge_types;
    }

    pub fn direction(&self) -> EdgeDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: EdgeDirection) {
        self.direction = direction;
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

    pub fn filter(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    pub fn set_filter(&mut self, filter: Expression) {
        self.filter = Some(filter);
    }
}

impl Explain for GetNeighborsNode {
    fn explain(&self) -> Vec<Pair> {
        vec![
            Pair::new("space", self.space_id.to_string()),
            Pair::new("src", self.src.to_string()),
            Pair::json("edgeTypes", &self.edge_types),
            Pair::new("edgeDirection", self.direction.to_string()),
            Pair::json("vertexProps", &self.vertex_props),
            Pair::json("edgeProps", &self.edge_props),
            Pair::new("dedup", self.dedup.to_string()),
            Pair::new("limit", limit_text(self.limit)),
            Pair::new("filter", expr_text(self.filter.as_ref())),
        ]
    }
}

pub(crate) fn limit_text(limit: Option<i64>) -> String {
    limit.map(|l| l.to_string()).unwrap_or_else(|| "-1".to_string())
}

pub(crate) fn expr_text(expr: Option<&Expression>) -> String {
    expr.map(|e| e.to_string()).unwrap_or_default()
}
