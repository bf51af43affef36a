//! PlanNode 枚举定义
//!
//! 所有节点类型组成一个封闭的枚举，解释、复制等操作通过穷尽匹配分发，
//! 新增节点类型时编译器会检查所有分发点。

use std::fmt;

use super::plan_node_traits::{Explain, PlanNode};
use crate::query::planner::plan::core::explain::PlanNodeDescription;
use crate::query::planner::plan::core::node_id::PlanNodeId;

// 导入并重新导出所有具体的节点类型
pub use super::data_processing_node::DedupNode;
pub use super::filter_node::FilterNode;
pub use super::graph_scan_node::{GetNeighborsNode, ScanEdgesNode, ScanVerticesNode};
pub use super::project_node::ProjectNode;
pub use super::sort_node::LimitNode;
pub use super::start_node::StartNode;
pub use super::traversal_node::TraverseNode;
pub use crate::query::planner::plan::algorithms::{
    BFSShortestPath, BiCartesianProduct, CartesianProduct, MultiShortestPath, ProduceAllPaths,
    ShortestPath, Subgraph,
};

/// 节点的输入个数分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeArity {
    /// 数据源
    Zero,
    Single,
    Binary,
}

/// 节点类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlanNodeKind {
    Start,
    ScanVertices,
    ScanEdges,
    GetNeighbors,
    Traverse,
    Filter,
    Project,
    Limit,
    Dedup,
    ShortestPath,
    MultiShortestPath,
    BFSShortestPath,
    ProduceAllPaths,
    Subgraph,
    CartesianProduct,
    BiCartesianProduct,
}

impl PlanNodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            PlanNodeKind::Start => "Start",
            PlanNodeKind::ScanVertices => "ScanVertices",
            PlanNodeKind::ScanEdges => "ScanEdges",
            PlanNodeKind::GetNeighbors => "GetNeighbors",
            PlanNodeKind::Traverse => "Traverse",
            PlanNodeKind::Filter => "Filter",
            PlanNodeKind::Project => "Project",
            PlanNodeKind::Limit => "Limit",
            PlanNodeKind::Dedup => "Dedup",
            PlanNodeKind::ShortestPath => "ShortestPath",
            PlanNodeKind::MultiShortestPath => "MultiShortestPath",
            PlanNodeKind::BFSShortestPath => "BFSShortestPath",
            PlanNodeKind::ProduceAllPaths => "ProduceAllPaths",
            PlanNodeKind::Subgraph => "Subgraph",
            PlanNodeKind::CartesianProduct => "CartesianProduct",
            PlanNodeKind::BiCartesianProduct => "BiCartesianProduct",
        }
    }

    /// 扫描节点可以挂在 Start 之后，因此不是严格的零输入
    pub fn arity(&self) -> NodeArity {
        match self {
            PlanNodeKind::Start | PlanNodeKind::ScanVertices | PlanNodeKind::ScanEdges => {
                NodeArity::Zero
            }
            PlanNodeKind::MultiShortestPath
            | PlanNodeKind::BFSShortestPath
            | PlanNodeKind::ProduceAllPaths
            | PlanNodeKind::BiCartesianProduct => NodeArity::Binary,
            _ => NodeArity::Single,
        }
    }

    /// 输出列与输入列相同的节点
    pub fn passes_through_columns(&self) -> bool {
        matches!(
            self,
            PlanNodeKind::Filter | PlanNodeKind::Limit | PlanNodeKind::Dedup
        )
    }
}

impl fmt::Display for PlanNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// PlanNode 枚举，包含所有可能的节点类型
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNodeEnum {
    /// 起始节点
    Start(StartNode),
    /// 扫描顶点节点
    ScanVertices(ScanVerticesNode),
    /// 扫描边节点
    ScanEdges(ScanEdgesNode),
    /// 获取邻居节点
    GetNeighbors(GetNeighborsNode),
    /// 遍历节点
    Traverse(TraverseNode),
    /// 过滤节点
    Filter(FilterNode),
    /// 投影节点
    Project(ProjectNode),
    /// 限制节点
    Limit(LimitNode),
    /// 去重节点
    Dedup(DedupNode),
    /// 最短路径节点
    ShortestPath(ShortestPath),
    /// 多源最短路径节点
    MultiShortestPath(MultiShortestPath),
    /// BFS最短路径节点
    BFSShortestPath(BFSShortestPath),
    /// 所有路径节点
    ProduceAllPaths(ProduceAllPaths),
    /// 子图节点
    Subgraph(Subgraph),
    /// 笛卡尔积节点
    CartesianProduct(CartesianProduct),
    /// 双输入笛卡尔积节点
    BiCartesianProduct(BiCartesianProduct),
}

macro_rules! dispatch {
    ($self:expr, $node:ident => $body:expr) => {
        match $self {
            PlanNodeEnum::Start($node) => $body,
            PlanNodeEnum::ScanVertices($node) => $body,
            PlanNodeEnum::ScanEdges($node) => $body,
            PlanNodeEnum::GetNeighbors($node) => $body,
            PlanNodeEnum::Traverse($node) => $body,
            PlanNodeEnum::Filter($node) => $body,
            PlanNodeEnum::Project($node) => $body,
            PlanNodeEnum::Limit($node) => $body,
            PlanNodeEnum::Dedup($node) => $body,
            PlanNodeEnum::ShortestPath($node) => $body,
            PlanNodeEnum::MultiShortestPath($node) => $body,
            PlanNodeEnum::BFSShortestPath($node) => $body,
            PlanNodeEnum::ProduceAllPaths($node) => $body,
            PlanNodeEnum::Subgraph($node) => $body,
            PlanNodeEnum::CartesianProduct($node) => $body,
            PlanNodeEnum::BiCartesianProduct($node) => $body,
        }
    };
}

macro_rules! downcast {
    ($($as_fn:ident, $as_mut_fn:ident => $variant:ident($ty:ty);)*) => {
        $(
            pub fn $as_fn(&self) -> Option<&$ty> {
                match self {
                    PlanNodeEnum::$variant(node) => Some(node),
                    _ => None,
                }
            }

            pub fn $as_mut_fn(&mut self) -> Option<&mut $ty> {
                match self {
                    PlanNodeEnum::$variant(node) => Some(node),
                    _ => None,
                }
            }
        )*
    };
}

impl PlanNodeEnum {
    pub fn id(&self) -> PlanNodeId {
        dispatch!(self, n => n.id())
    }

    pub fn set_id(&mut self, id: PlanNodeId) {
        dispatch!(self, n => n.set_id(id))
    }

    pub fn kind(&self) -> PlanNodeKind {
        dispatch!(self, n => n.kind())
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn dependencies(&self) -> &[PlanNodeId] {
        dispatch!(self, n => n.dependencies())
    }

    pub fn set_dependencies(&mut self, deps: Vec<PlanNodeId>) {
        dispatch!(self, n => n.set_dependencies(deps))
    }

    pub fn output_var(&self) -> &str {
        dispatch!(self, n => n.output_var())
    }

    pub fn set_output_var(&mut self, var: String) {
        dispatch!(self, n => n.set_output_var(var))
    }

    pub fn col_names(&self) -> &[String] {
        dispatch!(self, n => n.col_names())
    }

    pub fn set_col_names(&mut self, names: Vec<String>) {
        dispatch!(self, n => n.set_col_names(names))
    }

    /// 节点自身的描述，依赖只给出ID
    pub fn explain(&self) -> PlanNodeDescription {
        let pairs = dispatch!(self, n => n.explain());
        let mut desc = PlanNodeDescription::new(self.name(), self.id().value())
            .with_output_var(self.output_var())
            .with_dependencies(self.dependencies().iter().map(|d| d.value()).collect());
        desc.add_description("colNames", self.col_names().join(","));
        for pair in pairs {
            desc.add_description(pair.key, pair.value);
        }
        desc
    }

    downcast! {
        as_start, as_start_mut => Start(StartNode);
        as_scan_vertices, as_scan_vertices_mut => ScanVertices(ScanVerticesNode);
        as_scan_edges, as_scan_edges_mut => ScanEdges(ScanEdgesNode);
        as_get_neighbors, as_get_neighbors_mut => GetNeighbors(GetNeighborsNode);
        as_traverse, as_traverse_mut => Traverse(TraverseNode);
        as_filter, as_filter_mut => Filter(FilterNode);
        as_project, as_project_mut => Project(ProjectNode);
        as_limit, as_limit_mut => Limit(LimitNode);
        as_dedup, as_dedup_mut => Dedup(DedupNode);
        as_shortest_path, as_shortest_path_mut => ShortestPath(ShortestPath);
        as_multi_shortest_path, as_multi_shortest_path_mut => MultiShortestPath(MultiShortestPath);
        as_bfs_shortest_path, as_bfs_shortest_path_mut => BFSShortestPath(BFSShortestPath);
        as_produce_all_paths, as_produce_all_paths_mut => ProduceAllPaths(ProduceAllPaths);
        as_subgraph, as_subgraph_mut => Subgraph(Subgraph);
        as_cartesian_product, as_cartesian_product_mut => CartesianProduct(CartesianProduct);
        as_bi_cartesian_product, as_bi_cartesian_product_mut => BiCartesianProduct(BiCartesianProduct);
    }
}
