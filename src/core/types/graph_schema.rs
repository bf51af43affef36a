//! 图结构描述类型
//!
//! 边方向、属性选择器以及步数范围。优化器不解释属性选择器的内容，
//! 只在改写时原样复制到新节点。

use serde::{Deserialize, Serialize};
use std::fmt;

pub type GraphSpaceId = i32;
pub type TagId = i32;

/// 边类型
///
/// 负值表示以反方向遍历同一种边。
pub type EdgeType = i32;

/// 边方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EdgeDirection {
    /// 出边：从源节点指向目标节点
    #[default]
    Out,
    /// 入边：从目标节点指向源节点
    In,
    /// 双向：同时包含出边和入边
    Both,
}

impl EdgeDirection {
    /// 判断是否包含出边
    pub fn is_outgoing(&self) -> bool {
        matches!(self, EdgeDirection::Out | EdgeDirection::Both)
    }

    /// 判断是否包含入边
    pub fn is_incoming(&self) -> bool {
        matches!(self, EdgeDirection::In | EdgeDirection::Both)
    }

    /// 获取反向方向
    pub fn reverse(&self) -> Self {
        match self {
            EdgeDirection::Out => EdgeDirection::In,
            EdgeDirection::In => EdgeDirection::Out,
            EdgeDirection::Both => EdgeDirection::Both,
        }
    }
}

impl fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeDirection::Out => write!(f, "OUT_EDGE"),
            EdgeDirection::In => write!(f, "IN_EDGE"),
            EdgeDirection::Both => write!(f, "BOTH"),
        }
    }
}

/// 边属性选择器
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeProp {
    pub edge_type: EdgeType,
    pub props: Vec<String>,
}

impl EdgeProp {
    pub fn new(edge_type: EdgeType, props: Vec<String>) -> Self {
        Self { edge_type, props }
    }
}

/// 顶点属性选择器
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexProp {
    pub tag: TagId,
    pub props: Vec<String>,
}

impl VertexProp {
    pub fn new(tag: TagId, props: Vec<String>) -> Self {
        Self { tag, props }
    }
}

/// 步数范围，两端均包含
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchStepRange {
    min: u32,
    max: u32,
}

impl MatchStepRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn single(step: u32) -> Self {
        Self::new(step, step)
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// 恰好一步
    pub fn is_one_step(&self) -> bool {
        self.min == 1 && self.max == 1
    }
}

impl Default for MatchStepRange {
    fn default() -> Self {
        Self::single(1)
    }
}

impl fmt::Display for MatchStepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}
