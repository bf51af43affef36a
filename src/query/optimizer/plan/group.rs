//! 优化组定义
//!
//! 一个组是同一逻辑意图下可互换的候选方案集合。规则改写只替换组内的成员，
//! 组本身的标识保持不变，其他组通过 `GroupId` 对它的引用在改写后依然有效。

use std::fmt;

use super::node::GroupNodeId;

/// 组在优化上下文中的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct OptGroup {
    id: GroupId,
    nodes: Vec<GroupNodeId>,
}

impl OptGroup {
    pub fn new(id: GroupId) -> Self {
        Self {
            id,
            nodes: Vec::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// 当前有效的候选节点，按加入顺序排列
    pub fn nodes(&self) -> &[GroupNodeId] {
        &self.nodes
    }

    pub fn add_node(&mut self, node: GroupNodeId) {
        if !self.nodes.contains(&node) {
            self.nodes.push(node);
        }
    }

    pub fn remove_node(&mut self, node: GroupNodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| *n != node);
        self.nodes.len() != before
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn contains(&self, node: GroupNodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_membership() {
        let mut group = OptGroup::new(GroupId(0));
        group.add_node(GroupNodeId(1));
        group.add_node(GroupNodeId(2));
        group.add_node(GroupNodeId(1));
        assert_eq!(group.nodes(), &[GroupNodeId(1), GroupNodeId(2)]);

        assert!(group.remove_node(GroupNodeId(1)));
        assert!(!group.remove_node(GroupNodeId(1)));
        assert!(group.contains(GroupNodeId(2)));

        group.clear();
        assert!(group.is_empty());
        assert_eq!(group.id().to_string(), "G0");
    }
}
