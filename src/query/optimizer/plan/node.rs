//! 组节点定义
//!
//! 组节点包装一个具体的计划节点，记录它所属的组以及各输入所对应的组。

use std::collections::HashSet;
use std::fmt;

use super::group::GroupId;
use crate::query::planner::plan::core::PlanNodeId;

/// 组节点在优化上下文中的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupNodeId(pub(crate) usize);

impl GroupNodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct OptGroupNode {
    id: GroupNodeId,
    plan_node: PlanNodeId,
    group: GroupId,
    dependencies: Vec<GroupId>,
    explored_rules: HashSet<&'static str>,
}

impl OptGroupNode {
    pub fn new(id: GroupNodeId, plan_node: PlanNodeId, group: GroupId) -> Self {
        Self {
            id,
            plan_node,
            group,
            dependencies: Vec::new(),
            explored_rules: HashSet::new(),
        }
    }

    pub fn id(&self) -> GroupNodeId {
        self.id
    }

    pub fn plan_node(&self) -> PlanNodeId {
        self.plan_node
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn dependencies(&self) -> &[GroupId] {
        &self.dependencies
    }

    pub fn depends_on(&mut self, group: GroupId) {
        self.dependencies.push(group);
    }

    pub fn set_dependencies(&mut self, deps: Vec<GroupId>) {
        self.dependencies = deps;
    }

    pub fn is_explored(&self, rule: &str) -> bool {
        self.explored_rules.contains(rule)
    }

    pub fn set_explored(&mut self, rule: &'static str) {
        self.explored_rules.insert(rule);
    }

    /// 所有规则都需要重新尝试
    pub fn set_unexplored(&mut self) {
        self.explored_rules.clear();
    }
}
