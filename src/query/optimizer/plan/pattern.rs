//! 规则的结构模式
//!
//! 模式是一棵树：根节点类型加上每个期望依赖的子模式。
//! 没有子模式的模式不约束被匹配节点的依赖。

use super::context::OptContext;
use super::group::GroupId;
use super::node::GroupNodeId;
use super::result::MatchedResult;
use crate::query::planner::plan::core::PlanNodeKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchNode {
    Single(PlanNodeKind),
    Multi(Vec<PlanNodeKind>),
    /// 匹配任意类型
    Any,
}

impl MatchNode {
    pub fn matches(&self, kind: PlanNodeKind) -> bool {
        match self {
            MatchNode::Single(k) => *k == kind,
            MatchNode::Multi(kinds) => kinds.contains(&kind),
            MatchNode::Any => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    node: MatchNode,
    dependencies: Vec<Pattern>,
}

impl Pattern {
    pub fn create(kind: PlanNodeKind) -> Self {
        Self {
            node: MatchNode::Single(kind),
            dependencies: Vec::new(),
        }
    }

    pub fn create_multi(kinds: Vec<PlanNodeKind>) -> Self {
        Self {
            node: MatchNode::Multi(kinds),
            dependencies: Vec::new(),
        }
    }

    pub fn any() -> Self {
        Self {
            node: MatchNode::Any,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, dependency: Pattern) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn node(&self) -> &MatchNode {
        &self.node
    }

    pub fn dependencies(&self) -> &[Pattern] {
        &self.dependencies
    }

    /// 以指定组节点为根尝试匹配
    pub fn match_node(&self, ctx: &OptContext<'_>, node: GroupNodeId) -> Option<MatchedResult> {
        let group_node = ctx.group_node(node).ok()?;
        let plan_node = ctx.qctx().node(group_node.plan_node())?;
        if !self.node.matches(plan_node.kind()) {
            return None;
        }

        let mut result = MatchedResult::new(node, group_node.plan_node());
        if self.dependencies.is_empty() {
            return Some(result);
        }
        if self.dependencies.len() != group_node.dependencies().len() {
            return None;
        }

        for (pattern, group) in self.dependencies.iter().zip(group_node.dependencies()) {
            result.dependencies.push(pattern.match_group(ctx, *group)?);
        }
        Some(result)
    }

    /// 组内第一个满足模式的节点
    pub fn match_group(&self, ctx: &OptContext<'_>, group: GroupId) -> Option<MatchedResult> {
        let group = ctx.group(group).ok()?;
        group
            .nodes()
            .iter()
            .find_map(|node| self.match_node(ctx, *node))
    }
}
