//! 规则匹配与改写的结果类型

use super::node::GroupNodeId;
use crate::query::planner::plan::core::PlanNodeId;

/// 模式匹配结果
///
/// 与模式同构：根节点加上每个依赖模式各自的匹配结果。只读，不修改计划。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedResult {
    pub node: GroupNodeId,
    pub plan_node: PlanNodeId,
    pub dependencies: Vec<MatchedResult>,
}

impl MatchedResult {
    pub fn new(node: GroupNodeId, plan_node: PlanNodeId) -> Self {
        Self {
            node,
            plan_node,
            dependencies: Vec::new(),
        }
    }

    /// 按下标路径取子匹配结果，空路径返回自身
    ///
    /// 例如 `{0, 1}` 表示根节点第一个依赖的第二个依赖。
    pub fn result(&self, path: &[usize]) -> Option<&MatchedResult> {
        path.iter()
            .try_fold(self, |current, idx| current.dependencies.get(*idx))
    }

    /// 按下标路径取计划节点
    pub fn plan_node_at(&self, path: &[usize]) -> Option<PlanNodeId> {
        self.result(path).map(|r| r.plan_node)
    }

    /// 按前序遍历收集所有匹配到的组节点
    pub fn collect_group_nodes(&self) -> Vec<GroupNodeId> {
        let mut nodes = vec![self.node];
        for dep in &self.dependencies {
            nodes.extend(dep.collect_group_nodes());
        }
        nodes
    }
}

/// 改写后重新探索的范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartScope {
    /// 只重新探索被改写的组及其祖先组
    #[default]
    Local,
    /// 重新探索整个计划
    Global,
}

/// 规则改写结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformResult {
    /// 从组中移除被匹配的根节点
    pub erase_curr: bool,
    /// 清空被匹配根节点所在的组
    pub erase_all: bool,
    /// 加入被匹配根节点所在组的新节点
    pub new_group_nodes: Vec<GroupNodeId>,
    pub restart: RestartScope,
}

impl TransformResult {
    /// 前置条件在改写时才发现不满足，不做任何改变
    pub fn no_transform() -> Self {
        Self::default()
    }

    /// 用新节点替换被匹配的根节点
    pub fn replace(node: GroupNodeId) -> Self {
        Self {
            erase_curr: true,
            new_group_nodes: vec![node],
            ..Self::default()
        }
    }

    /// 保留被匹配的根节点，新增一个候选节点
    pub fn alternative(node: GroupNodeId) -> Self {
        Self {
            new_group_nodes: vec![node],
            ..Self::default()
        }
    }

    pub fn with_restart(mut self, restart: RestartScope) -> Self {
        self.restart = restart;
        self
    }

    pub fn is_no_transform(&self) -> bool {
        !self.erase_curr && !self.erase_all && self.new_group_nodes.is_empty()
    }
}
