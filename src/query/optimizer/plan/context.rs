//! 优化上下文
//!
//! `OptContext` 在一次优化期间持有组与组节点的备忘表（memo）：
//! - 组和组节点都存放在各自的向量中，通过 `GroupId`/`GroupNodeId` 引用，
//!   组节点之间的依赖记录为组而不是具体节点
//! - 计划节点本身仍由 `QueryContext` 的对象池所有，改写规则通过它创建新节点
//! - 被共享的子计划只转换一次，对应同一个组
//!
//! 优化结束后由 `extract_plan` 按代价在每个组中选出一个节点，重新连接成计划树。

use std::collections::{BTreeSet, HashMap, HashSet};

use super::group::{GroupId, OptGroup};
use super::node::{GroupNodeId, OptGroupNode};
use crate::core::error::{OptimizeError, OptimizeResult};
use crate::query::optimizer::core::cost::{estimate, CostEstimate, CostModelConfig};
use crate::query::planner::plan::core::{PlanNodeEnum, PlanNodeId};
use crate::query::query_context::QueryContext;

use super::result::RestartScope;

pub struct OptContext<'a> {
    qctx: &'a mut QueryContext,
    cost_config: CostModelConfig,
    groups: Vec<OptGroup>,
    group_nodes: Vec<OptGroupNode>,
    root: Option<GroupId>,
    plan_to_group: HashMap<PlanNodeId, GroupId>,
}

impl<'a> OptContext<'a> {
    pub fn new(qctx: &'a mut QueryContext, cost_config: CostModelConfig) -> Self {
        Self {
            qctx,
            cost_config,
            groups: Vec::new(),
            group_nodes: Vec::new(),
            root: None,
            plan_to_group: HashMap::new(),
        }
    }

    pub fn qctx(&self) -> &QueryContext {
        self.qctx
    }

    pub fn qctx_mut(&mut self) -> &mut QueryContext {
        self.qctx
    }

    pub fn cost_config(&self) -> &CostModelConfig {
        &self.cost_config
    }

    pub fn root(&self) -> Option<GroupId> {
        self.root
    }

    /// 把以 `root` 为根的计划转换为组结构
    ///
    /// 每个计划节点对应一个单成员的组。同一个计划节点被多个节点依赖时只转换一次。
    pub fn convert_plan(&mut self, root: PlanNodeId) -> OptimizeResult<GroupId> {
        let mut visiting = HashSet::new();
        let group = self.convert_node(root, &mut visiting)?;
        self.root = Some(group);
        log::debug!(
            "Converted plan rooted at {} into {} groups",
            root,
            self.groups.len()
        );
        Ok(group)
    }

    fn convert_node(
        &mut self,
        plan: PlanNodeId,
        visiting: &mut HashSet<PlanNodeId>,
    ) -> OptimizeResult<GroupId> {
        if let Some(group) = self.plan_to_group.get(&plan) {
            return Ok(*group);
        }
        if !visiting.insert(plan) {
            return Err(OptimizeError::CycleDetected(plan.index().unwrap_or_default()));
        }

        let deps = self.plan_node_by_id(plan)?.dependencies().to_vec();
        let mut dep_groups = Vec::with_capacity(deps.len());
        for dep in deps {
            dep_groups.push(self.convert_node(dep, visiting)?);
        }

        visiting.remove(&plan);
        let group = self.create_group();
        self.make_group_node(group, plan, dep_groups)?;
        Ok(group)
    }

    pub fn plan_node_by_id(&self, id: PlanNodeId) -> OptimizeResult<&PlanNodeEnum> {
        self.qctx
            .node(id)
            .ok_or(OptimizeError::NodeNotFound(id.value()))
    }

    /// 把新建的计划节点放入对象池
    pub fn add_plan_node(&mut self, node: PlanNodeEnum) -> OptimizeResult<PlanNodeId> {
        Ok(self.qctx.add_node(node)?)
    }

    pub fn group(&self, id: GroupId) -> OptimizeResult<&OptGroup> {
        self.groups
            .get(id.index())
            .ok_or(OptimizeError::GroupNotFound(id.index()))
    }

    pub fn group_mut(&mut self, id: GroupId) -> OptimizeResult<&mut OptGroup> {
        self.groups
            .get_mut(id.index())
            .ok_or(OptimizeError::GroupNotFound(id.index()))
    }

    pub fn group_node(&self, id: GroupNodeId) -> OptimizeResult<&OptGroupNode> {
        self.group_nodes
            .get(id.index())
            .ok_or(OptimizeError::GroupNodeNotFound(id.index()))
    }

    pub fn group_node_mut(&mut self, id: GroupNodeId) -> OptimizeResult<&mut OptGroupNode> {
        self.group_nodes
            .get_mut(id.index())
            .ok_or(OptimizeError::GroupNodeNotFound(id.index()))
    }

    /// 组节点包装的计划节点
    pub fn plan_node(&self, id: GroupNodeId) -> OptimizeResult<&PlanNodeEnum> {
        let plan = self.group_node(id)?.plan_node();
        self.plan_node_by_id(plan)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn create_group(&mut self) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(OptGroup::new(id));
        id
    }

    /// 创建组节点但不加入组
    ///
    /// 用于规则返回的 `new_group_nodes`，由优化引擎在去重后决定是否加入。
    pub fn create_group_node(
        &mut self,
        group: GroupId,
        plan: PlanNodeId,
        deps: Vec<GroupId>,
    ) -> OptimizeResult<GroupNodeId> {
        self.group(group)?;
        for dep in &deps {
            self.group(*dep)?;
        }
        self.plan_node_by_id(plan)?;

        let id = GroupNodeId(self.group_nodes.len());
        let mut node = OptGroupNode::new(id, plan, group);
        node.set_dependencies(deps);
        self.group_nodes.push(node);
        self.plan_to_group.entry(plan).or_insert(group);
        Ok(id)
    }

    /// 创建组节点并加入组
    pub fn make_group_node(
        &mut self,
        group: GroupId,
        plan: PlanNodeId,
        deps: Vec<GroupId>,
    ) -> OptimizeResult<GroupNodeId> {
        let id = self.create_group_node(group, plan, deps)?;
        self.group_mut(group)?.add_node(id);
        Ok(id)
    }

    /// 新建一个只含一个节点的组
    pub fn new_group_with(&mut self, plan: PlanNodeId, deps: Vec<GroupId>) -> OptimizeResult<GroupId> {
        let group = self.create_group();
        self.make_group_node(group, plan, deps)?;
        Ok(group)
    }

    /// 从根组可达的组，按后序排列（依赖在前）
    pub fn live_groups(&self) -> Vec<GroupId> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();
        if let Some(root) = self.root {
            self.collect_post_order(root, &mut visited, &mut order);
        }
        order
    }

    fn collect_post_order(&self, group: GroupId, visited: &mut HashSet<GroupId>, order: &mut Vec<GroupId>) {
        if !visited.insert(group) {
            return;
        }
        if let Ok(g) = self.group(group) {
            for node in g.nodes() {
                if let Ok(n) = self.group_node(*node) {
                    for dep in n.dependencies() {
                        self.collect_post_order(*dep, visited, order);
                    }
                }
            }
        }
        order.push(group);
    }

    /// 可达组的消费者索引：组 -> 有成员直接依赖它的组
    ///
    /// 一次遍历全部可达组节点建成，查询多个组时应复用同一份索引。
    pub fn consumers(&self) -> HashMap<GroupId, BTreeSet<GroupId>> {
        let mut index: HashMap<GroupId, BTreeSet<GroupId>> = HashMap::new();
        for candidate in self.live_groups() {
            let Ok(g) = self.group(candidate) else {
                continue;
            };
            for node in g.nodes() {
                if let Ok(n) = self.group_node(*node) {
                    for dep in n.dependencies() {
                        index.entry(*dep).or_default().insert(candidate);
                    }
                }
            }
        }
        index
    }

    /// 有成员直接依赖 `group` 的可达组
    pub fn parents_of(&self, group: GroupId) -> Vec<GroupId> {
        self.consumers()
            .remove(&group)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default()
    }

    /// 传递依赖 `group` 的所有可达组，不含自身
    pub fn ancestors_of(&self, group: GroupId) -> BTreeSet<GroupId> {
        let consumers = self.consumers();
        let mut result = BTreeSet::new();
        let mut stack = vec![group];
        while let Some(current) = stack.pop() {
            for parent in consumers.get(&current).into_iter().flatten() {
                if result.insert(*parent) {
                    stack.push(*parent);
                }
            }
        }
        result.remove(&group);
        result
    }

    /// 消费该组输出的不同组的个数
    pub fn consumer_count(&self, group: GroupId) -> usize {
        self.consumers().get(&group).map_or(0, BTreeSet::len)
    }

    /// 标记改写影响的组，清除其成员的已探索记录
    ///
    /// `Local` 只标记被改写的组及其祖先组，`Global` 标记全部可达组。
    pub fn mark_dirty(&mut self, group: GroupId, scope: RestartScope) -> OptimizeResult<BTreeSet<GroupId>> {
        let dirty: BTreeSet<GroupId> = match scope {
            RestartScope::Local => {
                let mut set = self.ancestors_of(group);
                set.insert(group);
                set
            }
            RestartScope::Global => self.live_groups().into_iter().collect(),
        };

        for g in &dirty {
            let members = self.group(*g)?.nodes().to_vec();
            for member in members {
                self.group_node_mut(member)?.set_unexplored();
            }
        }
        Ok(dirty)
    }

    /// 组节点的指纹：节点类型、参数与依赖组
    ///
    /// 不包含输出变量，同一组内指纹相同的节点视为重复。
    pub fn fingerprint(&self, node: GroupNodeId) -> OptimizeResult<String> {
        let group_node = self.group_node(node)?;
        let desc = self.plan_node(node)?.explain();
        let params = desc
            .description
            .unwrap_or_default()
            .into_iter()
            .map(|p| format!("{}={}", p.key, p.value))
            .collect::<Vec<_>>()
            .join(";");
        let deps = group_node
            .dependencies()
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Ok(format!("{}[{}]({})", desc.name, params, deps))
    }

    /// 组内是否已有与 `node` 指纹相同的成员
    pub fn is_duplicate(&self, group: GroupId, node: GroupNodeId) -> OptimizeResult<bool> {
        let fingerprint = self.fingerprint(node)?;
        for member in self.group(group)?.nodes() {
            if *member != node && self.fingerprint(*member)? == fingerprint {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn estimate_node(
        &self,
        node: GroupNodeId,
        memo: &mut HashMap<GroupId, (GroupNodeId, CostEstimate)>,
        visiting: &mut HashSet<GroupId>,
    ) -> OptimizeResult<CostEstimate> {
        let group_node = self.group_node(node)?;
        let mut inputs = Vec::with_capacity(group_node.dependencies().len());
        for dep in group_node.dependencies() {
            inputs.push(self.estimate_group_inner(*dep, memo, visiting)?.1);
        }
        Ok(estimate(self.plan_node(node)?, &inputs, &self.cost_config))
    }

    fn estimate_group_inner(
        &self,
        group: GroupId,
        memo: &mut HashMap<GroupId, (GroupNodeId, CostEstimate)>,
        visiting: &mut HashSet<GroupId>,
    ) -> OptimizeResult<(GroupNodeId, CostEstimate)> {
        if let Some(best) = memo.get(&group) {
            return Ok(*best);
        }
        if !visiting.insert(group) {
            return Err(OptimizeError::CycleDetected(group.index()));
        }

        let mut best: Option<(GroupNodeId, CostEstimate)> = None;
        for member in self.group(group)?.nodes() {
            let est = self.estimate_node(*member, memo, visiting)?;
            // 代价相同时保留先加入的节点
            if best.map_or(true, |(_, b)| est.cost < b.cost) {
                best = Some((*member, est));
            }
        }
        visiting.remove(&group);

        let best = best.ok_or_else(|| OptimizeError::invalid_plan(format!("组 {} 为空", group)))?;
        memo.insert(group, best);
        Ok(best)
    }

    /// 组内最优候选的估算
    pub fn estimate_group(&self, group: GroupId) -> OptimizeResult<CostEstimate> {
        let mut memo = HashMap::new();
        Ok(self.estimate_group_inner(group, &mut memo, &mut HashSet::new())?.1)
    }

    /// 组内代价最低的节点，代价相同时取先加入的
    pub fn best_group_node(&self, group: GroupId) -> OptimizeResult<GroupNodeId> {
        let mut memo = HashMap::new();
        Ok(self.estimate_group_inner(group, &mut memo, &mut HashSet::new())?.0)
    }

    /// 整个计划的估算代价
    pub fn total_cost(&self) -> OptimizeResult<f64> {
        match self.root {
            Some(root) => Ok(self.estimate_group(root)?.cost),
            None => Ok(0.0),
        }
    }

    /// 从组结构中选出最终计划，返回新的根节点
    ///
    /// 每个组选代价最低的节点，并把计划节点的依赖改写为所选子节点。
    pub fn extract_plan(&mut self) -> OptimizeResult<PlanNodeId> {
        let root = self
            .root
            .ok_or_else(|| OptimizeError::invalid_plan("尚未转换计划"))?;
        let mut chosen = HashMap::new();
        self.extract_group(root, &mut chosen)
    }

    fn extract_group(
        &mut self,
        group: GroupId,
        chosen: &mut HashMap<GroupId, PlanNodeId>,
    ) -> OptimizeResult<PlanNodeId> {
        if let Some(plan) = chosen.get(&group) {
            return Ok(*plan);
        }

        let best = self.best_group_node(group)?;
        let (plan, dep_groups) = {
            let node = self.group_node(best)?;
            (node.plan_node(), node.dependencies().to_vec())
        };
        let mut deps = Vec::with_capacity(dep_groups.len());
        for dep in dep_groups {
            deps.push(self.extract_group(dep, chosen)?);
        }
        self.qctx.set_dependencies(plan, deps)?;
        chosen.insert(group, plan);
        Ok(plan)
    }
}
