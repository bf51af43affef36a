//! 探索状态管理
//! 定义 ExplorationState 结构体，用于追踪一次优化过程中的探索进度

use std::collections::HashSet;

use crate::query::optimizer::plan::GroupId;

#[derive(Debug, Default)]
pub struct ExplorationState {
    /// 当前规则在本轮已经访问过的组
    pub visited_groups: HashSet<GroupId>,
    /// 本轮成功改写的规则，按发生顺序
    pub applied_rules: Vec<&'static str>,
    /// 已开始的轮数
    pub current_round: usize,
}

impl ExplorationState {
    pub fn reset_round(&mut self) {
        self.visited_groups.clear();
        self.applied_rules.clear();
        self.current_round += 1;
    }

    /// 换下一条规则时只清空已访问的组
    pub fn reset_rule(&mut self) {
        self.visited_groups.clear();
    }

    pub fn is_visited_group(&self, group: GroupId) -> bool {
        self.visited_groups.contains(&group)
    }

    pub fn mark_group_visited(&mut self, group: GroupId) {
        self.visited_groups.insert(group);
    }

    pub fn record_applied(&mut self, rule: &'static str) {
        self.applied_rules.push(rule);
    }

    pub fn transforms_in_round(&self) -> usize {
        self.applied_rules.len()
    }

    pub fn was_rule_applied(&self, rule: &str) -> bool {
        self.applied_rules.iter().any(|r| *r == rule)
    }
}
