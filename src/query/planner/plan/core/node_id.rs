//! 计划节点标识
//!
//! 计划节点由 `QueryContext` 的对象池持有，其余位置只保存 `PlanNodeId`。
//! 节点在加入对象池之前处于未分配状态，ID 为 -1。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 计划节点在对象池中的句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanNodeId(i64);

impl PlanNodeId {
    /// 尚未加入对象池的节点
    pub const UNASSIGNED: PlanNodeId = PlanNodeId(-1);

    pub fn new(index: usize) -> Self {
        PlanNodeId(index as i64)
    }

    pub fn is_assigned(&self) -> bool {
        self.0 >= 0
    }

    /// 对象池下标，未分配时返回 None
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Default for PlanNodeId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for PlanNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_node_id() {
        assert!(!PlanNodeId::UNASSIGNED.is_assigned());
        assert_eq!(PlanNodeId::UNASSIGNED.index(), None);
        assert_eq!(PlanNodeId::default(), PlanNodeId::UNASSIGNED);

        let id = PlanNodeId::new(3);
        assert!(id.is_assigned());
        assert_eq!(id.index(), Some(3));
        assert_eq!(id.to_string(), "3");
    }
}
