//! 优化规则模块
//!
//! # 规则分类
//!
//! ## 消除规则 (elimination)
//! - `RemoveNoopProjectRule` - 删除原样输出输入列的投影
//!
//! ## LIMIT 下推规则 (limit_pushdown)
//! - `GetEdgesTransformRule` - Limit 在只取边的投影之上时改写为带 limit 的边扫描
//! - `PushLimitDownProjectRule` - Limit 移到 Project 之下
//! - `GetEdgesTransformLimitRule` - 单步遍历加 Limit 改写为带 limit 的边扫描
//! - `PushLimitDownScanEdgesRule` - Limit 合并进 ScanEdges
//!
//! ## 转换规则 (transformation)
//! 基于代价的计划转换：
//! - `MultiShortestPathToBfsRule` - 单对起止点时增加 BFS 最短路径候选

pub mod macros;

pub mod elimination;
pub mod limit_pushdown;
pub mod transformation;

pub use elimination::*;
pub use limit_pushdown::*;
pub use transformation::*;

use crate::query::planner::plan::core::nodes::PlanNode;
use crate::query::planner::plan::core::PlanNodeId;

/// 复制一个已在对象池中的节点，用于构造改写后的新节点
///
/// 副本没有 ID，输出变量为空，放入对象池时重新分配。
pub(crate) fn detached<T: PlanNode + Clone>(node: &T) -> T {
    let mut copy = node.clone();
    copy.set_id(PlanNodeId::UNASSIGNED);
    copy.set_output_var(String::new());
    copy
}
