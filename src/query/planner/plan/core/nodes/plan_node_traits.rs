//! PlanNode 统一特征定义
//!
//! 定义所有计划节点需要实现的基础特征。按输入个数分为三类：
//! 无输入（数据源）、单输入、双输入。

use crate::core::error::PlanNodeResult;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::query_context::QueryContext;

use super::plan_node_enum::{PlanNodeEnum, PlanNodeKind};

/// PlanNode 基础特征
pub trait PlanNode {
    /// 获取节点的唯一ID
    fn id(&self) -> PlanNodeId;

    /// 设置节点ID，仅由对象池在加入节点时调用
    fn set_id(&mut self, id: PlanNodeId);

    /// 节点类型
    fn kind(&self) -> PlanNodeKind;

    /// 获取节点类型的名称
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// 依赖节点，按输入顺序排列
    fn dependencies(&self) -> &[PlanNodeId];

    fn set_dependencies(&mut self, deps: Vec<PlanNodeId>);

    /// 获取节点的输出变量
    fn output_var(&self) -> &str;

    /// 设置节点的输出变量
    fn set_output_var(&mut self, var: String);

    /// 获取列名列表
    fn col_names(&self) -> &[String];

    /// 设置列名
    fn set_col_names(&mut self, names: Vec<String>);

    /// 转换为 PlanNodeEnum
    fn into_enum(self) -> PlanNodeEnum
    where
        Self: Sized;

    /// 放入查询上下文的对象池，返回分配的ID
    fn make(self, qctx: &mut QueryContext) -> PlanNodeResult<PlanNodeId>
    where
        Self: Sized,
    {
        qctx.add_node(self.into_enum())
    }
}

/// 节点参数描述，用于 EXPLAIN
pub trait Explain {
    fn explain(&self) -> Vec<Pair>;
}

/// 无输入节点特征
///
/// 适用于数据源节点
pub trait ZeroInputNode: PlanNode {}

/// 单输入节点特征
pub trait SingleInputNode: PlanNode {
    /// 获取输入节点
    fn input(&self) -> Option<PlanNodeId> {
        self.dependencies().first().copied()
    }

    /// 设置输入节点
    fn set_input(&mut self, input: PlanNodeId) {
        self.set_dependencies(vec![input]);
    }
}

/// 双输入节点特征
pub trait BinaryInputNode: PlanNode {
    /// 左输入
    fn left(&self) -> Option<PlanNodeId> {
        self.dependencies().first().copied()
    }

    /// 右输入
    fn right(&self) -> Option<PlanNodeId> {
        self.dependencies().get(1).copied()
    }

    fn set_left(&mut self, left: PlanNodeId) {
        let right = self.right().unwrap_or(PlanNodeId::UNASSIGNED);
        self.set_dependencies(vec![left, right]);
    }

    fn set_right(&mut self, right: PlanNodeId) {
        let left = self.left().unwrap_or(PlanNodeId::UNASSIGNED);
        self.set_dependencies(vec![left, right]);
    }
}
