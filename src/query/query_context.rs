//! 查询上下文
//!
//! 每个查询在规划与优化期间独占一个 `QueryContext`，它持有：
//! - 对象池：所有计划节点的唯一所有者，节点之间只通过 `PlanNodeId` 引用
//! - 符号表：具名中间结果变量及其读写者
//! - 目标图空间
//!
//! 查询编译结束时整个上下文一起释放，不存在单独回收节点的操作。

use crate::core::error::{PlanNodeError, PlanNodeResult};
use crate::core::types::GraphSpaceId;
use crate::query::context::symbol::SymbolTable;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::PlanNodeEnum;
use crate::utils::{AnonVarGenerator, ObjectPool};

/// 查询上下文
#[derive(Debug, Default)]
pub struct QueryContext {
    space_id: GraphSpaceId,
    obj_pool: ObjectPool<PlanNodeEnum>,
    sym_table: SymbolTable,
    anon_var_gen: AnonVarGenerator,
}

impl QueryContext {
    pub fn new(space_id: GraphSpaceId) -> Self {
        Self {
            space_id,
            obj_pool: ObjectPool::with_capacity(64),
            sym_table: SymbolTable::new(),
            anon_var_gen: AnonVarGenerator::new(),
        }
    }

    pub fn space_id(&self) -> GraphSpaceId {
        self.space_id
    }

    pub fn sym_table(&self) -> &SymbolTable {
        &self.sym_table
    }

    /// 生成并登记一个匿名变量
    pub fn anon_var(&self) -> String {
        self.anon_var_gen.get_var(&self.sym_table)
    }

    /// 将节点放入对象池
    ///
    /// 分配节点 ID；未指定输出变量时分配匿名变量，并把输出列登记到符号表。
    /// 依赖节点必须已经在池中。
    pub fn add_node(&mut self, mut node: PlanNodeEnum) -> PlanNodeResult<PlanNodeId> {
        for dep in node.dependencies() {
            if self.node(*dep).is_none() {
                return Err(PlanNodeError::invalid_argument(format!(
                    "{} 的依赖节点 {} 不存在",
                    node.name(),
                    dep
                )));
            }
        }

        let id = PlanNodeId::new(self.obj_pool.next_index());
        node.set_id(id);

        if node.kind().passes_through_columns() && node.col_names().is_empty() {
            let inherited = node
                .dependencies()
                .first()
                .and_then(|dep| self.node(*dep))
                .map(|input| input.col_names().to_vec());
            if let Some(col_names) = inherited {
                node.set_col_names(col_names);
            }
        }

        if node.output_var().is_empty() {
            let var = self.anon_var();
            node.set_output_var(var);
        } else if !self.sym_table.has_variable(node.output_var()) {
            self.sym_table.new_variable(node.output_var())?;
        }
        self.sym_table
            .set_col_names(node.output_var(), node.col_names().to_vec())?;
        self.sym_table.written_by(node.output_var(), id)?;
        self.register_readers(id, node.dependencies())?;
        if let Some(product) = node.as_cartesian_product() {
            for var in product.input_vars() {
                self.sym_table.read_by(var, id)?;
            }
        }

        log::trace!("Add plan node {}({}) -> {}", node.name(), id, node.output_var());
        self.obj_pool.make_and_add(node);
        Ok(id)
    }

    pub fn node(&self, id: PlanNodeId) -> Option<&PlanNodeEnum> {
        id.index().and_then(|idx| self.obj_pool.get(idx))
    }

    pub fn node_mut(&mut self, id: PlanNodeId) -> Option<&mut PlanNodeEnum> {
        id.index().and_then(move |idx| self.obj_pool.get_mut(idx))
    }

    /// 复制节点
    ///
    /// 副本与原节点参数和依赖完全相同，但拥有新的 ID 和新的匿名输出变量。
    pub fn clone_node(&mut self, id: PlanNodeId) -> PlanNodeResult<PlanNodeId> {
        let mut copy = self
            .node(id)
            .cloned()
            .ok_or_else(|| PlanNodeError::invalid_argument(format!("节点 {} 不存在", id)))?;
        copy.set_id(PlanNodeId::UNASSIGNED);
        copy.set_output_var(String::new());
        self.add_node(copy)
    }

    /// 替换节点的依赖，同时维护符号表中的读者信息
    pub fn set_dependencies(&mut self, id: PlanNodeId, deps: Vec<PlanNodeId>) -> PlanNodeResult<()> {
        let old_deps = self
            .node(id)
            .map(|n| n.dependencies().to_vec())
            .ok_or_else(|| PlanNodeError::invalid_argument(format!("节点 {} 不存在", id)))?;
        if old_deps == deps {
            return Ok(());
        }

        for dep in &old_deps {
            if let Some(var) = self.node(*dep).map(|n| n.output_var().to_string()) {
                self.sym_table.delete_read_by(&var, id);
            }
        }
        self.register_readers(id, &deps)?;

        if let Some(node) = self.node_mut(id) {
            node.set_dependencies(deps);
        }
        Ok(())
    }

    /// 对象池中的节点总数，包括已被改写淘汰的节点
    pub fn node_count(&self) -> usize {
        self.obj_pool.size()
    }

    fn register_readers(&self, reader: PlanNodeId, deps: &[PlanNodeId]) -> PlanNodeResult<()> {
        for dep in deps {
            let var = self
                .node(*dep)
                .map(|n| n.output_var())
                .ok_or_else(|| PlanNodeError::invalid_argument(format!("依赖节点 {} 不存在", dep)))?;
            self.sym_table.read_by(var, reader)?;
        }
        Ok(())
    }
}
