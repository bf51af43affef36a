//! 笛卡尔积计划节点

use crate::core::error::{PlanNodeError, PlanNodeResult};
use crate::define_plan_node;
use crate::query::context::symbol::SymbolTable;
use crate::query::planner::plan::core::explain::Pair;
use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::planner::plan::core::nodes::plan_node_traits::Explain;

define_plan_node! {
    /// 任意多个具名变量的笛卡尔积
    ///
    /// 输出列是各输入变量列按添加顺序拼接的结果。
    pub struct CartesianProduct {
        input_vars: Vec<String>,
        all_col_names: Vec<Vec<String>>,
    }
    enum: CartesianProduct
    input: SingleInputNode
}

impl CartesianProduct {
    pub fn new(input: PlanNodeId) -> Self {
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![input],
            output_var: String::new(),
            col_names: vec![],
            input_vars: vec![],
            all_col_names: vec![],
        }
    }

    /// 添加一个输入变量
    ///
    /// 变量名为空、重复添加或在符号表中不存在时返回错误，节点保持不变。
    pub fn add_var(&mut self, sym_table: &SymbolTable, var_name: &str) -> PlanNodeResult<()> {
        if var_name.is_empty() {
            return Err(PlanNodeError::EmptyVariable);
        }
        if self.input_vars.iter().any(|v| v == var_name) {
            return Err(PlanNodeError::DuplicateVariable(var_name.to_string()));
        }

        let col_names = sym_table.col_names(var_name)?;
        self.col_names.extend(col_names.iter().cloned());
        self.all_col_names.push(col_names);
        self.input_vars.push(var_name.to_string());
        Ok(())
    }

    pub fn input_vars(&self) -> &[String] {
        &self.input_vars
    }

    /// 每个输入变量各自的列
    pub fn all_col_names(&self) -> &[Vec<String>] {
        &self.all_col_names
    }
}

impl Explain for CartesianProduct {
    fn explain(&self) -> Vec<Pair> {
        vec![Pair::json("inputVars", &self.input_vars)]
    }
}

define_plan_node! {
    /// 两个输入的笛卡尔积
    pub struct BiCartesianProduct {
    }
    enum: BiCartesianProduct
    input: BinaryInputNode
}

impl BiCartesianProduct {
    /// 输出列为左输入列后接右输入列
    pub fn new(
        left: PlanNodeId,
        left_col_names: &[String],
        right: PlanNodeId,
        right_col_names: &[String],
    ) -> Self {
        let mut col_names = left_col_names.to_vec();
        col_names.extend(right_col_names.iter().cloned());
        Self {
            id: PlanNodeId::UNASSIGNED,
            deps: vec![left, right],
            output_var: String::new(),
            col_names,
        }
    }
}

impl Explain for BiCartesianProduct {
    fn explain(&self) -> Vec<Pair> {
        Vec::new()
    }
}
