use crate::core::error::{PlanNodeError, PlanNodeResult};
use crate::query::planner::plan::core::node_id::PlanNodeId;

use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// 中间结果变量
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub col_names: Vec<String>,
    pub readers: HashSet<PlanNodeId>,
    pub writers: HashSet<PlanNodeId>,
}

impl Symbol {
    pub fn new(name: String) -> Self {
        Self {
            name,
            col_names: Vec::new(),
            readers: HashSet::new(),
            writers: HashSet::new(),
        }
    }

    pub fn with_col_names(mut self, col_names: Vec<String>) -> Self {
        self.col_names = col_names;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Arc<DashMap<String, Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            symbols: Arc::new(DashMap::new()),
        }
    }

    pub fn new_variable(&self, name: &str) -> PlanNodeResult<Symbol> {
        self.new_dataset(name, Vec::new())
    }

    pub fn new_dataset(&self, name: &str, col_names: Vec<String>) -> PlanNodeResult<Symbol> {
        if name.is_empty() {
            return Err(PlanNodeError::EmptyVariable);
        }
        if self.symbols.contains_key(name) {
            return Err(PlanNodeError::DuplicateVariable(name.to_string()));
        }

        let symbol = Symbol::new(name.to_string()).with_col_names(col_names);
        self.symbols.insert(name.to_string(), symbol.clone());
        Ok(symbol)
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get_variable(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).map(|v| v.clone())
    }

    /// 变量的列名，变量不存在时返回错误
    pub fn col_names(&self, name: &str) -> PlanNodeResult<Vec<String>> {
        self.symbols
            .get(name)
            .map(|s| s.col_names.clone())
            .ok_or_else(|| PlanNodeError::UnknownVariable(name.to_string()))
    }

    pub fn set_col_names(&self, name: &str, col_names: Vec<String>) -> PlanNodeResult<()> {
        let mut symbol = self
            .symbols
            .get_mut(name)
            .ok_or_else(|| PlanNodeError::UnknownVariable(name.to_string()))?;
        symbol.col_names = col_names;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.symbols.len()
    }

    pub fn read_by(&self, var_name: &str, node: PlanNodeId) -> PlanNodeResult<()> {
        let mut symbol = self
            .symbols
            .get_mut(var_name)
            .ok_or_else(|| PlanNodeError::UnknownVariable(var_name.to_string()))?;
        symbol.readers.insert(node);
        Ok(())
    }

    pub fn written_by(&self, var_name: &str, node: PlanNodeId) -> PlanNodeResult<()> {
        let mut symbol = self
            .symbols
            .get_mut(var_name)
            .ok_or_else(|| PlanNodeError::UnknownVariable(var_name.to_string()))?;
        symbol.writers.insert(node);
        Ok(())
    }

    pub fn delete_read_by(&self, var_name: &str, node: PlanNodeId) -> bool {
        self.symbols
            .get_mut(var_name)
            .map(|mut s| s.readers.remove(&node))
            .unwrap_or(false)
    }

    pub fn readers(&self, var_name: &str) -> Vec<PlanNodeId> {
        let mut readers: Vec<PlanNodeId> = self
            .symbols
            .get(var_name)
            .map(|s| s.readers.iter().copied().collect())
            .unwrap_or_default();
        readers.sort();
        readers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_variable() {
        let table = SymbolTable::new();
        assert!(table.new_variable("a").is_ok());
        assert!(table.has_variable("a"));
        assert_eq!(
            table.new_variable("a"),
            Err(PlanNodeError::DuplicateVariable("a".to_string()))
        );
        assert_eq!(table.new_variable(""), Err(PlanNodeError::EmptyVariable));
        assert_eq!(table.size(), 1);
    }

    #[test]
    fn test_col_names() {
        let table = SymbolTable::new();
        table
            .new_dataset("v", vec!["id".to_string()])
            .expect("创建变量失败");
        assert_eq!(table.col_names("v").expect("变量应存在"), vec!["id"]);

        table
            .set_col_names("v", vec!["id".to_string(), "name".to_string()])
            .expect("设置列名失败");
        assert_eq!(table.col_names("v").expect("变量应存在").len(), 2);
        assert!(matches!(
            table.col_names("missing"),
            Err(PlanNodeError::UnknownVariable(_))
        ));
    }

    #[test]
    fn test_readers_and_writers() {
        let table = SymbolTable::new();
        table.new_variable("v").expect("创建变量失败");
        table.read_by("v", PlanNodeId::new(2)).expect("登记读者失败");
        table.read_by("v", PlanNodeId::new(1)).expect("登记读者失败");
        table.written_by("v", PlanNodeId::new(0)).expect("登记写者失败");

        assert_eq!(table.readers("v"), vec![PlanNodeId::new(1), PlanNodeId::new(2)]);
        assert!(table.delete_read_by("v", PlanNodeId::new(1)));
        assert!(!table.delete_read_by("v", PlanNodeId::new(1)));
        assert_eq!(table.readers("v"), vec![PlanNodeId::new(2)]);
        assert!(table.read_by("missing", PlanNodeId::new(0)).is_err());
    }
}
