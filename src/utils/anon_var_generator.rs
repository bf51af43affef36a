//! 匿名变量生成器

use std::sync::atomic::{AtomicU64, Ordering};

use crate::query::context::symbol::SymbolTable;

/// 匿名变量生成器
///
/// 生成的变量名形如 `__VAR_0`，并立即在符号表中登记。
#[derive(Debug, Default)]
pub struct AnonVarGenerator {
    next_id: AtomicU64,
}

impl AnonVarGenerator {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
        }
    }

    /// 生成一个新的匿名变量名
    pub fn get_var(&self, symbols: &SymbolTable) -> String {
        loop {
            let var_name = format!("__VAR_{}", self.next_id.fetch_add(1, Ordering::Relaxed));
            if symbols.new_variable(&var_name).is_ok() {
                log::trace!("Build anon var: {}", var_name);
                return var_name;
            }
        }
    }

    /// 检查变量名是否为匿名变量
    /// 解析器不允许用户使用以'_'开头的变量名，
    /// 以'_'开头的变量名仅由图数据库内部生成。
    pub fn is_anon_var(var: &str) -> bool {
        var.starts_with('_')
    }
}
