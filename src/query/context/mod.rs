//! 查询上下文模块
//!
//! - `symbol/` - 符号表管理

pub mod symbol;

pub use symbol::{Symbol, SymbolTable};
