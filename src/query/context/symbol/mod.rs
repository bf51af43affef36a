//! 符号表：记录计划中所有具名中间结果变量

pub mod symbol_table;

pub use symbol_table::{Symbol, SymbolTable};
