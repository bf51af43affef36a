//! 消除优化规则
//!
//! 这些规则负责消除冗余的操作，如原样转发输入列的投影

pub mod remove_noop_project;

pub use remove_noop_project::RemoveNoopProjectRule;
