// Query module for the graph database
//
// This module provides the planning-time half of the query pipeline:
// - Plan node model built by the planner
// - Per-query context owning every plan node
// - Rule-based and cost-based plan optimization

pub mod context;
pub mod optimizer;
pub mod planner;
pub mod query_context;

pub use query_context::QueryContext;
