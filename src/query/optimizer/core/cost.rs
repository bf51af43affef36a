//! 代价模型
//!
//! 只用于在同一组的候选节点之间做相对比较，不追求估算的绝对准确。
//! 每个节点的代价为自身处理代价加上各输入的代价。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::query::planner::plan::core::nodes::PlanNodeEnum;

/// 指数项的上限，避免多步扩展的估算溢出
const MAX_EXPAND_EXPONENT: i32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModelConfig {
    /// 无统计信息时全表扫描的估算行数
    pub default_scan_rows: f64,
    /// 每个顶点的平均出度
    pub average_degree: f64,
    /// 过滤条件的默认选择率
    pub filter_selectivity: f64,
    /// 处理一行的基础代价
    pub row_cost: f64,
    /// 多源最短路径相对于单对 BFS 的额外代价系数
    pub multi_shortest_path_factor: f64,
}

impl Default for CostModelConfig {
    fn default() -> Self {
        Self {
            default_scan_rows: 10_000.0,
            average_degree: 10.0,
            filter_selectivity: 0.5,
            row_cost: 1.0,
            multi_shortest_path_factor: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostEstimate {
    /// 估算输出行数
    pub rows: f64,
    /// 含全部输入的累计代价
    pub cost: f64,
}

impl CostEstimate {
    pub fn new(rows: f64, cost: f64) -> Self {
        Self { rows, cost }
    }
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rows={:.2}, cost={:.2}", self.rows, self.cost)
    }
}

fn expand(rows: f64, degree: f64, steps: usize) -> f64 {
    let exponent = i32::try_from(steps).unwrap_or(MAX_EXPAND_EXPONENT).min(MAX_EXPAND_EXPONENT);
    rows * degree.powi(exponent)
}

fn capped(rows: f64, limit: Option<i64>) -> f64 {
    match limit {
        Some(limit) if limit >= 0 => rows.min(limit as f64),
        _ => rows,
    }
}

/// 在输入估算已知的情况下估算节点本身
///
/// 缺失的输入按 0 行处理。
pub fn estimate(node: &PlanNodeEnum, inputs: &[CostEstimate], config: &CostModelConfig) -> CostEstimate {
    let input = |i: usize| inputs.get(i).copied().unwrap_or_default();
    let input_cost: f64 = inputs.iter().map(|e| e.cost).sum();
    let degree = config.average_degree;

    let (rows, work) = match node {
        PlanNodeEnum::Start(_) => (1.0, 0.0),
        PlanNodeEnum::ScanVertices(n) => {
            let rows = capped(config.default_scan_rows, n.limit());
            (rows, rows)
        }
        PlanNodeEnum::ScanEdges(n) => {
            let rows = capped(config.default_scan_rows, n.limit());
            (rows, rows)
        }
        PlanNodeEnum::GetNeighbors(n) => {
            let rows = capped(input(0).rows * degree, n.limit());
            (rows, input(0).rows * degree)
        }
        PlanNodeEnum::Traverse(n) => {
            let expanded = expand(input(0).rows, degree, n.step_range().max() as usize);
            (capped(expanded, n.limit()), expanded)
        }
        PlanNodeEnum::Filter(_) => (input(0).rows * config.filter_selectivity, input(0).rows),
        PlanNodeEnum::Project(_) | PlanNodeEnum::Dedup(_) => (input(0).rows, input(0).rows),
        PlanNodeEnum::Limit(n) => {
            let rows = input(0).rows.min(n.count().max(0) as f64);
            (rows, rows)
        }
        PlanNodeEnum::ShortestPath(n) => {
            let work = expand(input(0).rows, degree, n.step_range().max() as usize);
            (input(0).rows, work)
        }
        PlanNodeEnum::MultiShortestPath(n) => {
            let pairs = input(0).rows * input(1).rows;
            let frontier = expand(input(0).rows + input(1).rows, degree, n.steps().div_ceil(2));
            (pairs, frontier * config.multi_shortest_path_factor)
        }
        PlanNodeEnum::BFSShortestPath(n) => {
            let pairs = input(0).rows * input(1).rows;
            let frontier = expand(input(0).rows + input(1).rows, degree, n.steps().div_ceil(2));
            (pairs, frontier)
        }
        PlanNodeEnum::ProduceAllPaths(n) => {
            let paths = expand(input(0).rows * input(1).rows, degree, n.steps());
            (paths, paths)
        }
        PlanNodeEnum::Subgraph(n) => {
            let rows = expand(input(0).rows, degree, n.steps() as usize);
            (rows, rows)
        }
        PlanNodeEnum::CartesianProduct(n) => {
            let rows = input(0).rows.max(1.0).powi(n.input_vars().len().max(1) as i32);
            (rows, rows)
        }
        PlanNodeEnum::BiCartesianProduct(_) => {
            let rows = input(0).rows * input(1).rows;
            (rows, rows)
        }
    };

    CostEstimate::new(rows, input_cost + work * config.row_cost)
}
