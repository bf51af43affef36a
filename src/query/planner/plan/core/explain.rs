//! 计划描述
//!
//! 为 EXPLAIN/PROFILE 生成节点与整个计划的描述，也用于优化器报错时给出子树信息。

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::query::planner::plan::core::node_id::PlanNodeId;
use crate::query::query_context::QueryContext;

/// 节点描述键值对
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Pair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// 值以 JSON 文本保存
    pub fn json<T: Serialize + ?Sized>(key: impl Into<String>, value: &T) -> Self {
        let value = serde_json::to_string(value).unwrap_or_else(|e| format!("<{}>", e));
        Self::new(key, value)
    }
}

/// 计划节点描述
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanNodeDescription {
    pub name: String,
    pub id: i64,
    pub output_var: String,
    pub description: Option<Vec<Pair>>,
    pub dependencies: Option<Vec<i64>>,
}

impl PlanNodeDescription {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
            output_var: String::new(),
            description: None,
            dependencies: None,
        }
    }

    pub fn with_output_var(mut self, output_var: impl Into<String>) -> Self {
        self.output_var = output_var.into();
        self
    }

    pub fn add_description(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.description
            .get_or_insert_with(Vec::new)
            .push(Pair::new(key, value));
    }

    pub fn with_dependencies(mut self, deps: Vec<i64>) -> Self {
        self.dependencies = Some(deps);
        self
    }

    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.description
            .as_ref()?
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

/// 计划描述
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanDescription {
    pub plan_node_descs: Vec<PlanNodeDescription>,
    pub node_index_map: HashMap<i64, usize>,
    pub format: String,
    pub optimize_time_in_us: i64,
}

impl PlanDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node_desc(&mut self, desc: PlanNodeDescription) -> usize {
        let index = self.plan_node_descs.len();
        self.node_index_map.insert(desc.id, index);
        self.plan_node_descs.push(desc);
        index
    }

    pub fn get_node_desc(&self, node_id: i64) -> Option<&PlanNodeDescription> {
        self.node_index_map
            .get(&node_id)
            .and_then(|&index| self.plan_node_descs.get(index))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// 从根节点出发描述整个计划，每个节点只出现一次，根节点在最前
pub fn describe_plan(qctx: &QueryContext, root: PlanNodeId) -> PlanDescription {
    let mut plan = PlanDescription::new();
    plan.format = "row".to_string();
    let mut stack = vec![root];
    let mut visited = HashSet::new();
    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        if let Some(node) = qctx.node(id) {
            plan.add_node_desc(node.explain());
            stack.extend(node.dependencies().iter().rev().copied());
        }
    }
    plan
}

/// 以缩进树的形式输出计划
///
/// ```text
/// Project(5) [columns: $-.e AS e]
///   Limit(4) [offset: 0, count: 1]
///     ...
/// ```
pub fn format_plan(qctx: &QueryContext, root: PlanNodeId) -> String {
    let mut out = String::new();
    format_node(qctx, root, 0, &mut out);
    out
}

fn format_node(qctx: &QueryContext, id: PlanNodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let Some(node) = qctx.node(id) else {
        out.push_str(&format!("{}<missing {}>\n", indent, id));
        return;
    };
    let desc = node.explain();
    let params: Vec<String> = desc
        .description
        .unwrap_or_default()
        .into_iter()
        .filter(|p| p.key != "colNames" && !p.value.is_empty())
        .map(|p| format!("{}: {}", p.key, p.value))
        .collect();
    out.push_str(&format!("{}{}({}) [{}]\n", indent, node.name(), id, params.join(", ")));
    for dep in node.dependencies() {
        format_node(qctx, *dep, depth + 1, out);
    }
}
