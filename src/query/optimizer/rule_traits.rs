//! 优化规则接口
//!
//! 一条规则由三部分组成：结构模式、模式之外的语义前置条件、改写动作。
//! 匹配阶段只读计划；改写阶段通过 `OptContext` 创建新的计划节点与组节点，
//! 不修改被匹配的原有节点。

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;

use crate::core::error::OptimizeResult;
use crate::query::optimizer::plan::{
    GroupId, GroupNodeId, MatchedResult, OptContext, Pattern, TransformResult,
};

pub trait OptRule: Debug + Send + Sync {
    /// 规则名，在注册表中唯一
    fn name(&self) -> &'static str;

    fn pattern(&self) -> &Pattern;

    /// 结构匹配之后的语义检查
    ///
    /// 默认只检查数据流：被匹配子树中除根以外的组都只能被一个组消费，
    /// 否则改写会影响计划中的其他部分。
    fn matches(&self, ctx: &OptContext<'_>, matched: &MatchedResult) -> bool {
        check_dataflow(ctx, matched)
    }

    fn transform(
        &self,
        ctx: &mut OptContext<'_>,
        matched: &MatchedResult,
    ) -> OptimizeResult<TransformResult>;

    /// 模式匹配加语义检查
    fn try_match(&self, ctx: &OptContext<'_>, node: GroupNodeId) -> Option<MatchedResult> {
        let matched = self.pattern().match_node(ctx, node)?;
        if self.matches(ctx, &matched) {
            Some(matched)
        } else {
            None
        }
    }
}

/// 子树内部的组是否只被子树自身消费
pub fn check_dataflow(ctx: &OptContext<'_>, matched: &MatchedResult) -> bool {
    if matched.dependencies.is_empty() {
        return true;
    }
    let consumers = ctx.consumers();
    matched
        .dependencies
        .iter()
        .all(|dep| dataflow_of(ctx, &consumers, dep))
}

fn dataflow_of(
    ctx: &OptContext<'_>,
    consumers: &HashMap<GroupId, BTreeSet<GroupId>>,
    matched: &MatchedResult,
) -> bool {
    let single_consumer = ctx
        .group_node(matched.node)
        .map(|n| consumers.get(&n.group()).map_or(0, BTreeSet::len) <= 1)
        .unwrap_or(false);
    single_consumer
        && matched
            .dependencies
            .iter()
            .all(|dep| dataflow_of(ctx, consumers, dep))
}
