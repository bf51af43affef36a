//! 将LIMIT下推到扫描边操作的规则
//!
//! 该规则识别 Limit -> ScanEdges 模式，
//! 并将LIMIT值集成到ScanEdges操作中。

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::define_opt_rule;
use crate::query::optimizer::plan::{MatchedResult, OptContext, Pattern, TransformResult};
use crate::query::optimizer::rule_traits::{check_dataflow, OptRule};
use crate::query::optimizer::rules::detached;
use crate::query::planner::plan::core::nodes::{PlanNode, SingleInputNode};
use crate::query::planner::plan::core::PlanNodeKind;

define_opt_rule! {
    /// 将LIMIT下推到扫描边操作的规则
    ///
    /// # 转换示例
    ///
    /// Before:
    /// ```text
    ///   Limit(offset=10, count=100)
    ///       |
    ///   ScanEdges
    /// ```
    ///
    /// After:
    /// ```text
    ///   Limit(offset=10, count=100)
    ///       |
    ///   ScanEdges(limit=110)
    /// ```
    ///
    /// # 适用条件
    ///
    /// - ScanEdges 没有 limit，或已有的 limit 大于 offset+count
    pub struct PushLimitDownScanEdgesRule;
    pattern: Pattern::create(PlanNodeKind::Limit)
        .with_dependency(Pattern::create(PlanNodeKind::ScanEdges))
}

impl OptRule for PushLimitDownScanEdgesRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    fn matches(&self, ctx: &OptContext<'_>, matched: &MatchedResult) -> bool {
        if !check_dataflow(ctx, matched) {
            return false;
        }
        let limit = ctx.plan_node(matched.node).ok().and_then(|n| n.as_limit());
        let scan = matched
            .result(&[0])
            .and_then(|r| ctx.plan_node(r.node).ok())
            .and_then(|n| n.as_scan_edges());
        match (limit, scan) {
            (Some(limit), Some(scan)) => scan.limit().map_or(true, |l| l > limit.max_rows()),
            _ => false,
        }
    }

    fn transform(
        &self,
        ctx: &mut OptContext<'_>,
        matched: &MatchedResult,
    ) -> OptimizeResult<TransformResult> {
        let limit = ctx
            .plan_node(matched.node)?
            .as_limit()
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("匹配的根节点不是 Limit"))?;
        let scan_match = matched
            .result(&[0])
            .ok_or_else(|| OptimizeError::precondition("Limit 缺少输入"))?;
        let scan = ctx
            .plan_node(scan_match.node)?
            .as_scan_edges()
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("Limit 的输入不是 ScanEdges"))?;
        let scan_deps = ctx.group_node(scan_match.node)?.dependencies().to_vec();

        let mut new_scan = detached(&scan);
        new_scan.set_limit(limit.max_rows());
        let new_scan = ctx.add_plan_node(new_scan.into_enum())?;
        let scan_group = ctx.new_group_with(new_scan, scan_deps)?;

        let mut new_limit = detached(&limit);
        new_limit.set_input(new_scan);
        new_limit.set_output_var(limit.output_var().to_string());
        let new_limit = ctx.add_plan_node(new_limit.into_enum())?;

        let group = ctx.group_node(matched.node)?.group();
        let node = ctx.create_group_node(group, new_limit, vec![scan_group])?;
        Ok(TransformResult::replace(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::optimizer::core::CostModelConfig;
    use crate::query::planner::plan::core::nodes::{LimitNode, ScanEdgesNode};
    use crate::query::planner::plan::core::PlanNodeId;
    use crate::query::query_context::QueryContext;

    fn limit_over_scan(qctx: &mut QueryContext, scan_limit: Option<i64>) -> PlanNodeId {
        let mut scan = ScanEdgesNode::new(1, vec![]);
        if let Some(l) = scan_limit {
            scan.set_limit(l);
        }
        let scan = scan.make(qctx).expect("创建节点失败");
        LimitNode::new(scan, 2, 3).make(qctx).expect("创建节点失败")
    }

    #[test]
    fn test_push_limit_into_scan() {
        let mut qctx = QueryContext::new(1);
        let limit = limit_over_scan(&mut qctx, None);
        let limit_var = qctx.node(limit).map(|n| n.output_var().to_string()).unwrap_or_default();

        let mut ctx = OptContext::new(&mut qctx, CostModelConfig::default());
        let root = ctx.convert_plan(limit).expect("转换失败");
        let node = ctx.group(root).expect("组应存在").nodes()[0];

        let rule = PushLimitDownScanEdgesRule::new();
        let matched = rule.try_match(&ctx, node).expect("应当匹配");
        let result = rule.transform(&mut ctx, &matched).expect("改写失败");
        let new_limit = result.new_group_nodes[0];
        assert_eq!(ctx.plan_node(new_limit).map(|n| n.output_var().to_string()).ok(), Some(limit_var));

        let scan_group = ctx.group_node(new_limit).expect("组节点应存在").dependencies()[0];
        let scan_node = ctx.group(scan_group).expect("组应存在").nodes()[0];
        let scan = ctx.plan_node(scan_node).expect("节点应存在");
        assert_eq!(scan.as_scan_edges().and_then(|s| s.limit()), Some(5));
    }

    #[test]
    fn test_skip_when_scan_limit_tighter() {
        for existing in [Some(5), Some(4)] {
            let mut qctx = QueryContext::new(1);
            let limit = limit_over_scan(&mut qctx, existing);
            let mut ctx = OptContext::new(&mut qctx, CostModelConfig::default());
            let root = ctx.convert_plan(limit).expect("转换失败");
            let node = ctx.group(root).expect("组应存在").nodes()[0];
            assert!(PushLimitDownScanEdgesRule::new().try_match(&ctx, node).is_none());
        }

        let mut qctx = QueryContext::new(1);
        let limit = limit_over_scan(&mut qctx, Some(50));
        let mut ctx = OptContext::new(&mut qctx, CostModelConfig::default());
        let root = ctx.convert_plan(limit).expect("转换失败");
        let node = ctx.group(root).expect("组应存在").nodes()[0];
        assert!(PushLimitDownScanEdgesRule::new().try_match(&ctx, node).is_some());
    }
}
