//! 单对起止点的多源最短路径改用双向 BFS 的规则

use crate::core::error::{OptimizeError, OptimizeResult};
use crate::define_opt_rule;
use crate::query::optimizer::core::estimate;
use crate::query::optimizer::plan::{MatchedResult, OptContext, Pattern, TransformResult};
use crate::query::optimizer::rule_traits::OptRule;
use crate::query::planner::plan::core::nodes::PlanNode;
use crate::query::planner::plan::core::PlanNodeKind;
use crate::query::planner::plan::BFSShortestPath;

define_opt_rule! {
    /// 单对起止点的多源最短路径改用双向 BFS 的规则
    ///
    /// # 转换示例
    ///
    /// Before:
    /// ```text
    ///   MultiShortestPath
    ///     /        \
    ///   left      right
    /// ```
    ///
    /// After（同组内两个候选）:
    /// ```text
    ///   MultiShortestPath | BFSShortestPath
    ///     /        \
    ///   left      right
    /// ```
    ///
    /// # 适用条件
    ///
    /// - 左右输入的估算行数都不超过 1
    /// - BFS 的估算代价严格低于原节点
    ///
    /// 原节点保留，最终由代价决定使用哪一个。
    pub struct MultiShortestPathToBfsRule;
    pattern: Pattern::create(PlanNodeKind::MultiShortestPath)
        .with_dependency(Pattern::any())
        .with_dependency(Pattern::any())
}

impl OptRule for MultiShortestPathToBfsRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// 两侧输入只是估算，不在子树内改写，不需要数据流检查
    fn matches(&self, ctx: &OptContext<'_>, matched: &MatchedResult) -> bool {
        let (Ok(node), Ok(plan)) = (ctx.group_node(matched.node), ctx.plan_node(matched.node)) else {
            return false;
        };
        let Some(msp) = plan.as_multi_shortest_path() else {
            return false;
        };
        let inputs: Option<Vec<_>> = node
            .dependencies()
            .iter()
            .map(|group| ctx.estimate_group(*group).ok())
            .collect();
        let Some(inputs) = inputs else {
            return false;
        };
        if inputs.iter().any(|est| est.rows > 1.0) {
            return false;
        }
        // 代价不更低时不加候选，否则每次重新优化都会再加一次
        let (left, right) = match msp.dependencies() {
            [left, right] => (*left, *right),
            _ => return false,
        };
        let config = ctx.cost_config();
        let bfs = BFSShortestPath::new(left, right, msp.steps()).into_enum();
        estimate(&bfs, &inputs, config).cost < estimate(plan, &inputs, config).cost
    }

    fn transform(
        &self,
        ctx: &mut OptContext<'_>,
        matched: &MatchedResult,
    ) -> OptimizeResult<TransformResult> {
        let msp = ctx
            .plan_node(matched.node)?
            .as_multi_shortest_path()
            .cloned()
            .ok_or_else(|| OptimizeError::precondition("匹配的根节点不是 MultiShortestPath"))?;
        let (left, right) = match msp.dependencies() {
            [left, right] => (*left, *right),
            _ => return Err(OptimizeError::precondition("MultiShortestPath 需要两个输入")),
        };

        let mut bfs = BFSShortestPath::new(left, right, msp.steps());
        bfs.set_left_vid_var(msp.left_vid_var());
        bfs.set_right_vid_var(msp.right_vid_var());
        bfs.set_col_names(msp.col_names().to_vec());
        bfs.set_output_var(msp.output_var().to_string());
        let bfs = ctx.add_plan_node(bfs.into_enum())?;

        let (group, deps) = {
            let node = ctx.group_node(matched.node)?;
            (node.group(), node.dependencies().to_vec())
        };
        let node = ctx.create_group_node(group, bfs, deps)?;
        Ok(TransformResult::alternative(node))
    }
}
