//! 计划节点宏定义
//!
//! 提供宏来简化计划节点的定义，减少样板代码

/// 定义计划节点的宏
///
/// 生成的结构体自带 ID、依赖、输出变量和输出列四个公共字段，
/// 并实现 `PlanNode` 以及对应输入个数的标记特征。
///
/// # 示例
/// ```ignore
/// define_plan_node! {
///     pub struct ScanEdgesNode {
///         space_id: GraphSpaceId,
///         edge_props: Vec<EdgeProp>,
///     }
///     enum: ScanEdges
///     input: ZeroInputNode
/// }
/// ```
#[macro_export]
macro_rules! define_plan_node {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($field:ident: $type:ty),* $(,)?
        }
        enum: $variant:ident
        input: $input_trait:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            id: $crate::query::planner::plan::core::node_id::PlanNodeId,
            deps: Vec<$crate::query::planner::plan::core::node_id::PlanNodeId>,
            output_var: String,
            col_names: Vec<String>,
            $($field: $type,)*
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::PlanNode for $name {
            fn id(&self) -> $crate::query::planner::plan::core::node_id::PlanNodeId {
                self.id
            }

            fn set_id(&mut self, id: $crate::query::planner::plan::core::node_id::PlanNodeId) {
                self.id = id;
            }

            fn kind(&self) -> $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeKind {
                $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeKind::$variant
            }

            fn dependencies(&self) -> &[$crate::query::planner::plan::core::node_id::PlanNodeId] {
                &self.deps
            }

            fn set_dependencies(&mut self, deps: Vec<$crate::query::planner::plan::core::node_id::PlanNodeId>) {
                self.deps = deps;
            }

            fn output_var(&self) -> &str {
                &self.output_var
            }

            fn set_output_var(&mut self, var: String) {
                self.output_var = var;
            }

            fn col_names(&self) -> &[String] {
                &self.col_names
            }

            fn set_col_names(&mut self, names: Vec<String>) {
                self.col_names = names;
            }

            fn into_enum(self) -> $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum {
                $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum::$variant(self)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::$input_trait for $name {}
    };
}
