//! 优化规则宏定义
//!
//! 提供宏来简化优化规则的定义，减少样板代码

/// 定义规则结构体
///
/// 规则是无状态的单例，只持有构造时确定的模式。宏生成结构体、`NAME` 常量、
/// `new` 与 `Default`，`OptRule` 的实现仍由各规则自己编写。
///
/// # 示例
/// ```ignore
/// define_opt_rule! {
///     pub struct PushLimitDownScanEdgesRule;
///     pattern: Pattern::create(PlanNodeKind::Limit)
///         .with_dependency(Pattern::create(PlanNodeKind::ScanEdges))
/// }
/// ```
#[macro_export]
macro_rules! define_opt_rule {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
        pattern: $pattern:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            pattern: $crate::query::optimizer::plan::Pattern,
        }

        impl $name {
            pub const NAME: &'static str = stringify!($name);

            pub fn new() -> Self {
                Self { pattern: $pattern }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
