// 工具模块 - 仅用于导出各个子模块，不包含具体实现

// 对象池模块
pub mod object_pool;
pub use object_pool::ObjectPool;

// 日志模块
pub mod logging;

// 匿名变量生成器模块
pub mod anon_var_generator;
pub use anon_var_generator::AnonVarGenerator;
