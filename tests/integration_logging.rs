//! 日志与配置集成测试
//!
//! 日志系统在进程内只能初始化一次，因此本文件只有一个测试会启动日志。

mod common;

use std::fs;
use std::io::Write;

use common::assertions::assert_ok;
use common::{edge_limit_plan, SPACE};
use graphdb_optimizer::config::{Config, LogConfig};
use graphdb_optimizer::query::optimizer::Optimizer;
use graphdb_optimizer::query::QueryContext;
use graphdb_optimizer::utils::logging;
use serial_test::serial;

fn read_logs(dir: &std::path::Path) -> String {
    let mut content = String::new();
    for entry in fs::read_dir(dir).expect("读取日志目录失败").flatten() {
        if let Ok(text) = fs::read_to_string(entry.path()) {
            content.push_str(&text);
        }
    }
    content
}

#[test]
#[serial]
fn test_optimizer_writes_summary_to_log() {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    let config = LogConfig {
        level: "debug".to_string(),
        dir: dir.path().to_string_lossy().into_owned(),
        file: "optimizer-it".to_string(),
        async_write: false,
        ..LogConfig::default()
    };
    logging::init(&config).expect("日志初始化失败");
    assert!(logging::is_initialized());

    let mut qctx = QueryContext::new(SPACE);
    let root = edge_limit_plan(&mut qctx);
    assert_ok(Optimizer::default().find_best_plan(&mut qctx, root));

    logging::shutdown();
    assert!(!logging::is_initialized());

    let logs = read_logs(dir.path());
    assert!(logs.contains("Optimization converged"), "日志内容: {}", logs);
    assert!(logs.contains("GetEdgesTransformLimitRule"), "日志内容: {}", logs);
}

#[test]
#[serial]
fn test_optimizer_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
    file.write_all(
        b"[log]\nlevel = \"warn\"\n\n[optimizer]\nmax_iteration_rounds = 0\nenable_cost_based = false\n",
    )
    .expect("写入配置失败");

    let config = assert_ok(Config::load(file.path()));
    assert_eq!(config.log.level, "warn");
    assert_eq!(config.log.max_files, LogConfig::default().max_files);
    assert!(!config.optimizer.enable_cost_based);

    let mut qctx = QueryContext::new(SPACE);
    let root = edge_limit_plan(&mut qctx);
    let outcome = assert_ok(Optimizer::builtin(config.optimizer).find_best_plan(&mut qctx, root));
    assert_eq!(outcome.root, root);
    assert_eq!(outcome.stats.passes, 0);
}
