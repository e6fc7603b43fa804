//! Logging
//!
//! tracing 订阅器初始化，两个可执行文件共用

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则使用 `<level>,voxrelay=<level>,tower_http=debug`
pub fn init_logging(config: &LogConfig) {
    let log_filter = format!(
        "{},voxrelay={},tower_http=debug",
        config.level, config.level
    );
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
