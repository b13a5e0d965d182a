//! 日志初始化
//!
//! 控制台输出为主；`LOG_DIR` 指向一个已存在的目录时，
//! 额外写入按天滚动的 `festa.<date>` 日志文件。

use std::path::Path;

use tracing::Level;

/// 解析日志级别字符串，解析失败退回 info
fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|s| s.parse().ok()).unwrap_or(Level::INFO)
}

/// 安装全局日志订阅器
///
/// `log_dir` 不存在或未设置时只输出到控制台。只能调用一次。
pub fn init_logger(log_level: Option<&str>, log_dir: Option<&str>) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(parse_level(log_level))
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    match log_dir.map(Path::new).filter(|p| p.is_dir()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "festa");
            builder.with_writer(appender).init();
        }
        None => builder.init(),
    }
}
