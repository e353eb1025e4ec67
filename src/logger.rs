//! 日志初始化
//!
//! 控制台 + 追加式日志文件双输出，由 `main` 持有文件写入线程的 guard

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// 初始化全局日志订阅器
///
/// 日志同时输出到控制台和 `config.log_file`（追加模式，历史日志保留）。
/// 返回的 guard 必须在进程生命周期内存活，否则文件日志会丢失缓冲内容。
pub fn init(config: &Config) -> WorkerGuard {
    // RUST_LOG 优先，默认 info 并压低依赖库的噪音
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn,chromiumoxide=warn"));

    let log_path = Path::new(&config.log_file);
    let log_dir = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let log_name = log_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "scrape_neetcode.log".to_string());

    // rolling::never = 单文件追加写入，不做轮转
    let file_appender = rolling::never(log_dir, log_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer().with_target(false);
    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    // try_init: 集成测试中重复初始化时静默跳过
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    guard
}

/// 截断长文本用于日志显示
///
/// 按字符计数截断，避免切断多字节字符
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_text("two-sum", 80), "two-sum");
    }

    #[test]
    fn truncate_cuts_long_text() {
        let long = "a".repeat(100);
        let cut = truncate_text(&long, 80);
        assert_eq!(cut.chars().count(), 83);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn truncate_is_char_safe() {
        let text = "数组中找出和为目标值的两个整数";
        let cut = truncate_text(text, 4);
        assert_eq!(cut, "数组中找...");
    }
}
