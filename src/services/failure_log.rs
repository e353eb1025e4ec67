//! 失败记录服务 - 业务能力层
//!
//! 只负责"把抓取失败的 slug 追加进文件"能力，不关心流程

use std::fs::OpenOptions;
use std::io::Write;

use tracing::debug;

use crate::config::Config;
use crate::error::{ScrapeError, ScrapeResult};

/// 失败记录服务
///
/// 职责：
/// - 将抓取失败的 slug 连同失败原因追加到失败清单文件
/// - 文件只追加不覆盖，供人工重跑时排查
/// - 只处理单条记录，不关心批次顺序
pub struct FailureLog {
    failure_file_path: String,
}

impl FailureLog {
    /// 创建失败记录服务
    pub fn new(config: &Config) -> Self {
        Self {
            failure_file_path: config.failure_file.clone(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            failure_file_path: path.into(),
        }
    }

    /// 追加一条失败记录
    ///
    /// 格式：`时间 | slug | 失败原因`，一行一条
    pub async fn record(&self, slug: &str, error: &ScrapeError) -> ScrapeResult<()> {
        debug!("记录失败: {} | {}", slug, error);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.failure_file_path)
            .map_err(|e| ScrapeError::file(&self.failure_file_path, e))?;

        let line = format!(
            "{} | {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            slug,
            error
        );

        file.write_all(line.as_bytes())
            .map_err(|e| ScrapeError::file(&self.failure_file_path, e))?;

        Ok(())
    }
}
