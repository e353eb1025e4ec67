//! slug 列表加载器

use tokio::fs;
use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult};

/// 从文本文件加载待抓取的 slug 列表
///
/// 每行一个 slug，忽略空行与首尾空白，保持文件中的顺序
pub async fn load_slugs(path: &str) -> ScrapeResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ScrapeError::file(path, e))?;

    let slugs: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    debug!("从 {} 读取到 {} 个 slug", path, slugs.len());

    Ok(slugs)
}
