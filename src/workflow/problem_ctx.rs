//! 题目处理上下文
//!
//! 封装"我正在处理批次里第几个、哪个 slug"这一信息

use std::fmt::Display;

/// 题目处理上下文
///
/// 包含处理单个题目所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct ProblemCtx {
    /// 题目 slug，"two-sum" 这种形式
    pub slug: String,

    /// 题目在批次中的序号（从1开始，仅用于日志显示）
    pub item_index: usize,

    /// 题目页完整地址
    pub url: String,
}

impl ProblemCtx {
    /// 创建新的题目上下文
    pub fn new(slug: String, item_index: usize, url: String) -> Self {
        Self {
            slug,
            item_index,
            url,
        }
    }
}

impl Display for ProblemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[题目 #{} {}]", self.item_index, self.slug)
    }
}
