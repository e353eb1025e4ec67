//! 批次状态机 - 编排层
//!
//! 批次内每个 slug 的处理状态显式建模：
//! 待处理 → 处理中 → 完成（成功或失败）

/// 单个 slug 的处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugState {
    /// 尚未开始
    Pending,
    /// 正在处理
    InProgress,
    /// 已完成
    Done(SlugOutcome),
}

/// 处理完成后的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugOutcome {
    Success,
    Failed,
}

/// 批次中的单个条目
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub slug: String,
    pub state: SlugState,
}

/// 一次批量抓取的全量状态
///
/// 只存在于单次运行的内存里，不落库。条目保持文件中的原始顺序。
#[derive(Debug)]
pub struct CrawlBatch {
    items: Vec<BatchItem>,
}

impl CrawlBatch {
    pub fn new(slugs: Vec<String>) -> Self {
        let items = slugs
            .into_iter()
            .map(|slug| BatchItem {
                slug,
                state: SlugState::Pending,
            })
            .collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slug(&self, index: usize) -> &str {
        &self.items[index].slug
    }

    pub fn mark_in_progress(&mut self, index: usize) {
        self.items[index].state = SlugState::InProgress;
    }

    pub fn mark_done(&mut self, index: usize, outcome: SlugOutcome) {
        self.items[index].state = SlugState::Done(outcome);
    }

    /// 汇总批次结果
    pub fn summary(&self) -> BatchSummary {
        let mut summary = BatchSummary {
            total: self.items.len(),
            ..Default::default()
        };

        for item in &self.items {
            match item.state {
                SlugState::Done(SlugOutcome::Success) => summary.success += 1,
                SlugState::Done(SlugOutcome::Failed) => {
                    summary.failed += 1;
                    summary.failed_slugs.push(item.slug.clone());
                }
                SlugState::Pending | SlugState::InProgress => {}
            }
        }

        summary
    }
}

/// 批次汇总
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// 批次条目总数
    pub total: usize,
    /// 成功入库数
    pub success: usize,
    /// 失败数
    pub failed: usize,
    /// 失败的 slug（按批次顺序）
    pub failed_slugs: Vec<String>,
}
