//! 单题处理器 - 编排层
//!
//! 负责"抓一道题并入库"的完整生命周期：
//! 为每道题启动独立的浏览器会话，流程结束后无论成败都关闭会话

use async_trait::async_trait;
use tracing::{info, warn};

use crate::browser::ChromiumSession;
use crate::config::Config;
use crate::error::ScrapeResult;
use crate::store::{ProblemStore, UpsertOutcome};
use crate::workflow::{ProblemCtx, ScrapeFlow};

/// 单题处理管道
///
/// 批量调度只依赖这个接口，测试时可以用桩实现替换真实浏览器
#[async_trait]
pub trait ProblemPipeline: Send + Sync {
    /// 处理一道题：抓取页面内容并写入存储
    async fn process(&self, ctx: &ProblemCtx) -> ScrapeResult<UpsertOutcome>;
}

/// 真实的单题处理器
///
/// 每道题使用独立的无头浏览器会话，避免页面状态串扰
pub struct ProblemProcessor {
    config: Config,
    store: ProblemStore,
    flow: ScrapeFlow,
}

impl ProblemProcessor {
    pub fn new(config: Config, store: ProblemStore) -> Self {
        let flow = ScrapeFlow::new(&config);
        Self {
            config,
            store,
            flow,
        }
    }
}

#[async_trait]
impl ProblemPipeline for ProblemProcessor {
    async fn process(&self, ctx: &ProblemCtx) -> ScrapeResult<UpsertOutcome> {
        info!("{} 🚀 开始处理", ctx);

        let session = ChromiumSession::launch(&self.config).await?;

        // 无论抓取成败都要走关闭路径，避免残留 Chrome 进程
        let flow_result = self.flow.run(&session, ctx).await;
        if let Err(e) = session.close().await {
            warn!("{} ⚠️ 关闭浏览器会话失败: {}", ctx, e);
        }
        let record = flow_result?;

        let outcome = self.store.upsert_problem(&record).await?;
        match outcome {
            UpsertOutcome::Created => info!("{} ✅ 新建题目: {}", ctx, record.title),
            UpsertOutcome::Updated => info!("{} ✅ 更新题目: {}", ctx, record.title),
        }

        Ok(outcome)
    }
}
