//! 批量调度器 - 编排层
//!
//! ## 职责
//!
//! - App：装配配置、存储与处理管道，对外暴露各条命令入口
//! - BatchRunner：按清单顺序逐个调度 slug，单条失败不中断批次
//! - 条目之间随机延时，模拟人工浏览节奏

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::browser::{ChromiumSession, PageSession};
use crate::config::Config;
use crate::error::ScrapeError;
use crate::models::load_slugs;
use crate::orchestrator::batch_state::{BatchSummary, CrawlBatch, SlugOutcome};
use crate::orchestrator::problem_processor::{ProblemPipeline, ProblemProcessor};
use crate::services::FailureLog;
use crate::store::ProblemStore;
use crate::workflow::{ProblemCtx, TABS_ANCHOR};

/// 环境自检用的探针题目
const DOCTOR_PROBE_SLUG: &str = "two-sum";

/// 批量调度器
///
/// 只负责"按什么节奏、以什么顺序处理哪些 slug"，
/// 单条题目怎么抓由传入的处理管道决定
pub struct BatchRunner {
    config: Config,
    failure_log: FailureLog,
}

impl BatchRunner {
    pub fn new(config: &Config) -> Self {
        Self {
            failure_log: FailureLog::new(config),
            config: config.clone(),
        }
    }

    /// 按顺序跑完整个批次
    ///
    /// 单条失败只记录不中断，批次总是处理完所有条目后返回汇总
    pub async fn run(&self, slugs: Vec<String>, pipeline: &dyn ProblemPipeline) -> BatchSummary {
        let mut batch = CrawlBatch::new(slugs);
        let total = batch.len();

        for i in 0..total {
            let slug = batch.slug(i).to_string();
            let ctx = ProblemCtx::new(slug.clone(), i + 1, self.config.problem_url(&slug));

            log_item_start(i + 1, total, &slug);
            batch.mark_in_progress(i);

            match pipeline.process(&ctx).await {
                Ok(_) => batch.mark_done(i, SlugOutcome::Success),
                Err(e) => {
                    error!("{} ❌ 处理失败: {}", ctx, e);
                    if let Err(log_err) = self.failure_log.record(&slug, &e).await {
                        warn!("⚠️ 写入失败清单出错: {}", log_err);
                    }
                    batch.mark_done(i, SlugOutcome::Failed);
                }
            }

            // 最后一条之后不再等待
            if i + 1 < total {
                let delay = self.sample_delay();
                info!("😴 休眠 {:.2} 秒后继续...", delay);
                sleep(Duration::from_secs_f64(delay)).await;
            }
        }

        batch.summary()
    }

    /// 在配置的上下界之间均匀采样一次延时（秒）
    fn sample_delay(&self) -> f64 {
        let (min, max) = (self.config.delay_min_secs, self.config.delay_max_secs);
        if max <= min {
            return min.max(0.0);
        }
        min + fastrand::f64() * (max - min)
    }
}

/// 应用编排入口
///
/// 持有共享资源（配置、存储连接池），每条命令一个方法
pub struct App {
    config: Config,
    store: ProblemStore,
}

impl App {
    /// 初始化应用：连接数据库并准备表结构
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let store = ProblemStore::connect(&config.database_url)
            .await
            .context("连接题目数据库失败")?;
        store.migrate().await.context("初始化数据库表结构失败")?;

        Ok(Self { config, store })
    }

    /// 抓取单个题目并入库
    ///
    /// 与批量模式不同，单抓失败会向上传播错误（进程以非零码退出）
    pub async fn scrape_one(&self, slug: &str) -> Result<()> {
        let processor = ProblemProcessor::new(self.config.clone(), self.store.clone());
        let ctx = ProblemCtx::new(slug.to_string(), 1, self.config.problem_url(slug));

        let outcome = processor
            .process(&ctx)
            .await
            .with_context(|| format!("抓取题目 {} 失败", slug))?;

        info!("✅ {} 处理完成 ({})", slug, outcome);
        Ok(())
    }

    /// 批量抓取 slug 清单中的全部题目
    pub async fn run_batch(&self) -> Result<BatchSummary> {
        let slugs = load_slugs(&self.config.slugs_file)
            .await
            .with_context(|| format!("读取 slug 清单 {} 失败", self.config.slugs_file))?;

        if slugs.is_empty() {
            warn!("⚠️ slug 清单 {} 为空，没有可抓取的题目", self.config.slugs_file);
            return Ok(BatchSummary::default());
        }

        log_slugs_loaded(slugs.len(), &self.config.slugs_file);

        let processor = ProblemProcessor::new(self.config.clone(), self.store.clone());
        let runner = BatchRunner::new(&self.config);
        let summary = runner.run(slugs, &processor).await;

        print_final_stats(&summary, &self.config);
        Ok(summary)
    }

    /// 查看单个题目的字段视图（JSON 输出）
    pub async fn show(&self, slug: &str) -> Result<()> {
        match self.store.get_problem_fields(slug).await? {
            Some(fields) => {
                let rendered =
                    serde_json::to_string_pretty(&fields).context("序列化题目字段失败")?;
                println!("{}", rendered);
            }
            None => warn!("⚠️ 未找到题目: {}", slug),
        }
        Ok(())
    }

    /// 列出已入库的全部题目
    pub async fn list(&self) -> Result<()> {
        let problems = self.store.list_problems().await?;
        if problems.is_empty() {
            println!("题库为空");
            return Ok(());
        }

        for p in &problems {
            println!(
                "{:<32} {:<8} {:<36} {}",
                p.slug,
                p.difficulty,
                p.title,
                p.updated_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
        println!("共 {} 道题目", problems.len());
        Ok(())
    }

    /// 环境自检：启动浏览器访问站点，确认抓取链路可用
    pub async fn doctor(&self) -> Result<()> {
        info!("🔍 开始环境自检...");

        let session = ChromiumSession::launch(&self.config)
            .await
            .context("启动无头浏览器失败")?;
        info!("✓ 无头浏览器启动成功");

        let check_result = self.doctor_checks(&session).await;
        if let Err(e) = session.close().await {
            warn!("⚠️ 关闭浏览器会话失败: {}", e);
        }
        check_result?;

        info!("✅ 环境自检通过");
        Ok(())
    }

    /// 自检里字段级的降级一律按硬错误处理，让问题尽早暴露
    async fn doctor_checks(&self, session: &ChromiumSession) -> Result<()> {
        let ua = session
            .eval_json("navigator.userAgent")
            .await
            .context("读取浏览器 UA 失败")?;
        let ua = ua.as_str().unwrap_or_default().to_string();
        if ua == self.config.user_agent {
            info!("✓ UA 设置生效");
        } else {
            warn!("⚠️ 浏览器 UA 与配置不一致: {}", ua);
        }

        // 用一道固定题目验证完整抓取链路
        let probe_url = self.config.problem_url(DOCTOR_PROBE_SLUG);
        session
            .navigate(&probe_url)
            .await
            .context("访问题目站点失败")?;
        info!("✓ 站点可访问: {}", probe_url);

        let anchor_wait = Duration::from_secs(self.config.nav_timeout_secs);
        let anchored = session.wait_for_selector(TABS_ANCHOR, anchor_wait).await?;
        if !anchored {
            return Err(
                ScrapeError::navigation_timeout(TABS_ANCHOR, self.config.nav_timeout_secs).into(),
            );
        }
        info!("✓ 题目页锚点出现: {}", TABS_ANCHOR);

        let title = session
            .eval_json("document.title")
            .await
            .context("读取页面标题失败")?;
        let title = title.as_str().unwrap_or_default().to_string();
        if title.is_empty() {
            return Err(ScrapeError::element_not_found("title").into());
        }
        info!("✓ 页面标题: {}", title);

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

/// 打印启动横幅
fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 NeetCode 题目抓取器启动");
    info!("启动时间: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("站点地址: {}", config.base_url);
    info!("数据库: {}", config.database_url);
    info!("{}", "=".repeat(60));
}

/// 打印清单加载结果
fn log_slugs_loaded(count: usize, path: &str) {
    info!("📋 从 {} 读取到 {} 个题目 slug", path, count);
}

/// 打印单条开始横幅
fn log_item_start(index: usize, total: usize, slug: &str) {
    info!("");
    info!("📦 [{}/{}] 开始处理: {}", index, total, slug);
}

/// 打印批次最终统计
fn print_final_stats(summary: &BatchSummary, config: &Config) {
    info!("{}", "=".repeat(60));
    info!("📊 批量抓取完成");
    info!(
        "总计: {} | ✅ 成功: {} | ❌ 失败: {}",
        summary.total, summary.success, summary.failed
    );
    if !summary.failed_slugs.is_empty() {
        info!("失败清单（已写入 {}）:", config.failure_file);
        for slug in &summary.failed_slugs {
            info!("  - {}", slug);
        }
    }
    info!("日志已保存至: {}", config.log_file);
    info!("{}", "=".repeat(60));
}
