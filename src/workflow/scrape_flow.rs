//! 题目抓取流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整抓取流程
//!
//! 流程顺序：
//! 1. 打开题目页，等待标签栏锚点出现
//! 2. Question 标签页 → 标题 + 描述
//! 3. Solution 标签页 → 多语言题解
//! 4. 组装入库记录

use std::time::Duration;

use tracing::{info, warn};

use crate::browser::PageSession;
use crate::config::Config;
use crate::error::{ScrapeError, ScrapeResult};
use crate::logger;
use crate::models::{Difficulty, ProblemRecord, UNKNOWN_TITLE};
use crate::services::{render_solution_text, ContentExtractor, TabDriver};
use crate::workflow::problem_ctx::ProblemCtx;

/// 页面主体加载完成的锚点，标签栏出现即认为可以开始提取
pub const TABS_ANCHOR: &str = "ul.tabs-list";
/// 题目描述所在标签页
const TAB_QUESTION: &str = "Question";
/// 官方题解所在标签页
const TAB_SOLUTION: &str = "Solution";

/// 题目抓取流程
///
/// - 编排单个题目页的完整抓取流程
/// - 决定何时切换标签、何时提取、何时降级
/// - 不持有任何资源（浏览器会话由调用方传入）
/// - 只依赖业务能力（services）
pub struct ScrapeFlow {
    tab_driver: TabDriver,
    nav_timeout_secs: u64,
    verbose_logging: bool,
}

impl ScrapeFlow {
    /// 创建新的抓取流程
    pub fn new(config: &Config) -> Self {
        Self {
            tab_driver: TabDriver::new(config),
            nav_timeout_secs: config.nav_timeout_secs,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 抓取单个题目页，返回待入库的完整记录
    ///
    /// 标题、描述、题解任一字段缺失都只降级该字段，
    /// 只有会话级故障（导航失败、协议断开）才会让整个流程出错。
    pub async fn run(
        &self,
        session: &dyn PageSession,
        ctx: &ProblemCtx,
    ) -> ScrapeResult<ProblemRecord> {
        // ========== 流程 1: 打开题目页 ==========
        info!("[题目 {}] 🔍 打开 {}", ctx.item_index, ctx.url);
        session.navigate(&ctx.url).await?;

        let anchor_wait = Duration::from_secs(self.nav_timeout_secs);
        let anchored = session.wait_for_selector(TABS_ANCHOR, anchor_wait).await?;
        if !anchored {
            // 锚点超时不致命，页面可能已经渲染出部分内容
            let timeout = ScrapeError::navigation_timeout(TABS_ANCHOR, self.nav_timeout_secs);
            warn!("[题目 {}] ⚠️ {}，继续尝试提取", ctx.item_index, timeout);
        }

        // ========== 流程 2: Question 标签页（标题 + 描述） ==========
        self.tab_driver.activate(session, TAB_QUESTION).await?;

        let title = match ContentExtractor::extract_title(session).await? {
            Some(title) => title,
            None => {
                warn!("[题目 {}] ⚠️ 未找到标题，使用兜底值", ctx.item_index);
                UNKNOWN_TITLE.to_string()
            }
        };
        info!("[题目 {}] 标题: {}", ctx.item_index, title);

        let description = match ContentExtractor::extract_description(session).await? {
            Some(description) => description,
            None => {
                warn!("[题目 {}] ⚠️ 未找到描述容器，描述置空", ctx.item_index);
                String::new()
            }
        };
        if self.verbose_logging {
            self.log_description(ctx.item_index, &description);
        }

        // ========== 流程 3: Solution 标签页（多语言题解） ==========
        self.tab_driver.activate(session, TAB_SOLUTION).await?;

        let blocks = ContentExtractor::collect_solution_blocks(session).await?;
        if blocks.is_empty() {
            warn!("[题目 {}] ⚠️ 未找到任何题解代码块，题解置空", ctx.item_index);
        } else {
            let languages: Vec<&str> = blocks.iter().map(|b| b.language.as_str()).collect();
            info!(
                "[题目 {}] ✓ 收集到 {} 种语言的题解: {}",
                ctx.item_index,
                blocks.len(),
                languages.join(", ")
            );
        }
        let solution_text = render_solution_text(&blocks);

        // ========== 流程 4: 组装入库记录 ==========
        Ok(ProblemRecord {
            slug: ctx.slug.clone(),
            title,
            description,
            // TODO: 详情页目前不展示难度，等列表页抓取上线后从列表数据回填
            difficulty: Difficulty::default(),
            solution_text,
        })
    }

    // ========== 日志辅助方法 ==========

    /// 显示描述预览
    fn log_description(&self, item_index: usize, description: &str) {
        info!(
            "[题目 {}] 描述: {}",
            item_index,
            logger::truncate_text(description, 80)
        );
    }
}
