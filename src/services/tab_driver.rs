//! 标签页切换服务 - 业务能力层
//!
//! ## 职责
//!
//! - 在题目页顶部的标签栏中按可见文本定位标签（Question / Solution）
//! - 仅在标签未激活时点击，点击后等待固定时长让面板内容就位
//! - 标签不存在按正常情况处理，返回 false 而不是报错

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::browser::PageSession;
use crate::config::Config;
use crate::error::ScrapeResult;

/// 标签栏中的单个标签项
const TAB_ITEMS: &str = "ul.tabs-list li";
/// 标签项内承载可见文本的节点
const TAB_LABEL: &str = "span";
/// 激活态标签项携带的 class
const ACTIVE_TAB_CLASS: &str = "my-active-tab";

/// 标签页切换服务
pub struct TabDriver {
    settle: Duration,
}

impl TabDriver {
    pub fn new(config: &Config) -> Self {
        Self {
            settle: Duration::from_secs(config.tab_settle_secs),
        }
    }

    /// 激活指定文本的标签页
    ///
    /// 返回 true 表示本次确实点击了标签，false 表示标签已激活或不存在。
    /// 对已激活的标签重复调用不会产生第二次点击。
    pub async fn activate(&self, session: &dyn PageSession, label: &str) -> ScrapeResult<bool> {
        let items = session.find_all(TAB_ITEMS).await?;

        for item in &items {
            let Some(span) = item.find(TAB_LABEL).await? else {
                continue;
            };
            if span.text().await? != label {
                continue;
            }

            let class_attr = item.attr("class").await?.unwrap_or_default();
            if class_attr.split_whitespace().any(|c| c == ACTIVE_TAB_CLASS) {
                debug!("'{}' 标签页已是激活状态，跳过点击", label);
                return Ok(false);
            }

            span.click().await?;
            sleep(self.settle).await;
            debug!("✓ 已切换到 '{}' 标签页", label);
            return Ok(true);
        }

        warn!("⚠️ 页面上未找到 '{}' 标签页", label);
        Ok(false)
    }
}
