//! 无头浏览器会话 - 基础设施层
//!
//! 持有 Browser / Page / CDP 事件任务，对外只暴露 `PageSession` 能力

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use serde_json::Value as JsonValue;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use crate::browser::{DomHandle, PageSession};
use crate::config::Config;
use crate::error::{ScrapeError, ScrapeResult};

/// 固定视口宽度
const VIEWPORT_WIDTH: u32 = 1920;
/// 固定视口高度
const VIEWPORT_HEIGHT: u32 = 1080;
/// 选择器轮询间隔（毫秒）
const SELECTOR_POLL_MS: u64 = 500;

/// 无头浏览器会话
///
/// 职责：
/// - 启动并独占一个无头浏览器进程
/// - 暴露导航 / 查找 / 等待能力
/// - 关闭时释放浏览器进程、CDP 连接和事件任务
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    nav_timeout: Duration,
}

impl ChromiumSession {
    /// 启动无头浏览器会话
    ///
    /// 固定 1920x1080 视口、禁用 GPU 与沙盒、携带固定 User-Agent。
    /// 启动失败对当前题目是致命错误，由调用方决定是否跳过。
    pub async fn launch(config: &Config) -> ScrapeResult<Self> {
        info!("🚀 启动无头浏览器...");

        let args: Vec<String> = vec![
            "--disable-gpu".to_string(),             // 无头模式禁用 GPU
            "--no-sandbox".to_string(),              // 容器环境下沙盒会导致启动失败
            "--disable-dev-shm-usage".to_string(),   // 防止共享内存不足
            "--remote-debugging-port=0".to_string(), // 让浏览器自动选择端口
            format!("--user-agent={}", config.user_agent),
        ];

        let mut builder = BrowserConfig::builder()
            .new_headless_mode()
            .window_size(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
            .args(args);

        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(Path::new(path));
        }

        let browser_config = builder
            .build()
            .map_err(|e| ScrapeError::session(format!("配置无头浏览器失败: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScrapeError::session_with("启动无头浏览器失败", e))?;

        // 在后台消费 CDP 事件流
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        // 添加短暂延迟以等待浏览器状态同步
        sleep(Duration::from_millis(300)).await;

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScrapeError::session_with("创建页面失败", e))?;

        debug!("无头浏览器启动成功");

        Ok(Self {
            browser,
            page,
            handler_task,
            nav_timeout: Duration::from_secs(config.nav_timeout_secs),
        })
    }

    /// 在页面上执行 JS 并返回 JSON 结果
    pub async fn eval_json(&self, js_code: impl Into<String>) -> ScrapeResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result
            .into_value()
            .map_err(|e| ScrapeError::session_with("JS 返回值解析失败", e))?;
        Ok(json_value)
    }

    /// 关闭会话，释放浏览器进程与事件任务
    pub async fn close(self) -> ScrapeResult<()> {
        let ChromiumSession {
            page,
            mut browser,
            handler_task,
            ..
        } = self;

        if let Err(e) = page.close().await {
            debug!("关闭页面失败: {}", e);
        }

        let close_result = browser.close().await;
        let _ = browser.wait().await;
        handler_task.abort();

        close_result.map_err(|e| ScrapeError::session_with("关闭浏览器失败", e))?;
        debug!("✓ 浏览器会话已关闭");
        Ok(())
    }

    fn boxed_nodes(elements: Vec<Element>) -> Vec<Box<dyn DomHandle>> {
        elements
            .into_iter()
            .map(|element| Box::new(ChromiumNode { element }) as Box<dyn DomHandle>)
            .collect()
    }
}

#[async_trait]
impl PageSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> ScrapeResult<()> {
        debug!("导航到: {}", url);

        match timeout(self.nav_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(ScrapeError::session_with(format!("导航到 {} 失败", url), e));
            }
            Err(_) => {
                return Err(ScrapeError::session(format!(
                    "导航到 {} 超时 ({} 秒)",
                    url,
                    self.nav_timeout.as_secs()
                )));
            }
        }

        // 等待初始加载事件，拿不到也不影响后续的锚点轮询
        let _ = timeout(self.nav_timeout, self.page.wait_for_navigation()).await;

        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, wait: Duration) -> ScrapeResult<bool> {
        let selector_js = JsonValue::String(selector.to_string());
        let js_code = format!(
            r#"
            (async () => {{
                const deadline = Date.now() + {timeout_ms};
                while (Date.now() < deadline) {{
                    if (document.querySelector({selector})) {{
                        return true;
                    }}
                    await new Promise(resolve => setTimeout(resolve, {poll_ms}));
                }}
                return document.querySelector({selector}) !== null;
            }})()
            "#,
            timeout_ms = wait.as_millis(),
            selector = selector_js,
            poll_ms = SELECTOR_POLL_MS,
        );

        // 页面内轮询之外再加一层超时兜底，防止 evaluate 本身卡死
        match timeout(wait + Duration::from_secs(2), self.page.evaluate(js_code)).await {
            Ok(Ok(result)) => Ok(result.into_value::<bool>().unwrap_or(false)),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Ok(false),
        }
    }

    async fn find(&self, selector: &str) -> ScrapeResult<Option<Box<dyn DomHandle>>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> ScrapeResult<Vec<Box<dyn DomHandle>>> {
        let elements = self.page.find_elements(selector).await?;
        Ok(Self::boxed_nodes(elements))
    }

    async fn close(self: Box<Self>) -> ScrapeResult<()> {
        ChromiumSession::close(*self).await
    }
}

/// chromiumoxide 元素句柄
struct ChromiumNode {
    element: Element,
}

#[async_trait]
impl DomHandle for ChromiumNode {
    async fn text(&self) -> ScrapeResult<String> {
        let text = self.element.inner_text().await?;
        Ok(text.unwrap_or_default().trim().to_string())
    }

    async fn attr(&self, name: &str) -> ScrapeResult<Option<String>> {
        Ok(self.element.attribute(name).await?)
    }

    async fn click(&self) -> ScrapeResult<()> {
        self.element.click().await?;
        Ok(())
    }

    async fn find(&self, selector: &str) -> ScrapeResult<Option<Box<dyn DomHandle>>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> ScrapeResult<Vec<Box<dyn DomHandle>>> {
        let elements = self.element.find_elements(selector).await?;
        Ok(ChromiumSession::boxed_nodes(elements))
    }
}
