//! 浏览器交互 - 基础设施层
//!
//! ## 职责
//!
//! - 定义页面会话与 DOM 节点的能力接口（`PageSession` / `DomHandle`）
//! - `headless` 模块提供 chromiumoxide 无头浏览器实现
//!
//! 能力层与流程层只依赖 trait，不接触 chromiumoxide 类型，
//! 因此整条提取流程可以用内存中的假 DOM 驱动测试。

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScrapeResult;

pub mod headless;

pub use headless::ChromiumSession;

/// 页面会话能力
///
/// 对应一次"打开页面 → 操作 DOM → 关闭"的完整生命周期。
/// 查找类操作把"元素不存在"视为正常结果（None / 空列表），
/// 只有会话本身出问题才返回错误。
#[async_trait]
pub trait PageSession: Send + Sync {
    /// 导航到指定 URL 并等待页面加载
    async fn navigate(&self, url: &str) -> ScrapeResult<()>;

    /// 轮询等待选择器命中，超时返回 false
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> ScrapeResult<bool>;

    /// 查找第一个匹配的元素
    async fn find(&self, selector: &str) -> ScrapeResult<Option<Box<dyn DomHandle>>>;

    /// 查找所有匹配的元素
    async fn find_all(&self, selector: &str) -> ScrapeResult<Vec<Box<dyn DomHandle>>>;

    /// 关闭会话并释放浏览器资源
    async fn close(self: Box<Self>) -> ScrapeResult<()>;
}

/// DOM 节点能力
#[async_trait]
pub trait DomHandle: Send + Sync {
    /// 节点内可见文本（已去除首尾空白）
    async fn text(&self) -> ScrapeResult<String>;

    /// 节点属性值，属性不存在返回 None
    async fn attr(&self, name: &str) -> ScrapeResult<Option<String>>;

    /// 点击节点
    async fn click(&self) -> ScrapeResult<()>;

    /// 在节点范围内查找第一个匹配的子元素
    async fn find(&self, selector: &str) -> ScrapeResult<Option<Box<dyn DomHandle>>>;

    /// 在节点范围内查找所有匹配的子元素
    async fn find_all(&self, selector: &str) -> ScrapeResult<Vec<Box<dyn DomHandle>>>;
}
