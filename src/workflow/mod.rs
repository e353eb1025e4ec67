//! 流程层 - 业务流程的编排与组装
//!
//! 定义"一道题怎么抓"，不关心批次调度，也不持有浏览器资源

pub mod problem_ctx;
pub mod scrape_flow;

pub use problem_ctx::ProblemCtx;
pub use scrape_flow::{ScrapeFlow, TABS_ANCHOR};
