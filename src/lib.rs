//! # Scrape NeetCode
//!
//! 一个把 NeetCode 题目抓取入库的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 持有稀缺资源（无头浏览器会话），只暴露能力
//! - `ChromiumSession` - 唯一的浏览器 owner，按 PageSession 接口提供导航与查询
//! - `store/` - SQLite 持久化，按 slug 幂等写入题目
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个页面动作
//! - `TabDriver` - 标签页定位与切换能力
//! - `ContentExtractor` - 标题 / 描述 / 题解提取能力
//! - `FailureLog` - 写失败清单能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整抓取流程
//! - `ProblemCtx` - 上下文封装（slug + 批次序号 + 页面地址）
//! - `ScrapeFlow` - 流程编排（导航 → Question → Solution → 组装记录）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量调度器与命令入口，控制节奏
//! - `orchestrator/problem_processor` - 单题处理器，管理会话生命周期
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod store;
pub mod workflow;

// 重新导出常用类型
pub use browser::{ChromiumSession, DomHandle, PageSession};
pub use config::Config;
pub use error::{ScrapeError, ScrapeResult};
pub use models::{Difficulty, ProblemFields, ProblemRecord, StoredProblem, UNKNOWN_TITLE};
pub use orchestrator::{App, BatchRunner, BatchSummary, CrawlBatch, ProblemPipeline};
pub use store::{ProblemStore, UpsertOutcome};
pub use workflow::{ProblemCtx, ScrapeFlow};
