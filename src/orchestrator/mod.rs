//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度和命令入口，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量调度器与应用入口
//! - 管理应用生命周期（初始化、运行、统计输出）
//! - 按清单顺序调度 slug，条目间随机延时
//! - 单条失败记录到失败清单，批次继续
//!
//! ### `batch_state` - 批次状态机
//! - 显式记录每个 slug 的状态（待处理 / 处理中 / 完成）
//! - 汇总批次结果（总数、成功、失败、失败清单）
//!
//! ### `problem_processor` - 单题处理器
//! - 为每道题启动和关闭独立的浏览器会话
//! - 串联抓取流程与入库
//! - 以 ProblemPipeline 接口形式暴露给调度器
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<slug>)
//!     ↓
//! problem_processor (处理单个 slug)
//!     ↓
//! workflow::ScrapeFlow (处理单个题目页)
//!     ↓
//! services (能力层：tab / extractor / failure_log)
//!     ↓
//! browser / store (基础设施：会话与持久化)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量节奏，problem_processor 管单题生命周期
//! 2. **资源隔离**：浏览器会话只在 problem_processor 内创建和销毁
//! 3. **向下依赖**：编排层 → workflow → services → browser/store
//! 4. **无业务逻辑**：只做调度和统计，不做页面内容判断

pub mod batch_processor;
pub mod batch_state;
pub mod problem_processor;

// 重新导出主要类型
pub use batch_processor::{App, BatchRunner};
pub use batch_state::{BatchItem, BatchSummary, CrawlBatch, SlugOutcome, SlugState};
pub use problem_processor::{ProblemPipeline, ProblemProcessor};
