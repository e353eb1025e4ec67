//! 业务能力层 - 单一职责的可复用服务
//!
//! 每个服务只做一件事，不关心调用顺序，由流程层负责编排

pub mod extractor;
pub mod failure_log;
pub mod tab_driver;

pub use extractor::{render_solution_text, ContentExtractor, SolutionBlock};
pub use failure_log::FailureLog;
pub use tab_driver::TabDriver;
