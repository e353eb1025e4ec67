use thiserror::Error;

/// 抓取流程错误类型
///
/// 错误分级约定：
/// - `Session` / `Upsert`：当前题目按失败处理，批次继续
/// - `NavigationTimeout` / `ElementNotFound`：字段级降级，仅在环境检查（doctor）中视为硬错误
/// - `Store` / `File`：启动阶段错误，直接向上传播
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// 浏览器会话无法建立或中途崩溃
    #[error("浏览器会话错误: {message}")]
    Session {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// 等待页面锚点元素超时
    #[error("等待元素 {selector} 超时 ({timeout_secs} 秒)")]
    NavigationTimeout { selector: String, timeout_secs: u64 },

    /// 必需的页面元素不存在
    #[error("未找到页面元素: {selector}")]
    ElementNotFound { selector: String },

    /// 题目写入数据库失败
    #[error("题目入库失败 ({slug}): {source}")]
    Upsert {
        slug: String,
        #[source]
        source: sqlx::Error,
    },

    /// 数据库连接、建表或查询失败
    #[error("数据库操作失败 ({operation}): {source}")]
    Store {
        operation: String,
        #[source]
        source: sqlx::Error,
    },

    /// 文件读写失败
    #[error("文件操作失败 ({path}): {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl ScrapeError {
    /// 创建浏览器会话错误（无底层错误）
    pub fn session(message: impl Into<String>) -> Self {
        ScrapeError::Session {
            message: message.into(),
            source: None,
        }
    }

    /// 创建浏览器会话错误（携带底层错误）
    pub fn session_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ScrapeError::Session {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// 创建锚点等待超时错误
    pub fn navigation_timeout(selector: impl Into<String>, timeout_secs: u64) -> Self {
        ScrapeError::NavigationTimeout {
            selector: selector.into(),
            timeout_secs,
        }
    }

    /// 创建元素缺失错误
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        ScrapeError::ElementNotFound {
            selector: selector.into(),
        }
    }

    /// 创建入库失败错误
    pub fn upsert(slug: impl Into<String>, source: sqlx::Error) -> Self {
        ScrapeError::Upsert {
            slug: slug.into(),
            source,
        }
    }

    /// 创建数据库操作错误
    pub fn store(operation: impl Into<String>, source: sqlx::Error) -> Self {
        ScrapeError::Store {
            operation: operation.into(),
            source,
        }
    }

    /// 创建文件操作错误
    pub fn file(path: impl Into<String>, source: std::io::Error) -> Self {
        ScrapeError::File {
            path: path.into(),
            source,
        }
    }
}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<ScrapeError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<chromiumoxide::error::CdpError> for ScrapeError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ScrapeError::Session {
            message: "CDP 协议通信失败".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// ========== Result 类型别名 ==========

/// 抓取流程结果类型
pub type ScrapeResult<T> = Result<T, ScrapeError>;
