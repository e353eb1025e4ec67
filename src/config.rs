/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 题目站点基础 URL（slug 追加在末尾）
    pub base_url: String,
    /// Chrome/Chromium 可执行文件路径（None 时自动探测）
    pub chrome_executable: Option<String>,
    /// 固定 User-Agent（避免无头浏览器被识别为爬虫）
    pub user_agent: String,
    /// 等待页面锚点元素的超时时间（秒）
    pub nav_timeout_secs: u64,
    /// 标签页切换后的等待时间（秒）
    pub tab_settle_secs: u64,
    /// 批量抓取时相邻题目间的最小休眠时间（秒）
    pub delay_min_secs: f64,
    /// 批量抓取时相邻题目间的最大休眠时间（秒）
    pub delay_max_secs: f64,
    /// slug 列表文件路径
    pub slugs_file: String,
    /// 题目库数据库地址
    pub database_url: String,
    /// 输出日志文件
    pub log_file: String,
    /// 批量失败清单文件
    pub failure_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://neetcode.io/problems".to_string(),
            chrome_executable: None,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.6778.70 Safari/537.36".to_string(),
            nav_timeout_secs: 20,
            tab_settle_secs: 2,
            delay_min_secs: 2.0,
            delay_max_secs: 5.0,
            slugs_file: "slugs.txt".to_string(),
            database_url: "sqlite:problems.db".to_string(),
            log_file: "scrape_neetcode.log".to_string(),
            failure_file: "failed_slugs.txt".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("NEETCODE_BASE_URL").unwrap_or(default.base_url),
            chrome_executable: std::env::var("CHROME_PATH").ok().or(default.chrome_executable),
            user_agent: std::env::var("SCRAPER_USER_AGENT").unwrap_or(default.user_agent),
            nav_timeout_secs: std::env::var("NAV_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.nav_timeout_secs),
            tab_settle_secs: std::env::var("TAB_SETTLE_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.tab_settle_secs),
            delay_min_secs: std::env::var("DELAY_MIN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.delay_min_secs),
            delay_max_secs: std::env::var("DELAY_MAX_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.delay_max_secs),
            slugs_file: std::env::var("SLUGS_FILE").unwrap_or(default.slugs_file),
            database_url: std::env::var("DATABASE_URL").unwrap_or(default.database_url),
            log_file: std::env::var("LOG_FILE").unwrap_or(default.log_file),
            failure_file: std::env::var("FAILURE_FILE").unwrap_or(default.failure_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 拼接单个题目的完整页面 URL
    pub fn problem_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), slug)
    }
}
