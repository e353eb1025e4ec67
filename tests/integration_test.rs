//! 真实站点联调测试
//!
//! 需要本机有 Chrome/Chromium 且能访问 neetcode.io，默认全部忽略

use std::time::Duration;

use scrape_neetcode::browser::{ChromiumSession, PageSession};
use scrape_neetcode::logger;
use scrape_neetcode::store::ProblemStore;
use scrape_neetcode::workflow::{ProblemCtx, ScrapeFlow, TABS_ANCHOR};
use scrape_neetcode::Config;
use tempfile::tempdir;

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_scrape_two_sum_live() {
    // 初始化日志
    let config = Config::from_env();
    let _guard = logger::init(&config);

    // 启动无头浏览器
    let session = ChromiumSession::launch(&config)
        .await
        .expect("启动无头浏览器失败");

    // 抓取 two-sum
    let flow = ScrapeFlow::new(&config);
    let ctx = ProblemCtx::new("two-sum".to_string(), 1, config.problem_url("two-sum"));
    let record = flow.run(&session, &ctx).await.expect("抓取流程失败");

    session.close().await.expect("关闭浏览器失败");

    // 线上页面应能拿到全部字段
    assert_eq!(record.title, "Two Sum");
    assert!(!record.description.is_empty(), "描述不应为空");
    assert!(
        record.solution_text.contains("Python Solution:"),
        "题解应包含 Python 代码块"
    );

    // 入库走临时数据库
    let dir = tempdir().expect("创建临时目录失败");
    let store = ProblemStore::connect(&format!("sqlite:{}/live.db", dir.path().display()))
        .await
        .expect("连接数据库失败");
    store.migrate().await.expect("初始化表结构失败");
    store.upsert_problem(&record).await.expect("入库失败");

    let fields = store
        .get_problem_fields("two-sum")
        .await
        .expect("查询失败")
        .expect("题目未入库");
    assert_eq!(fields.title, "Two Sum");
}

#[tokio::test]
#[ignore]
async fn test_browser_launch() {
    // 初始化日志
    let config = Config::from_env();
    let _guard = logger::init(&config);

    // 启动并立即关闭
    let session = ChromiumSession::launch(&config).await;
    assert!(session.is_ok(), "应该能够启动无头浏览器");

    if let Ok(session) = session {
        session.close().await.expect("关闭浏览器失败");
    }
}

#[tokio::test]
#[ignore]
async fn test_problem_page_anchor_appears() {
    // 初始化日志
    let config = Config::from_env();
    let _guard = logger::init(&config);

    let session = ChromiumSession::launch(&config)
        .await
        .expect("启动无头浏览器失败");

    // 打开题目页并等待标签栏锚点
    session
        .navigate(&config.problem_url("valid-anagram"))
        .await
        .expect("导航失败");

    let anchored = session
        .wait_for_selector(TABS_ANCHOR, Duration::from_secs(config.nav_timeout_secs))
        .await
        .expect("等待锚点出错");

    session.close().await.expect("关闭浏览器失败");

    assert!(anchored, "题目页应出现标签栏 {}", TABS_ANCHOR);
}
