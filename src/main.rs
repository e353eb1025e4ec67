use anyhow::Result;
use clap::{Parser, Subcommand};

use scrape_neetcode::{logger, App, Config};

/// NeetCode 题目抓取器
#[derive(Parser)]
#[command(name = "scrape_neetcode", version, about = "抓取 NeetCode 题目并写入本地题库")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 抓取单个题目并入库
    Scrape {
        /// 题目 slug，如 two-sum
        slug: String,
    },
    /// 按 slug 清单文件批量抓取
    ScrapeAll,
    /// 查看已入库题目的字段视图
    Show {
        /// 题目 slug
        slug: String,
    },
    /// 列出已入库的全部题目
    List,
    /// 环境自检（浏览器启动 + 站点连通性）
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    // 初始化日志，guard 保证退出前刷完文件缓冲
    let _log_guard = logger::init(&config);

    // 初始化并分发命令
    let app = App::initialize(config).await?;
    match cli.command {
        Command::Scrape { slug } => app.scrape_one(&slug).await?,
        Command::ScrapeAll => {
            app.run_batch().await?;
        }
        Command::Show { slug } => app.show(&slug).await?,
        Command::List => app.list().await?,
        Command::Doctor => app.doctor().await?,
    }

    Ok(())
}
