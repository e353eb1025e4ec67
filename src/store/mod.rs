//! 题目存储 - 基础设施层
//!
//! ## 职责
//!
//! - 持有 SQLite 连接池，负责建库建表
//! - 以 slug 为唯一键幂等写入题目记录（全字段覆盖）
//! - 提供下游消费方需要的读取视图（检索 / 字段视图 / 列表 / 计数）

use std::path::Path;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult};
use crate::models::{Difficulty, ProblemFields, ProblemRecord, ProblemSummary, StoredProblem};

/// 入库结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// 新建记录
    Created,
    /// 覆盖已有记录
    Updated,
}

impl std::fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertOutcome::Created => write!(f, "新建"),
            UpsertOutcome::Updated => write!(f, "更新"),
        }
    }
}

/// 题目存储
#[derive(Clone)]
pub struct ProblemStore {
    pool: SqlitePool,
}

impl ProblemStore {
    /// 连接数据库，文件不存在时自动创建
    pub async fn connect(database_url: &str) -> ScrapeResult<Self> {
        if let Some(db_path) = database_url.strip_prefix("sqlite:") {
            if let Some(parent) = Path::new(db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(|e| ScrapeError::file(parent.display().to_string(), e))?;
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| ScrapeError::store("解析数据库地址", e))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| ScrapeError::store("连接数据库", e))?;

        debug!("✓ 已连接数据库: {}", database_url);

        Ok(Self { pool })
    }

    /// 初始化表结构（幂等，可重复执行）
    pub async fn migrate(&self) -> ScrapeResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS problems (
                slug TEXT PRIMARY KEY NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                difficulty TEXT NOT NULL DEFAULT 'easy',
                solution_text TEXT NOT NULL DEFAULT '',
                created_at DATETIME NOT NULL,
                updated_at DATETIME NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ScrapeError::store("创建 problems 表", e))?;

        debug!("✓ 数据库表结构就绪");
        Ok(())
    }

    /// 按 slug 写入题目记录
    ///
    /// slug 已存在时覆盖全部内容字段（整体替换，不做合并），
    /// 返回本次是新建还是更新。存在性检查与写入在同一事务内完成，
    /// 同一 slug 的并发写入由事务串行化。
    pub async fn upsert_problem(&self, record: &ProblemRecord) -> ScrapeResult<UpsertOutcome> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ScrapeError::upsert(&record.slug, e))?;

        let existing = sqlx::query("SELECT slug FROM problems WHERE slug = ?")
            .bind(&record.slug)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| ScrapeError::upsert(&record.slug, e))?;

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO problems (slug, title, description, difficulty, solution_text, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(slug) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                difficulty = excluded.difficulty,
                solution_text = excluded.solution_text,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.slug)
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.difficulty.as_str())
        .bind(&record.solution_text)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| ScrapeError::upsert(&record.slug, e))?;

        tx.commit()
            .await
            .map_err(|e| ScrapeError::upsert(&record.slug, e))?;

        Ok(if existing.is_some() {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Created
        })
    }

    /// 按 slug 获取完整记录
    pub async fn get_problem(&self, slug: &str) -> ScrapeResult<Option<StoredProblem>> {
        let row = sqlx::query(
            "SELECT slug, title, description, difficulty, solution_text, created_at, updated_at \
             FROM problems WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ScrapeError::store("查询题目", e))?;

        row.map(|r| Self::row_to_problem(&r))
            .transpose()
            .map_err(|e| ScrapeError::store("解析题目行", e))
    }

    /// 只读字段视图
    ///
    /// 下游的题目 API 与出题服务按 slug 消费这四个字段
    pub async fn get_problem_fields(&self, slug: &str) -> ScrapeResult<Option<ProblemFields>> {
        Ok(self.get_problem(slug).await?.map(|p| ProblemFields {
            title: p.title,
            description: p.description,
            difficulty: p.difficulty,
            solution_text: p.solution_text,
        }))
    }

    /// 列出全部题目概要（按 slug 排序）
    pub async fn list_problems(&self) -> ScrapeResult<Vec<ProblemSummary>> {
        let rows =
            sqlx::query("SELECT slug, title, difficulty, updated_at FROM problems ORDER BY slug")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| ScrapeError::store("列出题目", e))?;

        rows.iter()
            .map(|row| {
                let difficulty: String = row.try_get("difficulty")?;
                Ok(ProblemSummary {
                    slug: row.try_get("slug")?,
                    title: row.try_get("title")?,
                    difficulty: Difficulty::from_str(&difficulty).unwrap_or_default(),
                    updated_at: row.try_get("updated_at")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| ScrapeError::store("解析题目列表", e))
    }

    /// 统计已入库题目数量
    pub async fn count_problems(&self) -> ScrapeResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM problems")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ScrapeError::store("统计题目数量", e))?;

        row.try_get("count")
            .map_err(|e| ScrapeError::store("统计题目数量", e))
    }

    fn row_to_problem(row: &SqliteRow) -> Result<StoredProblem, sqlx::Error> {
        let difficulty: String = row.try_get("difficulty")?;
        Ok(StoredProblem {
            slug: row.try_get("slug")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            difficulty: Difficulty::from_str(&difficulty).unwrap_or_default(),
            solution_text: row.try_get("solution_text")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
