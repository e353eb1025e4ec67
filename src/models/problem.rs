//! 题目数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::difficulty::Difficulty;

/// 标题提取失败时写入的占位值
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// 一次提取产出的完整题目记录
///
/// 字段允许部分降级：标题缺失时为占位值，描述与题解缺失时为空字符串。
/// 以 `slug` 为唯一键入库，重复抓取整体覆盖旧记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// 题目唯一标识（页面 URL 中的 slug）
    pub slug: String,
    /// 题目标题
    pub title: String,
    /// 题面描述（段落与代码块按页面顺序以换行拼接）
    pub description: String,
    /// 难度
    pub difficulty: Difficulty,
    /// 各语言题解拼接文本（无题解时为空字符串）
    pub solution_text: String,
}

/// 数据库中的题目行（含入库元数据）
#[derive(Debug, Clone)]
pub struct StoredProblem {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub solution_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 只读字段视图
///
/// 供下游消费方使用：按 slug 检索时返回展示所需的四个字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFields {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub solution_text: String,
}

/// 列表视图行
#[derive(Debug, Clone)]
pub struct ProblemSummary {
    pub slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub updated_at: DateTime<Utc>,
}
