//! 页面内容提取服务 - 业务能力层
//!
//! ## 职责
//!
//! - 从题目页提取标题、描述正文、多语言题解代码块
//! - 单个字段缺失只降级该字段，不影响其余字段的提取
//! - 把题解代码块渲染成入库用的纯文本格式

use tracing::debug;

use crate::browser::PageSession;
use crate::error::ScrapeResult;

/// 题目标题
const TITLE: &str = "h1";
/// 描述正文容器
const DESCRIPTION_CONTAINER: &str = ".my-article-component-container";
/// 容器内按文档顺序参与拼接的文本块
const DESCRIPTION_BLOCKS: &str = "p, pre";
/// 一个题解语言对应一个工具栏分组
const SOLUTION_GROUPS: &str = "div.code-toolbar";
/// 分组内的代码块
const SOLUTION_PRE: &str = "pre";
/// 代码块内真正承载代码文本的节点
const SOLUTION_CODE: &str = "code";
/// 代码块 class 里的语言标记前缀，如 language-python
const LANGUAGE_CLASS_PREFIX: &str = "language-";

/// 单个语言的题解代码块
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionBlock {
    pub language: String,
    pub code: String,
}

/// 页面内容提取器
pub struct ContentExtractor;

impl ContentExtractor {
    /// 提取题目标题
    ///
    /// 页面上没有 h1 或文本为空时返回 None，由调用方决定兜底值
    pub async fn extract_title(session: &dyn PageSession) -> ScrapeResult<Option<String>> {
        let Some(heading) = session.find(TITLE).await? else {
            return Ok(None);
        };

        let title = heading.text().await?;
        Ok(if title.is_empty() { None } else { Some(title) })
    }

    /// 提取描述正文
    ///
    /// 按文档顺序收集容器内的段落和预格式块，非空文本用换行符拼接。
    /// 容器不存在返回 None；容器存在但没有文本块时返回空字符串。
    pub async fn extract_description(session: &dyn PageSession) -> ScrapeResult<Option<String>> {
        let Some(container) = session.find(DESCRIPTION_CONTAINER).await? else {
            return Ok(None);
        };

        let blocks = container.find_all(DESCRIPTION_BLOCKS).await?;
        let mut parts = Vec::with_capacity(blocks.len());
        for block in &blocks {
            let text = block.text().await?;
            if !text.is_empty() {
                parts.push(text);
            }
        }

        Ok(Some(parts.join("\n")))
    }

    /// 收集全部题解代码块
    ///
    /// 只收录 class 带语言标记且内部有 code 节点的代码块，
    /// 不合格的块单独跳过，不影响其余块。
    pub async fn collect_solution_blocks(
        session: &dyn PageSession,
    ) -> ScrapeResult<Vec<SolutionBlock>> {
        let groups = session.find_all(SOLUTION_GROUPS).await?;

        let mut blocks = Vec::new();
        for group in &groups {
            for pre in group.find_all(SOLUTION_PRE).await? {
                let class_attr = pre.attr("class").await?.unwrap_or_default();
                let Some(language) = parse_language_token(&class_attr) else {
                    debug!("跳过无语言标记的代码块 (class=\"{}\")", class_attr);
                    continue;
                };

                let Some(code_node) = pre.find(SOLUTION_CODE).await? else {
                    debug!("跳过缺少 code 节点的代码块 ({})", language);
                    continue;
                };

                let code = code_node.text().await?;
                debug!("✓ 收集到 {} 题解代码块", language);
                blocks.push(SolutionBlock { language, code });
            }
        }

        Ok(blocks)
    }
}

/// 把题解代码块渲染成入库文本
///
/// 每块格式为 "<语言> Solution:\n<代码>"，块之间用空行分隔
pub fn render_solution_text(blocks: &[SolutionBlock]) -> String {
    blocks
        .iter()
        .map(|block| format!("{} Solution:\n{}", block.language, block.code))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// 从 class 属性中解析语言名
///
/// 在空白分隔的 token 中找第一个 language- 前缀，
/// 后缀按首字母大写、其余小写的形式规整
fn parse_language_token(class_attr: &str) -> Option<String> {
    class_attr
        .split_whitespace()
        .find_map(|token| token.strip_prefix(LANGUAGE_CLASS_PREFIX))
        .filter(|suffix| !suffix.is_empty())
        .map(capitalize_language)
}

fn capitalize_language(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_token_is_parsed_from_class_list() {
        assert_eq!(parse_language_token("language-python"), Some("Python".to_string()));
        assert_eq!(
            parse_language_token("line-numbers language-java"),
            Some("Java".to_string())
        );
    }

    #[test]
    fn class_without_language_marker_yields_none() {
        assert_eq!(parse_language_token("plain highlighted"), None);
        assert_eq!(parse_language_token(""), None);
        // 前缀后面必须有实际语言名
        assert_eq!(parse_language_token("language-"), None);
    }

    #[test]
    fn language_name_is_capitalized() {
        assert_eq!(capitalize_language("javascript"), "Javascript");
        assert_eq!(capitalize_language("cpp"), "Cpp");
        assert_eq!(capitalize_language("JAVA"), "Java");
    }

    #[test]
    fn solution_text_joins_blocks_with_blank_line() {
        let blocks = vec![
            SolutionBlock {
                language: "Python".to_string(),
                code: "def two_sum(): ...".to_string(),
            },
            SolutionBlock {
                language: "Java".to_string(),
                code: "class Solution {}".to_string(),
            },
        ];

        let text = render_solution_text(&blocks);
        assert_eq!(
            text,
            "Python Solution:\ndef two_sum(): ...\n\nJava Solution:\nclass Solution {}"
        );
    }

    #[test]
    fn empty_block_list_renders_empty_text() {
        assert_eq!(render_solution_text(&[]), "");
    }
}
