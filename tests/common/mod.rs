//! 测试用的内存页面会话
//!
//! 用一棵手工构造的节点树替代真实浏览器，实现与线上页面同构的
//! 标签栏 / 描述容器 / 题解代码块结构，供流程层测试使用。

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scrape_neetcode::browser::{DomHandle, PageSession};
use scrape_neetcode::error::{ScrapeError, ScrapeResult};

const ACTIVE_TAB_CLASS: &str = "my-active-tab";

struct NodeData {
    tag: String,
    classes: Vec<String>,
    text: String,
    children: Vec<usize>,
    parent: Option<usize>,
    clicks: usize,
}

/// 节点树，下标 0 固定是根节点
pub struct FakeDom {
    nodes: Vec<NodeData>,
}

impl FakeDom {
    pub const ROOT: usize = 0;

    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                tag: "html".to_string(),
                classes: Vec::new(),
                text: String::new(),
                children: Vec::new(),
                parent: None,
                clicks: 0,
            }],
        }
    }

    /// 追加一个子节点，classes 用空格分隔
    pub fn add_node(&mut self, parent: usize, tag: &str, classes: &str, text: &str) -> usize {
        let index = self.nodes.len();
        self.nodes.push(NodeData {
            tag: tag.to_string(),
            classes: classes.split_whitespace().map(|c| c.to_string()).collect(),
            text: text.to_string(),
            children: Vec::new(),
            parent: Some(parent),
            clicks: 0,
        });
        self.nodes[parent].children.push(index);
        index
    }

    /// 按文档顺序返回 root 的后代中命中选择器的节点
    fn query(&self, root: usize, selector: &str) -> Vec<usize> {
        let mut descendants = Vec::new();
        self.collect_descendants(root, &mut descendants);
        descendants
            .into_iter()
            .filter(|&i| self.matches_selector(i, selector))
            .collect()
    }

    fn collect_descendants(&self, root: usize, out: &mut Vec<usize>) {
        for &child in &self.nodes[root].children {
            out.push(child);
            self.collect_descendants(child, out);
        }
    }

    /// 逗号分隔的选择器列表，命中任意一条即算命中
    fn matches_selector(&self, idx: usize, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .any(|chain| self.matches_chain(idx, chain))
    }

    /// 空格分隔的后代链，右端命中当前节点，其余部分沿祖先链匹配
    fn matches_chain(&self, idx: usize, chain: &str) -> bool {
        let mut parts: Vec<&str> = chain.split_whitespace().collect();
        let Some(last) = parts.pop() else {
            return false;
        };
        if !self.matches_simple(idx, last) {
            return false;
        }

        let mut current = self.nodes[idx].parent;
        while let Some(part) = parts.pop() {
            let mut found = false;
            while let Some(p) = current {
                current = self.nodes[p].parent;
                if self.matches_simple(p, part) {
                    found = true;
                    break;
                }
            }
            if !found {
                return false;
            }
        }
        true
    }

    /// 简单选择器：可选标签名加若干 .class
    fn matches_simple(&self, idx: usize, simple: &str) -> bool {
        let mut segments = simple.split('.');
        let tag = segments.next().unwrap_or_default();
        let node = &self.nodes[idx];

        if !tag.is_empty() && node.tag != tag {
            return false;
        }
        segments.all(|class| node.classes.iter().any(|c| c == class))
    }

    /// 自身文本加全部后代文本，块之间以换行拼接
    fn deep_text(&self, idx: usize) -> String {
        let mut parts = Vec::new();
        self.collect_text(idx, &mut parts);
        parts.join("\n").trim().to_string()
    }

    fn collect_text(&self, idx: usize, out: &mut Vec<String>) {
        let node = &self.nodes[idx];
        if !node.text.is_empty() {
            out.push(node.text.clone());
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }

    fn class_attr(&self, idx: usize) -> Option<String> {
        let classes = &self.nodes[idx].classes;
        if classes.is_empty() {
            None
        } else {
            Some(classes.join(" "))
        }
    }

    /// 点击标签文本节点时，把激活 class 移到所在的 li 上
    fn click(&mut self, idx: usize) {
        self.nodes[idx].clicks += 1;

        if self.nodes[idx].tag != "span" {
            return;
        }
        let Some(li) = self.nodes[idx].parent.filter(|&p| self.nodes[p].tag == "li") else {
            return;
        };
        let Some(ul) = self.nodes[li].parent else {
            return;
        };

        let siblings = self.nodes[ul].children.clone();
        for sibling in siblings {
            self.nodes[sibling].classes.retain(|c| c != ACTIVE_TAB_CLASS);
        }
        self.nodes[li].classes.push(ACTIVE_TAB_CLASS.to_string());
    }
}

/// 题目页搭建器，按线上页面的结构拼节点树
pub struct PageFixture {
    dom: FakeDom,
    body: usize,
}

impl PageFixture {
    pub fn new() -> Self {
        let mut dom = FakeDom::new();
        let body = dom.add_node(FakeDom::ROOT, "body", "", "");
        Self { dom, body }
    }

    /// 标签栏，active 指定初始激活的标签
    pub fn with_tabs(mut self, active: &str, labels: &[&str]) -> Self {
        let ul = self.dom.add_node(self.body, "ul", "tabs-list", "");
        for label in labels {
            let li_class = if *label == active { ACTIVE_TAB_CLASS } else { "" };
            let li = self.dom.add_node(ul, "li", li_class, "");
            self.dom.add_node(li, "span", "", label);
        }
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.dom.add_node(self.body, "h1", "", title);
        self
    }

    /// 描述容器，blocks 是 (标签名, 文本) 的有序列表
    pub fn with_description(mut self, blocks: &[(&str, &str)]) -> Self {
        let container = self
            .dom
            .add_node(self.body, "div", "my-article-component-container", "");
        for (tag, text) in blocks {
            self.dom.add_node(container, tag, "", text);
        }
        self
    }

    /// 一个完整的题解代码块：code-toolbar > pre > code
    pub fn with_solution(mut self, pre_class: &str, code: &str) -> Self {
        let toolbar = self.dom.add_node(self.body, "div", "code-toolbar", "");
        let pre = self.dom.add_node(toolbar, "pre", pre_class, "");
        self.dom.add_node(pre, "code", "", code);
        self
    }

    /// 缺少 code 子节点的题解代码块，文本直接挂在 pre 上
    pub fn with_codeless_solution(mut self, pre_class: &str, text: &str) -> Self {
        let toolbar = self.dom.add_node(self.body, "div", "code-toolbar", "");
        self.dom.add_node(toolbar, "pre", pre_class, text);
        self
    }

    pub fn session(self) -> FakeSession {
        FakeSession::new(self.dom)
    }
}

/// 内存页面会话
pub struct FakeSession {
    dom: Arc<Mutex<FakeDom>>,
    navigated: Mutex<Vec<String>>,
    fail_navigation: bool,
}

impl FakeSession {
    pub fn new(dom: FakeDom) -> Self {
        Self {
            dom: Arc::new(Mutex::new(dom)),
            navigated: Mutex::new(Vec::new()),
            fail_navigation: false,
        }
    }

    /// 让 navigate 直接报会话错误，模拟连接层故障
    pub fn with_broken_navigation(mut self) -> Self {
        self.fail_navigation = true;
        self
    }

    /// 访问过的地址列表
    pub fn visited(&self) -> Vec<String> {
        self.navigated.lock().unwrap().clone()
    }

    /// 指定标签文本节点被点击的次数
    pub fn tab_click_count(&self, label: &str) -> usize {
        let dom = self.dom.lock().unwrap();
        dom.query(FakeDom::ROOT, "ul.tabs-list li span")
            .into_iter()
            .find(|&i| dom.deep_text(i) == label)
            .map(|i| dom.nodes[i].clicks)
            .unwrap_or(0)
    }

    fn handle(&self, index: usize) -> Box<dyn DomHandle> {
        Box::new(FakeHandle {
            dom: Arc::clone(&self.dom),
            index,
        })
    }
}

#[async_trait]
impl PageSession for FakeSession {
    async fn navigate(&self, url: &str) -> ScrapeResult<()> {
        if self.fail_navigation {
            return Err(ScrapeError::session("导航失败: 连接被重置"));
        }
        self.navigated.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> ScrapeResult<bool> {
        Ok(!self.dom.lock().unwrap().query(FakeDom::ROOT, selector).is_empty())
    }

    async fn find(&self, selector: &str) -> ScrapeResult<Option<Box<dyn DomHandle>>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> ScrapeResult<Vec<Box<dyn DomHandle>>> {
        let indices = self.dom.lock().unwrap().query(FakeDom::ROOT, selector);
        Ok(indices.into_iter().map(|i| self.handle(i)).collect())
    }

    async fn close(self: Box<Self>) -> ScrapeResult<()> {
        Ok(())
    }
}

struct FakeHandle {
    dom: Arc<Mutex<FakeDom>>,
    index: usize,
}

#[async_trait]
impl DomHandle for FakeHandle {
    async fn text(&self) -> ScrapeResult<String> {
        Ok(self.dom.lock().unwrap().deep_text(self.index))
    }

    async fn attr(&self, name: &str) -> ScrapeResult<Option<String>> {
        if name == "class" {
            Ok(self.dom.lock().unwrap().class_attr(self.index))
        } else {
            Ok(None)
        }
    }

    async fn click(&self) -> ScrapeResult<()> {
        self.dom.lock().unwrap().click(self.index);
        Ok(())
    }

    async fn find(&self, selector: &str) -> ScrapeResult<Option<Box<dyn DomHandle>>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    async fn find_all(&self, selector: &str) -> ScrapeResult<Vec<Box<dyn DomHandle>>> {
        let indices = self.dom.lock().unwrap().query(self.index, selector);
        Ok(indices
            .into_iter()
            .map(|i| {
                Box::new(FakeHandle {
                    dom: Arc::clone(&self.dom),
                    index: i,
                }) as Box<dyn DomHandle>
            })
            .collect())
    }
}
