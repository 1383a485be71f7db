//! 测试页面的类型化查询视图
//!
//! 源站的结构约定（来自目标站点的标记惯例）：
//! - 题目块：`div.container_question`，题目 id 在 `data-id_question` 属性
//! - 题干：块内 `div.question`
//! - 答案列表：`ul.container_answer`，每项一个 `li`，
//!   内含 `input`（`data-id_answer` + `type`）和可选的 `label`
//! - 解释块：`div.container_explication`，强调片段为其中的 `strong`

use crate::error::CrawlError;
use scraper::{ElementRef, Html, Selector};

/// 构建单个 CSS 选择器
fn selector(source: &str) -> Result<Selector, CrawlError> {
    Selector::parse(source).map_err(|e| CrawlError::Selector {
        selector: source.to_string(),
        message: e.to_string(),
    })
}

/// 收集元素的全部文本并归一化空白
///
/// input 控件没有文本内容，所以 label 文本天然不含控件痕迹
fn normalized_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 页面结构选择器集合（构建一次，整页复用）
struct Selectors {
    question_block: Selector,
    question_text: Selector,
    answer_list: Selector,
    answer_item: Selector,
    input: Selector,
    label: Selector,
    explanation: Selector,
    emphasis: Selector,
}

impl Selectors {
    fn new() -> Result<Self, CrawlError> {
        Ok(Self {
            question_block: selector("div.container_question")?,
            question_text: selector("div.question")?,
            answer_list: selector("ul.container_answer")?,
            answer_item: selector("li")?,
            input: selector("input")?,
            label: selector("label")?,
            explanation: selector("div.container_explication")?,
            emphasis: selector("strong")?,
        })
    }
}

/// 一个测试页面的已解析文档
pub struct PageDocument {
    html: Html,
    selectors: Selectors,
}

impl PageDocument {
    /// 解析原始 HTML
    ///
    /// 畸形输入不报错：后续查询只会返回更少的块
    pub fn parse(raw_html: &str) -> Result<Self, CrawlError> {
        Ok(Self {
            html: Html::parse_document(raw_html),
            selectors: Selectors::new()?,
        })
    }

    /// 找出页面中的所有题目块
    pub fn question_blocks(&self) -> Vec<QuestionBlock<'_>> {
        self.html
            .select(&self.selectors.question_block)
            .map(|root| QuestionBlock {
                root,
                selectors: &self.selectors,
            })
            .collect()
    }
}

/// 单个题目块的类型化视图
pub struct QuestionBlock<'a> {
    root: ElementRef<'a>,
    selectors: &'a Selectors,
}

impl<'a> QuestionBlock<'a> {
    /// 题目的稳定标识属性
    pub fn question_id(&self) -> Option<&'a str> {
        self.root.value().attr("data-id_question")
    }

    /// 题干文本（子元素缺失时为 None）
    pub fn question_text(&self) -> Option<String> {
        self.root
            .select(&self.selectors.question_text)
            .next()
            .map(|el| normalized_text(&el))
    }

    /// 答案项列表（答案列表子元素缺失时为 None，调用方应跳过该题）
    pub fn answer_items(&self) -> Option<Vec<AnswerItem<'a>>> {
        let list = self.root.select(&self.selectors.answer_list).next()?;
        Some(
            list.select(&self.selectors.answer_item)
                .map(|li| AnswerItem {
                    li,
                    selectors: self.selectors,
                })
                .collect(),
        )
    }

    /// 解释块（可选）
    pub fn explanation(&self) -> Option<ExplanationBlock<'a>> {
        self.root
            .select(&self.selectors.explanation)
            .next()
            .map(|root| ExplanationBlock {
                root,
                selectors: self.selectors,
            })
    }
}

/// 单个答案项（`li`）的类型化视图
pub struct AnswerItem<'a> {
    li: ElementRef<'a>,
    selectors: &'a Selectors,
}

impl<'a> AnswerItem<'a> {
    fn input(&self) -> Option<ElementRef<'a>> {
        self.li.select(&self.selectors.input).next()
    }

    /// 是否含有 input 控件（没有控件的项不是答案）
    pub fn has_input(&self) -> bool {
        self.input().is_some()
    }

    /// 答案的稳定标识属性
    pub fn answer_id(&self) -> Option<&'a str> {
        self.input().and_then(|el| el.value().attr("data-id_answer"))
    }

    /// input 控件声明的类型（radio / checkbox）
    pub fn input_type(&self) -> Option<&'a str> {
        self.input().and_then(|el| el.value().attr("type"))
    }

    /// label 文本（不含控件自身的标记）
    pub fn label_text(&self) -> Option<String> {
        self.li
            .select(&self.selectors.label)
            .next()
            .map(|el| normalized_text(&el))
    }

    /// 整个答案项的文本（label 缺失时的兜底）
    pub fn full_text(&self) -> String {
        normalized_text(&self.li)
    }
}

/// 解释块的类型化视图
pub struct ExplanationBlock<'a> {
    root: ElementRef<'a>,
    selectors: &'a Selectors,
}

impl ExplanationBlock<'_> {
    /// 解释全文
    pub fn text(&self) -> String {
        normalized_text(&self.root)
    }

    /// 所有强调片段（`strong`）的文本
    pub fn emphasized_fragments(&self) -> Vec<String> {
        self.root
            .select(&self.selectors.emphasis)
            .map(|el| normalized_text(&el))
            .filter(|text| !text.is_empty())
            .collect()
    }
}
