//! 解析层（Markup Parser Adapter）
//!
//! 包装通用的 HTML 文档树（scraper），对外只暴露类型化查询：
//! "找所有题目块 / 找块内答案项 / 找解释块"。
//! 解析本身永不失败：畸形或空白输入产出零个题目块，而不是错误

pub mod question_block;

pub use question_block::{AnswerItem, ExplanationBlock, PageDocument, QuestionBlock};
