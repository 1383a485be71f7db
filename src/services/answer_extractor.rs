//! 答案提取服务 - 业务能力层
//!
//! 只负责"把一个题目块变成答案候选列表 + 题型信号"，
//! 纯转换，无副作用，不关心流程

use crate::models::{Answer, QuestionType};
use crate::parser::QuestionBlock;

/// 提取结果：有序答案候选 + 题型
#[derive(Debug)]
pub struct ExtractedAnswers {
    pub answers: Vec<Answer>,
    pub question_type: QuestionType,
}

/// 答案提取服务
pub struct AnswerExtractor;

impl AnswerExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 从题目块提取答案候选和题型
    ///
    /// # 返回
    /// 答案列表子元素缺失时返回 None，调用方应跳过该题（不中断整批）。
    /// 题型判定：块内只要出现一个 checkbox 控件，整题即为多选；默认单选。
    /// 答案文本优先取 label（不含控件标记），label 缺失时取整项文本；
    /// 两者都没有时文本为空，留给审计器上报而不是报错
    pub fn extract(&self, block: &QuestionBlock<'_>) -> Option<ExtractedAnswers> {
        let items = block.answer_items()?;

        let mut answers = Vec::new();
        let mut question_type = QuestionType::Single;

        for item in items {
            // 没有 input 控件的 li 不是答案项
            if !item.has_input() {
                continue;
            }

            let answer_id = item.answer_id().unwrap_or_default().to_string();

            if item.input_type() == Some("checkbox") {
                question_type = QuestionType::Multi;
            }

            let text = item
                .label_text()
                .unwrap_or_else(|| item.full_text());

            answers.push(Answer::new(answer_id, text));
        }

        Some(ExtractedAnswers {
            answers,
            question_type,
        })
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new()
    }
}
