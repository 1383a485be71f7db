//! 题目组装服务 - 业务能力层
//!
//! 把提取和推断的产物组装成一个通过校验的 Question 实体。
//! 单个候选不合格时返回跳过原因（由流程层记录并继续），
//! 绝不让一道题的失败中断同页面兄弟题目的提取

use crate::error::SkipReason;
use crate::models::{Answer, ChapterKey, Question, QuestionType};

/// 题目组装服务
pub struct QuestionAssembler;

impl QuestionAssembler {
    /// 组装并校验一道题目
    ///
    /// # 校验规则
    /// - 题干为空 → `SkipReason::EmptyQuestionText`
    /// - 答案为空 → `SkipReason::EmptyAnswers`
    /// - `correct_answers` 过滤到只含实际存在的答案 id
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        id: String,
        chapter: ChapterKey,
        test_number: String,
        question_text: String,
        answers: Vec<Answer>,
        question_type: QuestionType,
        explanation: String,
        correct_answers: Vec<String>,
    ) -> Result<Question, SkipReason> {
        if question_text.trim().is_empty() {
            return Err(SkipReason::EmptyQuestionText);
        }
        if answers.is_empty() {
            return Err(SkipReason::EmptyAnswers);
        }

        // 不变式：correct_answers ⊆ answers 的 id 集合
        let correct_answers = correct_answers
            .into_iter()
            .filter(|id| answers.iter().any(|a| &a.id == id))
            .collect();

        Ok(Question {
            id,
            chapter,
            test_number,
            question_text,
            question_type,
            answers,
            explanation,
            correct_answers,
        })
    }
}
