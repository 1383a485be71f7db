//! 数据质量审计服务 - 业务能力层
//!
//! 对归一化文档做只读分析，上报覆盖缺口：
//! - 未能推断出正确答案的题目
//! - 跨章节/测试的重复题干
//! - 综合测试编号的覆盖缺口
//!
//! 审计只产出报告，永不改变状态、永不让流水线失败——
//! 内容缺口是预期中的事，需要被看见而不是被当成致命错误

use crate::models::{ChapterKey, Question, QuestionDocument, QuestionType};
use std::collections::{HashMap, HashSet};

/// 题目在语料中的位置
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionLocation {
    pub chapter: ChapterKey,
    pub test_number: String,
    pub question_id: String,
}

impl QuestionLocation {
    fn of(question: &Question) -> Self {
        Self {
            chapter: question.chapter.clone(),
            test_number: question.test_number.clone(),
            question_id: question.id.clone(),
        }
    }
}

/// 一组题干相同的题目
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub question_text: String,
    pub occurrences: Vec<QuestionLocation>,
}

/// 语料统计（固定的具名计数器，报告结构编译期可查）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    pub total_questions: usize,
    pub single_choice: usize,
    pub multi_choice: usize,
    pub with_explanation: usize,
    pub with_correct_answers: usize,
    pub comprehensive_questions: usize,
    pub chapter_questions: usize,
    pub empty_answer_texts: usize,
}

/// 数据质量审计器（只读）
pub struct DataQualityAuditor<'a> {
    document: &'a QuestionDocument,
}

impl<'a> DataQualityAuditor<'a> {
    pub fn new(document: &'a QuestionDocument) -> Self {
        Self { document }
    }

    /// 所有未推断出正确答案的题目
    pub fn missing_correct_answers(&self) -> Vec<QuestionLocation> {
        self.document
            .questions
            .iter()
            .filter(|q| !q.is_resolved())
            .map(QuestionLocation::of)
            .collect()
    }

    /// 题干归一化（小写 + 去首尾空白）后相同的题目分组
    ///
    /// 跨章节/测试边界比较；只上报出现次数 ≥ 2 的组，
    /// 组顺序和组内顺序均为首次出现顺序
    pub fn duplicate_questions(&self) -> Vec<DuplicateGroup> {
        let mut group_index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<DuplicateGroup> = Vec::new();

        for question in &self.document.questions {
            let normalized = question.question_text.trim().to_lowercase();
            let index = *group_index.entry(normalized.clone()).or_insert_with(|| {
                groups.push(DuplicateGroup {
                    question_text: normalized,
                    occurrences: Vec::new(),
                });
                groups.len() - 1
            });
            groups[index].occurrences.push(QuestionLocation::of(question));
        }

        groups.retain(|g| g.occurrences.len() >= 2);
        groups
    }

    /// 综合测试覆盖缺口
    ///
    /// # 返回
    /// 1..=expected 中在语料里缺席的测试编号，升序
    pub fn comprehensive_coverage(&self, expected: u32) -> Vec<u32> {
        let present: HashSet<u32> = self
            .document
            .questions
            .iter()
            .filter(|q| q.chapter.is_comprehensive())
            .filter_map(|q| q.test_number.parse().ok())
            .collect();

        (1..=expected).filter(|n| !present.contains(n)).collect()
    }

    /// 语料统计
    pub fn stats(&self) -> CorpusStats {
        let mut stats = CorpusStats::default();
        for question in &self.document.questions {
            stats.total_questions += 1;
            match question.question_type {
                QuestionType::Single => stats.single_choice += 1,
                QuestionType::Multi => stats.multi_choice += 1,
            }
            if !question.explanation.is_empty() {
                stats.with_explanation += 1;
            }
            if question.is_resolved() {
                stats.with_correct_answers += 1;
            }
            if question.chapter.is_comprehensive() {
                stats.comprehensive_questions += 1;
            } else {
                stats.chapter_questions += 1;
            }
            stats.empty_answer_texts += question
                .answers
                .iter()
                .filter(|a| a.text.trim().is_empty())
                .count();
        }
        stats
    }
}
