//! 批量归一化服务 - 业务能力层
//!
//! 把整次采集的题目聚合成两个并列产物：
//! - 可移植的 JSON 文档快照（不做任何题目去重——重复是数据质量信号，
//!   留给审计器上报，写入时静默去重会掩盖它）
//! - 关系型写入计划：章节 → 测试 → 题目 → 答案，顺序固定，
//!   因为后面的表通过外键引用前面的表

use crate::models::{ChapterKey, DocumentMetadata, Question, QuestionDocument};

/// 计划中的一个测试行（按 (chapter, test_number) 唯一）
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedTest {
    pub chapter: ChapterKey,
    pub test_number: String,
    pub title: String,
}

/// 计划中的一道题目（通过下标引用所属测试）
#[derive(Debug, Clone)]
pub struct PlannedQuestion {
    pub test_index: usize,
    pub question: Question,
}

/// 关系型写入计划
///
/// 插入顺序固定为 chapters → tests → questions → answers；
/// 章节按名称唯一、测试按 (chapter, test_number) 唯一（均首次出现顺序），
/// 题目不去重
#[derive(Debug, Clone)]
pub struct WritePlan {
    pub chapters: Vec<String>,
    pub tests: Vec<PlannedTest>,
    pub questions: Vec<PlannedQuestion>,
}

/// 归一化一批题目，产出文档快照和写入计划
pub fn normalize(questions: Vec<Question>, source: &str) -> (QuestionDocument, WritePlan) {
    let mut chapters: Vec<String> = Vec::new();
    let mut tests: Vec<PlannedTest> = Vec::new();
    let mut planned_questions: Vec<PlannedQuestion> = Vec::new();

    for question in &questions {
        if let ChapterKey::Named(name) = &question.chapter {
            if !chapters.iter().any(|c| c == name) {
                chapters.push(name.clone());
            }
        }

        let test_index = tests
            .iter()
            .position(|t| t.chapter == question.chapter && t.test_number == question.test_number)
            .unwrap_or_else(|| {
                tests.push(PlannedTest {
                    chapter: question.chapter.clone(),
                    test_number: question.test_number.clone(),
                    title: test_title(&question.chapter, &question.test_number),
                });
                tests.len() - 1
            });

        planned_questions.push(PlannedQuestion {
            test_index,
            question: question.clone(),
        });
    }

    let document = QuestionDocument {
        metadata: DocumentMetadata {
            total_questions: questions.len(),
            crawled_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            source: source.to_string(),
        },
        questions,
    };

    let plan = WritePlan {
        chapters,
        tests,
        questions: planned_questions,
    };

    (document, plan)
}

fn test_title(chapter: &ChapterKey, test_number: &str) -> String {
    match chapter {
        ChapterKey::Comprehensive => format!("Life in the UK Test {}", test_number),
        ChapterKey::Named(name) => format!("{} - Test {}", name, test_number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, QuestionType};

    fn question(id: &str, chapter: ChapterKey, test_number: &str, text: &str) -> Question {
        Question {
            id: id.to_string(),
            chapter,
            test_number: test_number.to_string(),
            question_text: text.to_string(),
            question_type: QuestionType::Single,
            answers: vec![Answer::new("a1", "London")],
            explanation: String::new(),
            correct_answers: vec![],
        }
    }

    #[test]
    fn chapters_and_tests_are_unique_in_first_seen_order() {
        let questions = vec![
            question("q1", ChapterKey::Named("chapter_2".into()), "1", "A?"),
            question("q2", ChapterKey::Named("chapter_1".into()), "1", "B?"),
            question("q3", ChapterKey::Named("chapter_2".into()), "1", "C?"),
            question("q4", ChapterKey::Comprehensive, "1", "D?"),
        ];

        let (_, plan) = normalize(questions, "test");

        assert_eq!(plan.chapters, vec!["chapter_2", "chapter_1"]);
        // 综合测试与 chapter_2 的 test 1 是不同的测试
        assert_eq!(plan.tests.len(), 3);
        assert_eq!(plan.tests[0].chapter, ChapterKey::Named("chapter_2".into()));
        assert_eq!(plan.tests[2].chapter, ChapterKey::Comprehensive);
    }

    #[test]
    fn questions_are_never_deduplicated() {
        let questions = vec![
            question("q1", ChapterKey::Comprehensive, "1", "Same text?"),
            question("q1", ChapterKey::Comprehensive, "1", "Same text?"),
        ];

        let (document, plan) = normalize(questions, "test");

        assert_eq!(document.questions.len(), 2);
        assert_eq!(plan.questions.len(), 2);
        assert_eq!(plan.tests.len(), 1);
        assert_eq!(plan.questions[0].test_index, plan.questions[1].test_index);
    }

    #[test]
    fn document_metadata_reflects_batch() {
        let questions = vec![question("q1", ChapterKey::Comprehensive, "7", "A?")];
        let (document, _) = normalize(questions, "lifeintheuktestweb.co.uk");

        assert_eq!(document.metadata.total_questions, 1);
        assert_eq!(document.metadata.source, "lifeintheuktestweb.co.uk");
        assert!(!document.metadata.crawled_at.is_empty());
    }

    #[test]
    fn comprehensive_tests_have_no_chapter_row() {
        let questions = vec![question("q1", ChapterKey::Comprehensive, "3", "A?")];
        let (_, plan) = normalize(questions, "test");

        assert!(plan.chapters.is_empty());
        assert_eq!(plan.tests[0].title, "Life in the UK Test 3");
    }
}
