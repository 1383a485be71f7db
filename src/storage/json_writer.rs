//! JSON 文档快照写入
//!
//! 快照与关系型存储相互独立：关系型事务回滚不影响已写出的快照

use crate::error::CrawlError;
use crate::models::QuestionDocument;
use std::fs;
use tracing::info;

/// 把文档快照写入指定路径（pretty 格式，与下游工具的兼容面一致）
pub fn save_document(document: &QuestionDocument, path: &str) -> Result<(), CrawlError> {
    let json = serde_json::to_string_pretty(document)?;

    fs::write(path, json).map_err(|source| CrawlError::DocumentWrite {
        path: path.to_string(),
        source,
    })?;

    info!(
        "💾 文档快照已保存: {} ({} 道题目)",
        path, document.metadata.total_questions
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, ChapterKey, DocumentMetadata, Question, QuestionType};

    #[test]
    fn document_round_trips_with_compat_field_names() {
        let document = QuestionDocument {
            metadata: DocumentMetadata {
                total_questions: 1,
                crawled_at: "2026-01-01 00:00:00".to_string(),
                source: "lifeintheuktestweb.co.uk".to_string(),
            },
            questions: vec![Question {
                id: "q-1".to_string(),
                chapter: ChapterKey::Comprehensive,
                test_number: "3".to_string(),
                question_text: "What is the capital?".to_string(),
                question_type: QuestionType::Single,
                answers: vec![Answer {
                    id: "a1".to_string(),
                    text: "London".to_string(),
                    is_correct: true,
                }],
                explanation: "The correct answer is London.".to_string(),
                correct_answers: vec!["a1".to_string()],
            }],
        };

        let value = serde_json::to_value(&document).unwrap();

        // 字段名和嵌套是兼容面
        assert_eq!(value["metadata"]["total_questions"], 1);
        assert_eq!(value["metadata"]["source"], "lifeintheuktestweb.co.uk");
        let q = &value["questions"][0];
        assert!(q["chapter"].is_null());
        assert_eq!(q["question_type"], "radio");
        assert_eq!(q["answers"][0]["is_correct"], true);
        assert_eq!(q["correct_answers"][0], "a1");

        let parsed: QuestionDocument = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.questions[0].chapter, ChapterKey::Comprehensive);
    }
}
