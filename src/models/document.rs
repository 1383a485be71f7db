//! 可移植 JSON 文档形式
//!
//! 字段名和嵌套结构是对下游工具的兼容面，不能随意改动

use crate::models::question::Question;
use serde::{Deserialize, Serialize};

/// 文档元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub total_questions: usize,
    pub crawled_at: String,
    pub source: String,
}

/// 一次采集运行的文档快照
///
/// 快照由内存模型重新生成，不从数据库导出；与关系型存储是兄弟关系，
/// 需要一致性时必须由同一次流水线运行同时产出两者
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDocument {
    pub metadata: DocumentMetadata,
    pub questions: Vec<Question>,
}
