//! 领域模型：Answer / Question / QuestionType / ChapterKey

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 单个答案选项
///
/// 身份由 (question_id, id) 共同确定；`is_correct` 只在推断阶段可变，
/// 之后即冻结
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

impl Answer {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_correct: false,
        }
    }
}

/// 题目类型
///
/// 由源页面 input 控件的类型决定（radio = 单选，checkbox = 多选），
/// 与推断出的正确答案数量无关。序列化值保持与源站 / 数据库枚举一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "radio")]
    Single,
    #[serde(rename = "checkbox")]
    Multi,
}

impl QuestionType {
    /// 数据库枚举值
    pub fn as_db_str(&self) -> &'static str {
        match self {
            QuestionType::Single => "radio",
            QuestionType::Multi => "checkbox",
        }
    }
}

/// 章节分组键
///
/// 在采集入口处一次性解析，之后全程携带统一的带标签值，
/// 不再混用 `None` 和字面量 "comprehensive"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChapterKey {
    /// 综合测试（不属于任何章节）
    Comprehensive,
    /// 具名章节
    Named(String),
}

impl ChapterKey {
    /// 从源数据解析章节键
    ///
    /// 空字符串、空白和字面量 "comprehensive" 都归一为综合测试
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            None => ChapterKey::Comprehensive,
            Some(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("comprehensive") {
                    ChapterKey::Comprehensive
                } else {
                    ChapterKey::Named(trimmed.to_string())
                }
            }
        }
    }

    /// 章节行名称；综合测试没有章节行
    pub fn name(&self) -> Option<&str> {
        match self {
            ChapterKey::Comprehensive => None,
            ChapterKey::Named(name) => Some(name),
        }
    }

    pub fn is_comprehensive(&self) -> bool {
        matches!(self, ChapterKey::Comprehensive)
    }
}

impl fmt::Display for ChapterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterKey::Comprehensive => write!(f, "comprehensive"),
            ChapterKey::Named(name) => write!(f, "{}", name),
        }
    }
}

// JSON 文档兼容面：chapter 字段为字符串或 null（综合测试）
impl Serialize for ChapterKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ChapterKey::Comprehensive => serializer.serialize_none(),
            ChapterKey::Named(name) => serializer.serialize_some(name),
        }
    }
}

impl<'de> Deserialize<'de> for ChapterKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(ChapterKey::from_raw(raw.as_deref()))
    }
}

/// 一道完整的题目
///
/// 不变式：`correct_answers` 中的每个 id 必须出现在 `answers` 中；
/// `answers` 非空（否则在组装阶段被丢弃）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub chapter: ChapterKey,
    pub test_number: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub answers: Vec<Answer>,
    pub explanation: String,
    /// 推断出的正确答案 id 列表（首次出现顺序，无重复）
    pub correct_answers: Vec<String>,
}

impl Question {
    /// 是否已推断出至少一个正确答案
    pub fn is_resolved(&self) -> bool {
        !self.correct_answers.is_empty()
    }
}
