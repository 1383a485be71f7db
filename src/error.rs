//! 错误类型定义
//!
//! 两类失败走两条路径：
//! - `CrawlError` - 真正的错误（网络 / 存储 / 文档写入），沿调用链向上传播
//! - `SkipReason` - 单个题目的跳过原因，聚合进页面报告，绝不中断整批处理

use std::fmt;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum CrawlError {
    /// 页面请求失败
    #[error("页面请求失败 ({url}): {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP 客户端构建失败
    #[error("HTTP 客户端构建失败: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// CSS 选择器构建失败
    #[error("选择器构建失败 ({selector}): {message}")]
    Selector { selector: String, message: String },

    /// 正则表达式编译失败
    #[error("正则表达式编译失败: {0}")]
    Pattern(#[from] regex::Error),

    /// 数据库操作失败（整个事务回滚）
    #[error("数据库操作失败: {0}")]
    Storage(#[from] rusqlite::Error),

    /// 写入计划内部引用不一致
    #[error("写入计划无效: {0}")]
    WritePlan(String),

    /// JSON 文档序列化失败
    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON 文档写入失败
    #[error("写入 JSON 文档失败 ({path}): {source}")]
    DocumentWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 单个题目的跳过原因
///
/// 每个原因都对应一条可审计的记录，替代"吞异常继续"的做法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 题干文本缺失或为空
    EmptyQuestionText,
    /// 答案列表子元素缺失
    MissingAnswerList,
    /// 答案列表存在但没有可用的答案项
    EmptyAnswers,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyQuestionText => write!(f, "题干为空"),
            SkipReason::MissingAnswerList => write!(f, "答案列表缺失"),
            SkipReason::EmptyAnswers => write!(f, "答案列表为空"),
        }
    }
}
