//! 页面处理上下文
//!
//! 封装"我正在处理哪个章节的第几个测试"这一信息

use crate::models::ChapterKey;
use std::fmt::Display;

/// 页面处理上下文
#[derive(Debug, Clone)]
pub struct PageCtx {
    /// 章节键（在采集入口处一次性解析）
    pub chapter: ChapterKey,

    /// 测试编号
    pub test_number: String,

    /// 页面索引（仅用于日志显示）
    pub page_index: usize,
}

impl PageCtx {
    /// 创建新的页面上下文
    pub fn new(chapter: ChapterKey, test_number: String, page_index: usize) -> Self {
        Self {
            chapter,
            test_number,
            page_index,
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[章节#{} 测试#{}]", self.chapter, self.test_number)
    }
}
