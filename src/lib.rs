//! # UK Visa Test Crawler
//!
//! 一个用于抓取英国入籍考试（Life in the UK Test）题目的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（HTTP 客户端），只暴露能力
//! - `PageFetcher` - 唯一的 HTTP 入口，提供 fetch_page() 能力
//!
//! ### ② 解析层（Parser）
//! - `parser/` - 包装 scraper 文档树，暴露类型化查询
//! - `PageDocument` / `QuestionBlock` - "找题目块 / 找答案项 / 找解释块"
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个 Question
//! - `AnswerExtractor` - 答案提取能力（含题型判定）
//! - `CorrectnessInference` - 正确答案推断能力（两遍启发式）
//! - `QuestionAssembler` - 题目组装与校验能力
//! - `normalizer` - 批量归一化（文档快照 + 关系型写入计划）
//! - `DataQualityAuditor` - 只读的数据质量审计能力
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一个测试页面"的完整处理流程
//! - `PageCtx` - 上下文封装（chapter + test_number + page_index）
//! - `PageFlow` - 流程编排（解析 → 提取 → 推断 → 组装），单题失败只跳过
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量页面处理器，管理抓取节奏和持久化
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod storage;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{CrawlError, SkipReason};
pub use infrastructure::PageFetcher;
pub use models::{Answer, ChapterKey, Question, QuestionDocument, QuestionType};
pub use orchestrator::App;
pub use workflow::{PageCtx, PageFlow, PageReport};
