//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责整次采集运行的调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (遍历页面计划，控制抓取节奏)
//!     ↓
//! workflow::PageFlow (处理单个页面)
//!     ↓
//! services (能力层：extract / infer / assemble / normalize / audit)
//!     ↓
//! parser + infrastructure (文档树查询 / HTTP)
//!     ↓
//! storage (文档快照 + 关系型事务写入)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单写者纪律**：一次运行持有一个 Database，开一个事务
//! 2. **页面独立**：单页抓取/解析失败计为零题，继续下一页
//! 3. **无业务逻辑**：只做调度、统计和持久化出口

pub mod batch_processor;

pub use batch_processor::{App, CrawlStats, PagePlan};
