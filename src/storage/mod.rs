//! 持久化层
//!
//! 两个并列的出口：关系型存储（持久所有者）和 JSON 文档快照（一次性产物）

pub mod database;
pub mod json_writer;

pub use database::{Database, PersistStats, TableCounts};
pub use json_writer::save_document;
