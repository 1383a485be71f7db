//! 基础设施层
//!
//! 持有稀缺资源（HTTP 客户端），只对上层暴露能力

pub mod page_fetcher;

pub use page_fetcher::PageFetcher;
