//! 页面抓取器 - 基础设施层
//!
//! 唯一的 HTTP 入口。重试/退避策略不在核心范围内：
//! 一次请求失败即向上返回错误，由编排层把该页面计为零题继续

use crate::config::Config;
use crate::error::CrawlError;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// 页面抓取器
pub struct PageFetcher {
    client: Client,
    base_url: String,
}

impl PageFetcher {
    /// 创建新的抓取器
    pub fn new(config: &Config) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(CrawlError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 抓取一个测试页面的原始 HTML
    pub async fn fetch_page(&self, path: &str) -> Result<String, CrawlError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|source| CrawlError::Fetch {
                url: url.clone(),
                source,
            })?;

        response
            .text()
            .await
            .map_err(|source| CrawlError::Fetch { url, source })
    }
}
