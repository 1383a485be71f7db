/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 目标站点根地址
    pub base_url: String,
    /// 两次请求之间的礼貌延迟（毫秒）
    pub request_delay_ms: u64,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// JSON 文档快照输出路径
    pub json_output_file: String,
    /// SQLite 数据库文件路径
    pub db_path: String,
    /// 综合测试（无章节）数量
    pub comprehensive_test_count: u32,
    /// 章节数量
    pub chapter_count: u32,
    /// 每个章节的测试数量
    pub tests_per_chapter: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://lifeintheuktestweb.co.uk".to_string(),
            request_delay_ms: 1000,
            request_timeout_secs: 10,
            json_output_file: "uk_visa_all_questions.json".to_string(),
            db_path: "uk_visa_test.db".to_string(),
            comprehensive_test_count: 40,
            chapter_count: 5,
            tests_per_chapter: 10,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("BASE_URL").unwrap_or(default.base_url),
            request_delay_ms: std::env::var("CRAWLER_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_delay_ms),
            request_timeout_secs: std::env::var("CRAWLER_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            json_output_file: std::env::var("JSON_OUTPUT_FILE").unwrap_or(default.json_output_file),
            db_path: std::env::var("DB_PATH").unwrap_or(default.db_path),
            comprehensive_test_count: std::env::var("COMPREHENSIVE_TEST_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.comprehensive_test_count),
            chapter_count: std::env::var("CHAPTER_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.chapter_count),
            tests_per_chapter: std::env::var("TESTS_PER_CHAPTER").ok().and_then(|v| v.parse().ok()).unwrap_or(default.tests_per_chapter),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
