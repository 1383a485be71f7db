use anyhow::Result;
use uk_visa_test_crawler::utils::logging;
use uk_visa_test_crawler::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
