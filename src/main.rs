use anyhow::Result;
use leetcode_sync::utils::logging;
use leetcode_sync::{App, Config};
use tracing::{error, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 致命错误返回非零退出码；单题失败只记录警告
    let app = App::initialize(config).inspect_err(|e| error!("❌ {}", e))?;
    let report = app.run().await.inspect_err(|e| error!("❌ {}", e))?;

    if !report.is_clean() {
        warn!("⚠️ 部分题目同步失败: {}", report.summary());
    }

    Ok(())
}
