//! 应用入口 - 编排层
//!
//! 负责把配置变成具体的协作方，并给整次运行加上超时

use crate::clients::LeetCodeClient;
use crate::config::Config;
use crate::error::{SyncError, SyncResult};
use crate::models::compute_yesterday_window;
use crate::orchestrator::sync_runner::{SyncReport, SyncRunner};
use crate::services::LocalMaterializer;
use crate::utils::logging::{log_startup, print_final_stats};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// 应用主结构
pub struct App {
    config: Config,
    runner: SyncRunner,
}

impl App {
    /// 初始化应用
    ///
    /// 凭证缺失时在发出任何网络请求之前失败
    pub fn initialize(config: Config) -> SyncResult<Self> {
        let cookie = config.resolve_session_cookie()?;

        let client = Arc::new(LeetCodeClient::new(&config, cookie)?);
        let materializer = Arc::new(LocalMaterializer::new(config.output_dir.clone()));
        let runner = SyncRunner::new(
            client.clone(),
            client,
            materializer,
            config.max_concurrent_entries,
        );

        Ok(Self { config, runner })
    }

    /// 使用自定义执行器（测试时注入假的协作方）
    pub fn with_runner(config: Config, runner: SyncRunner) -> Self {
        Self { config, runner }
    }

    /// 同步昨天（UTC）通过的题解
    pub async fn run(&self) -> SyncResult<SyncReport> {
        self.run_at(Utc::now()).await
    }

    /// 以给定时间作为"现在"运行
    pub async fn run_at(&self, now: DateTime<Utc>) -> SyncResult<SyncReport> {
        let window = compute_yesterday_window(now);
        log_startup(&self.config, &window);

        let secs = self.config.run_timeout_secs;
        let report = tokio::time::timeout(Duration::from_secs(secs), self.runner.run(window))
            .await
            .map_err(|_| SyncError::RunTimedOut { secs })??;

        print_final_stats(&report);
        Ok(report)
    }
}
