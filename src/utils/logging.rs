/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use crate::config::Config;
use crate::models::{SyncPlanEntry, TargetWindow};
use crate::orchestrator::SyncReport;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则详细模式使用 debug，默认 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, window: &TargetWindow) {
    info!("{}", "=".repeat(60));
    info!("🚀 LeetCode 题解同步");
    info!("👤 用户: {}", config.username);
    info!("📂 输出目录: {}", config.output_dir.display());
    info!("📅 同步区间 (UTC): {}", window);
    info!("📊 最大并发数: {}", config.max_concurrent_entries);
    info!("{}", "=".repeat(60));
}

/// 记录提交记录加载信息
pub fn log_feed_loaded(total: usize, planned: usize, window: &TargetWindow) {
    info!("✓ 共拉取 {} 条提交记录", total);
    info!("📋 {} 当天通过的题目: {} 道", window.day(), planned);
}

/// 列出同步计划
pub fn log_plan(plan: &[SyncPlanEntry]) {
    for (i, entry) in plan.iter().enumerate() {
        info!(
            "  {}. {} [{}] {}",
            i + 1,
            entry.record.title,
            entry.record.language,
            entry.record.submitted_at.format("%H:%M:%S")
        );
    }
}

/// 打印最终统计信息
pub fn print_final_stats(report: &SyncReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 同步完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", report.synced.len(), report.planned);
    if report.is_clean() {
        info!("❌ 失败: 0");
    } else {
        warn!("❌ 失败: {}", report.failures.len());
        for failure in &report.failures {
            warn!("   - {}: {}", failure.slug, failure.error);
        }
    }
    info!("{}", report.summary());
    info!("{}", "=".repeat(60));
}
