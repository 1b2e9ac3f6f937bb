//! 单题同步流程 - 流程层
//!
//! 流程顺序：
//! 1. 获取题目详情
//! 2. 写入本地目录
//!
//! 任何一步失败都只影响当前这道题

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::SyncError;
use crate::models::SyncPlanEntry;
use crate::services::{Materializer, ProblemDetailFetcher};

/// 单题处理结果
#[derive(Debug)]
pub enum EntryOutcome {
    /// 已写入本地
    Synced { slug: String, path: PathBuf },
    /// 失败（详情获取或写入）
    Failed { slug: String, error: SyncError },
}

impl EntryOutcome {
    pub fn slug(&self) -> &str {
        match self {
            EntryOutcome::Synced { slug, .. } | EntryOutcome::Failed { slug, .. } => slug,
        }
    }
}

/// 单题同步流程
///
/// - 不持有任何可变状态，可以在多个任务间共享
/// - 只依赖能力接口
#[derive(Clone)]
pub struct EntryFlow {
    fetcher: Arc<dyn ProblemDetailFetcher>,
    materializer: Arc<dyn Materializer>,
}

impl EntryFlow {
    pub fn new(
        fetcher: Arc<dyn ProblemDetailFetcher>,
        materializer: Arc<dyn Materializer>,
    ) -> Self {
        Self {
            fetcher,
            materializer,
        }
    }

    pub async fn run(&self, entry: &SyncPlanEntry, entry_index: usize) -> EntryOutcome {
        let slug = entry.slug().to_string();
        info!(
            "[题目 {}] 🔍 获取题目详情: {} ({})",
            entry_index, entry.record.title, slug
        );

        let detail = match self.fetcher.fetch_problem_detail(&slug).await {
            Ok(detail) => detail,
            Err(error) => {
                warn!("[题目 {}] ⚠️ {}", entry_index, error);
                return EntryOutcome::Failed { slug, error };
            }
        };

        match self.materializer.materialize(entry, &detail).await {
            Ok(path) => {
                info!(
                    "[题目 {}] ✓ 已保存 ({}, {}): {}",
                    entry_index,
                    detail.difficulty,
                    entry.record.language,
                    path.display()
                );
                EntryOutcome::Synced { slug, path }
            }
            Err(error) => {
                warn!("[题目 {}] ⚠️ {}", entry_index, error);
                EntryOutcome::Failed { slug, error }
            }
        }
    }
}
