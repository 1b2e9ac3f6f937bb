//! 同步执行器 - 编排层
//!
//! 拉取提交记录 → 筛选 → 并发执行每道题的流程 → 汇总结果

use crate::error::{SyncError, SyncResult};
use crate::models::{SyncPlanEntry, TargetWindow};
use crate::services::{select_accepted, Materializer, ProblemDetailFetcher, SubmissionFeed};
use crate::utils::logging::{log_feed_loaded, log_plan};
use crate::workflow::{EntryFlow, EntryOutcome};
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// 失败的题目
#[derive(Debug)]
pub struct EntryFailure {
    pub slug: String,
    pub error: SyncError,
}

/// 一次同步的结果汇总
#[derive(Debug)]
pub struct SyncReport {
    pub window: TargetWindow,
    pub planned: usize,
    pub synced: Vec<(String, PathBuf)>,
    pub failures: Vec<EntryFailure>,
}

impl SyncReport {
    fn new(window: TargetWindow, planned: usize) -> Self {
        Self {
            window,
            planned,
            synced: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// 是否全部成功
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// 已同步的 slug
    pub fn synced_slugs(&self) -> Vec<&str> {
        self.synced.iter().map(|(slug, _)| slug.as_str()).collect()
    }

    /// 一行摘要，例如 `2 of 3 entries synced, 1 failed: [two-sum: ...]`
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{} of {} entries synced, {} failed",
            self.synced.len(),
            self.planned,
            self.failures.len()
        );
        if !self.failures.is_empty() {
            let details: Vec<String> = self
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.slug, f.error))
                .collect();
            line.push_str(&format!(": [{}]", details.join("; ")));
        }
        line
    }

    fn record(&mut self, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Synced { slug, path } => self.synced.push((slug, path)),
            EntryOutcome::Failed { slug, error } => self.failures.push(EntryFailure { slug, error }),
        }
    }
}

/// 同步执行器
///
/// `max_concurrent = 1` 时逐题顺序执行
pub struct SyncRunner {
    feed: Arc<dyn SubmissionFeed>,
    flow: EntryFlow,
    materializer: Arc<dyn Materializer>,
    max_concurrent: usize,
}

impl SyncRunner {
    pub fn new(
        feed: Arc<dyn SubmissionFeed>,
        fetcher: Arc<dyn ProblemDetailFetcher>,
        materializer: Arc<dyn Materializer>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            feed,
            flow: EntryFlow::new(fetcher, materializer.clone()),
            materializer,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// 同步指定区间内通过的题解
    ///
    /// 提交记录拉取失败时返回错误；单题失败只记录在报告里
    pub async fn run(&self, window: TargetWindow) -> SyncResult<SyncReport> {
        info!("\n📁 正在拉取提交记录...");
        let feed = self.feed.fetch_submissions().await?;
        let total = feed.len();

        let plan = select_accepted(feed, &window);
        log_feed_loaded(total, plan.len(), &window);

        if plan.is_empty() {
            info!("没有需要同步的题解");
            return Ok(SyncReport::new(window, 0));
        }

        log_plan(&plan);
        Ok(self.execute_plan(window, plan).await)
    }

    /// 执行同步计划
    ///
    /// 所有题目任务都挂在 `JoinSet` 上，本方法的 future 被丢弃（例如整体超时）时，
    /// 尚未完成的任务随之取消
    pub async fn execute_plan(&self, window: TargetWindow, plan: Vec<SyncPlanEntry>) -> SyncReport {
        let mut report = SyncReport::new(window, plan.len());
        let (plan, conflicts) = self.claim_destinations(plan);
        report.failures.extend(conflicts);

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();
        let mut pending = BTreeSet::new();

        for (idx, entry) in plan.into_iter().enumerate() {
            let entry_index = idx + 1;
            let flow = self.flow.clone();
            let semaphore = semaphore.clone();
            pending.insert(entry.slug().to_string());

            tasks.spawn(async move {
                // 信号量从不关闭，acquire 不会失败
                let _permit = semaphore.acquire_owned().await.ok();
                flow.run(&entry, entry_index).await
            });
        }

        let mut task_errors = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    pending.remove(outcome.slug());
                    report.record(outcome);
                }
                Err(e) => {
                    error!("任务执行失败: {}", e);
                    task_errors.push(e.to_string());
                }
            }
        }

        // 异常退出的任务没有返回结果，剩下的 slug 就是它们
        let message = task_errors.join("; ");
        for slug in pending {
            report.failures.push(EntryFailure {
                error: SyncError::EntryTaskFailed {
                    slug: slug.clone(),
                    message: message.clone(),
                },
                slug,
            });
        }

        report.synced.sort_by(|a, b| a.0.cmp(&b.0));
        report.failures.sort_by(|a, b| a.slug.cmp(&b.slug));
        report
    }

    /// 为每道题占用一个目录
    ///
    /// 目录名（不区分大小写）已被计划中靠前的题目占用时改用带 slug 的目录名；
    /// 仍然冲突的题目直接记为失败，不会覆盖别人的文件
    fn claim_destinations(
        &self,
        plan: Vec<SyncPlanEntry>,
    ) -> (Vec<SyncPlanEntry>, Vec<EntryFailure>) {
        let mut claimed: HashMap<String, String> = HashMap::new();
        let mut accepted = Vec::with_capacity(plan.len());
        let mut conflicts = Vec::new();

        for mut entry in plan {
            let mut key = destination_key(&self.materializer.destination(&entry));
            if claimed.contains_key(&key) {
                entry = entry.disambiguated();
                key = destination_key(&self.materializer.destination(&entry));
            }

            if let Some(owner) = claimed.get(&key) {
                let slug = entry.slug().to_string();
                let error = SyncError::materialization_failed(
                    &slug,
                    io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("目录 {} 已被 {} 占用", key, owner),
                    ),
                );
                warn!("⚠️ {}", error);
                conflicts.push(EntryFailure { slug, error });
                continue;
            }

            if entry.disambiguate {
                warn!(
                    "⚠️ 标题重名，{} 改为写入 {}",
                    entry.slug(),
                    self.materializer.destination(&entry).display()
                );
            }
            claimed.insert(key, entry.slug().to_string());
            accepted.push(entry);
        }

        (accepted, conflicts)
    }
}

/// 目录比较用的键，忽略大小写以兼容大小写不敏感的文件系统
fn destination_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}
