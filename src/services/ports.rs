//! 外部协作方的能力接口
//!
//! 编排层只依赖这些 trait，测试时可以替换为内存实现

use crate::error::SyncResult;
use crate::models::{ProblemDetail, RawSubmission, SyncPlanEntry};
use async_trait::async_trait;
use std::path::PathBuf;

/// 提交记录来源
#[async_trait]
pub trait SubmissionFeed: Send + Sync {
    /// 拉取提交记录；失败即为致命错误
    async fn fetch_submissions(&self) -> SyncResult<Vec<RawSubmission>>;
}

/// 题目详情来源
#[async_trait]
pub trait ProblemDetailFetcher: Send + Sync {
    async fn fetch_problem_detail(&self, slug: &str) -> SyncResult<ProblemDetail>;
}

/// 本地落盘
#[async_trait]
pub trait Materializer: Send + Sync {
    /// 这道题将要写入的目录，执行前用来检查重名
    fn destination(&self, entry: &SyncPlanEntry) -> PathBuf;

    /// 写入一道题的代码和题面，返回题目目录
    async fn materialize(
        &self,
        entry: &SyncPlanEntry,
        detail: &ProblemDetail,
    ) -> SyncResult<PathBuf>;
}
