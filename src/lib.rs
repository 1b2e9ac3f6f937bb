//! # LeetCode Sync
//!
//! 把 LeetCode 上"昨天"（UTC）通过的题解同步到本地目录，每道题一个目录，
//! 包含代码文件和题面 README
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - 提交记录、同步区间、同步计划、题目详情
//!
//! ### ② 业务能力层（Services / Clients）
//! - `services/selection` - 筛选通过的提交并按题去重（纯函数）
//! - `services/materializer` - 写入本地目录
//! - `clients/` - LeetCode 提交记录接口和 GraphQL 题目详情
//!
//! ### ③ 流程层（Workflow）
//! - `EntryFlow` - 单道题的流程（详情 → 写入）
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 配置 → 协作方，整次运行超时
//! - `SyncRunner` - 拉取、筛选、并发执行、汇总

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::LeetCodeClient;
pub use config::Config;
pub use error::{SyncError, SyncResult};
pub use models::{
    compute_yesterday_window, ProblemDetail, RawSubmission, SubmissionRecord, SyncPlanEntry,
    TargetWindow,
};
pub use orchestrator::{App, SyncReport, SyncRunner};
pub use services::{select_accepted, LocalMaterializer};
pub use workflow::{EntryFlow, EntryOutcome};
