//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 解析凭证、创建 LeetCode 客户端和本地写入器
//! - 计算"昨天"的区间
//! - 整次运行超时控制
//!
//! ### `sync_runner` - 同步执行器
//! - 拉取提交记录并筛选出同步计划
//! - 控制并发数量（Semaphore）
//! - 汇总每道题的结果（SyncReport）
//!
//! ## 层次关系
//!
//! ```text
//! app
//!     ↓
//! sync_runner (处理 Vec<SyncPlanEntry>)
//!     ↓
//! workflow::EntryFlow (处理单道题)
//!     ↓
//! services / clients (能力层：selection / materializer / LeetCode API)
//! ```

pub mod app;
pub mod sync_runner;

pub use app::App;
pub use sync_runner::{EntryFailure, SyncReport, SyncRunner};
