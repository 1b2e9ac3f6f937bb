//! 错误类型
//!
//! 区分两类错误：
//! - 致命错误：中止整次同步（凭证缺失、提交记录拉取失败、超时）
//! - 单条错误：只影响一道题，记录后继续处理其余题目

use thiserror::Error;

/// 同步过程中的错误
#[derive(Debug, Error)]
pub enum SyncError {
    /// 找不到登录凭证（cookie）
    #[error("缺少 LeetCode 登录凭证: {reason}")]
    AuthenticationMissing { reason: String },

    /// 提交记录接口不可用
    #[error("无法获取提交记录 ({endpoint}): {message}")]
    FeedUnavailable { endpoint: String, message: String },

    /// 题目详情获取失败
    #[error("获取题目详情失败 ({slug}): {message}")]
    DetailFetchFailed { slug: String, message: String },

    /// 本地写入失败
    #[error("写入本地文件失败 ({slug}): {source}")]
    MaterializationFailed {
        slug: String,
        #[source]
        source: std::io::Error,
    },

    /// 单题任务异常退出
    #[error("任务异常退出 ({slug}): {message}")]
    EntryTaskFailed { slug: String, message: String },

    /// 提交记录缺少必要字段
    #[error("提交记录缺少字段: {field}")]
    MalformedRecord { field: &'static str },

    /// 配置错误
    #[error("配置错误: {0}")]
    InvalidConfig(String),

    /// 超过整体运行时限
    #[error("同步超时 (限制 {secs} 秒)")]
    RunTimedOut { secs: u64 },
}

impl SyncError {
    /// 是否应当中止整次运行
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            SyncError::DetailFetchFailed { .. }
                | SyncError::MaterializationFailed { .. }
                | SyncError::EntryTaskFailed { .. }
                | SyncError::MalformedRecord { .. }
        )
    }

    /// 创建提交记录接口错误
    pub fn feed_unavailable(endpoint: impl Into<String>, message: impl ToString) -> Self {
        SyncError::FeedUnavailable {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    /// 创建题目详情错误
    pub fn detail_fetch_failed(slug: impl Into<String>, message: impl ToString) -> Self {
        SyncError::DetailFetchFailed {
            slug: slug.into(),
            message: message.to_string(),
        }
    }

    /// 创建本地写入错误
    pub fn materialization_failed(slug: impl Into<String>, source: std::io::Error) -> Self {
        SyncError::MaterializationFailed {
            slug: slug.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::InvalidConfig(err.to_string())
    }
}

/// 同步结果类型
pub type SyncResult<T> = Result<T, SyncError>;
