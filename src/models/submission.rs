use crate::error::SyncError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// 通过
    Accepted,
    /// 判题未通过
    Rejected,
    /// 其他状态（判题中、未知等）
    Other,
}

impl SubmissionStatus {
    /// 从接口返回的 `status_display` 解析
    pub fn from_display(display: &str) -> Self {
        match display.trim() {
            "Accepted" => SubmissionStatus::Accepted,
            "Wrong Answer"
            | "Time Limit Exceeded"
            | "Memory Limit Exceeded"
            | "Output Limit Exceeded"
            | "Runtime Error"
            | "Compile Error" => SubmissionStatus::Rejected,
            _ => SubmissionStatus::Other,
        }
    }
}

/// 接口返回的原始提交记录，所有字段都可能缺失
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSubmission {
    #[serde(default, deserialize_with = "deserialize_flexible_int")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status_display: Option<String>,
    /// Unix 秒
    #[serde(default, deserialize_with = "deserialize_flexible_int")]
    pub timestamp: Option<i64>,
}

/// 规范化后的提交记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub id: Option<i64>,
    pub title: String,
    pub title_slug: String,
    pub language: String,
    pub code: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

impl TryFrom<RawSubmission> for SubmissionRecord {
    type Error = SyncError;

    fn try_from(raw: RawSubmission) -> Result<Self, Self::Error> {
        let title_slug = raw
            .title_slug
            .filter(|s| !s.trim().is_empty())
            .ok_or(SyncError::MalformedRecord { field: "title_slug" })?;
        let status = raw
            .status_display
            .as_deref()
            .map(SubmissionStatus::from_display)
            .ok_or(SyncError::MalformedRecord {
                field: "status_display",
            })?;
        let submitted_at = raw
            .timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .ok_or(SyncError::MalformedRecord { field: "timestamp" })?;
        let code = raw.code.ok_or(SyncError::MalformedRecord { field: "code" })?;

        let title = raw
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| title_slug.clone());
        let language = raw
            .lang
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| "text".to_string());

        Ok(Self {
            id: raw.id,
            title,
            title_slug,
            language,
            code,
            status,
            submitted_at,
        })
    }
}

/// 一页提交记录
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionPage {
    #[serde(default)]
    pub submissions_dump: Vec<RawSubmission>,
    #[serde(default)]
    pub has_next: bool,
    /// 下一页请求需要带上的游标
    #[serde(default)]
    pub last_key: Option<String>,
}

// 整数字段可能以数字或字符串形式出现；无法解析时视为缺失
fn deserialize_flexible_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct FlexibleIntVisitor;

    impl<'de> Visitor<'de> for FlexibleIntVisitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a numeric string")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: serde::Deserializer<'de>,
        {
            deserializer.deserialize_any(FlexibleIntVisitor)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(i64::try_from(value).ok())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.is_finite().then(|| value as i64))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.trim().parse().ok())
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_option(FlexibleIntVisitor)
}
