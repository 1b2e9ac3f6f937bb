use crate::models::submission::SubmissionRecord;

/// 同步计划中的一项：某道题当天最后一次通过的提交
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlanEntry {
    pub record: SubmissionRecord,
    /// 目录名是否需要带上 slug（标题清洗后与其他题目重名时）
    pub disambiguate: bool,
}

impl SyncPlanEntry {
    pub fn new(record: SubmissionRecord) -> Self {
        Self {
            record,
            disambiguate: false,
        }
    }

    pub fn slug(&self) -> &str {
        &self.record.title_slug
    }

    /// 改用带 slug 的目录名
    pub fn disambiguated(mut self) -> Self {
        self.disambiguate = true;
        self
    }
}
