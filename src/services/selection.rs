//! 提交筛选 - 业务能力层
//!
//! 只负责"从提交流中挑出需要同步的题解"，纯函数，不做任何 I/O

use crate::models::{RawSubmission, SubmissionRecord, SubmissionStatus, SyncPlanEntry, TargetWindow};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

/// 筛选出区间内通过的提交，每道题只保留一条
///
/// - 提交流不要求有序
/// - 同一题多次通过时，保留 `submitted_at` 最晚的一条；时间相同则保留 id 较大的，
///   都没有 id 时保留先出现的
/// - 缺少必要字段的记录直接跳过
/// - 结果按 slug 排序
pub fn select_accepted<I>(feed: I, window: &TargetWindow) -> Vec<SyncPlanEntry>
where
    I: IntoIterator<Item = RawSubmission>,
{
    let mut latest: BTreeMap<String, SubmissionRecord> = BTreeMap::new();
    let mut malformed = 0usize;

    for raw in feed {
        let record = match SubmissionRecord::try_from(raw) {
            Ok(record) => record,
            Err(e) => {
                malformed += 1;
                debug!("跳过提交记录: {}", e);
                continue;
            }
        };

        if record.status != SubmissionStatus::Accepted || !window.contains(record.submitted_at) {
            continue;
        }

        match latest.entry(record.title_slug.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
            Entry::Occupied(mut slot) => {
                if supersedes(&record, slot.get()) {
                    slot.insert(record);
                }
            }
        }
    }

    if malformed > 0 {
        debug!("共跳过 {} 条字段不完整的提交记录", malformed);
    }

    latest.into_values().map(SyncPlanEntry::new).collect()
}

fn supersedes(candidate: &SubmissionRecord, current: &SubmissionRecord) -> bool {
    (candidate.submitted_at, candidate.id) > (current.submitted_at, current.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::compute_yesterday_window;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn window() -> TargetWindow {
        compute_yesterday_window(Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap())
    }

    fn raw(slug: &str, status: &str, ts: (u32, u32, u32), code: &str) -> RawSubmission {
        let (h, m, s) = ts;
        RawSubmission {
            id: None,
            title: Some(slug.replace('-', " ")),
            title_slug: Some(slug.to_string()),
            lang: Some("python3".to_string()),
            code: Some(code.to_string()),
            status_display: Some(status.to_string()),
            timestamp: Some(Utc.with_ymd_and_hms(2024, 3, 14, h, m, s).unwrap().timestamp()),
        }
    }

    fn slugs(plan: &[SyncPlanEntry]) -> BTreeSet<String> {
        plan.iter().map(|e| e.slug().to_string()).collect()
    }

    #[test]
    fn test_latest_accepted_wins_and_rejected_excluded() {
        let feed = vec![
            raw("two-sum", "Accepted", (5, 0, 0), "A"),
            raw("two-sum", "Accepted", (20, 0, 0), "B"),
            raw("valid-parentheses", "Wrong Answer", (12, 0, 0), "C"),
        ];

        let plan = select_accepted(feed, &window());
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].slug(), "two-sum");
        assert_eq!(plan[0].record.code, "B");
    }

    #[test]
    fn test_result_does_not_depend_on_feed_order() {
        let feed = vec![
            raw("two-sum", "Accepted", (20, 0, 0), "B"),
            raw("add-two-numbers", "Accepted", (1, 0, 0), "X"),
            raw("two-sum", "Accepted", (5, 0, 0), "A"),
        ];
        let mut reversed = feed.clone();
        reversed.reverse();

        let forward = select_accepted(feed, &window());
        let backward = select_accepted(reversed, &window());
        assert_eq!(forward, backward);
        assert_eq!(
            slugs(&forward),
            BTreeSet::from(["add-two-numbers".to_string(), "two-sum".to_string()])
        );
        assert_eq!(forward[1].record.code, "B");
    }

    #[test]
    fn test_window_boundaries() {
        let w = window();
        let mut at_start = raw("at-start", "Accepted", (0, 0, 0), "s");
        at_start.timestamp = Some(w.start.timestamp());
        let mut at_end = raw("at-end", "Accepted", (0, 0, 0), "e");
        at_end.timestamp = Some(w.end.timestamp());
        let mut just_before = raw("just-before", "Accepted", (0, 0, 0), "b");
        just_before.timestamp = Some(w.start.timestamp() - 1);

        let plan = select_accepted(vec![at_start, at_end, just_before], &w);
        assert_eq!(slugs(&plan), BTreeSet::from(["at-start".to_string()]));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let mut no_time = raw("no-time", "Accepted", (3, 0, 0), "x");
        no_time.timestamp = None;
        let mut no_slug = raw("no-slug", "Accepted", (3, 0, 0), "x");
        no_slug.title_slug = None;
        let mut no_status = raw("no-status", "Accepted", (3, 0, 0), "x");
        no_status.status_display = None;

        let plan = select_accepted(
            vec![no_time, no_slug, no_status, raw("ok", "Accepted", (3, 0, 0), "y")],
            &window(),
        );
        assert_eq!(slugs(&plan), BTreeSet::from(["ok".to_string()]));
    }

    #[test]
    fn test_equal_timestamps_prefer_larger_id() {
        let mut first = raw("two-sum", "Accepted", (8, 0, 0), "older");
        first.id = Some(10);
        let mut second = raw("two-sum", "Accepted", (8, 0, 0), "newer");
        second.id = Some(11);

        let plan = select_accepted(vec![second.clone(), first.clone()], &window());
        assert_eq!(plan[0].record.code, "newer");
        let plan = select_accepted(vec![first, second], &window());
        assert_eq!(plan[0].record.code, "newer");
    }

    #[test]
    fn test_empty_feed_gives_empty_plan() {
        assert!(select_accepted(Vec::new(), &window()).is_empty());
        let other_day = RawSubmission {
            timestamp: Some(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap().timestamp()),
            ..raw("old", "Accepted", (0, 0, 0), "x")
        };
        assert!(select_accepted(vec![other_day], &window()).is_empty());
    }

    #[test]
    fn test_invariants_over_mixed_feed() {
        let statuses = ["Accepted", "Wrong Answer", "Runtime Error", "Accepted"];
        let slugs_pool = ["a", "b", "c", "d", "e"];
        let w = window();

        let mut feed = Vec::new();
        for i in 0..60i64 {
            let slug = slugs_pool[(i as usize * 7) % slugs_pool.len()];
            let status = statuses[(i as usize * 3) % statuses.len()];
            let mut r = raw(slug, status, (0, 0, 0), &format!("code-{}", i));
            // 跨越前一天、当天和后一天
            r.timestamp = Some(w.start.timestamp() - 86_400 + i * 4_000);
            r.id = Some(i);
            feed.push(r);
        }

        let first = select_accepted(feed.clone(), &w);
        let again = select_accepted(feed, &w);
        assert_eq!(slugs(&first), slugs(&again));
        assert_eq!(slugs(&first).len(), first.len());

        for entry in &first {
            assert_eq!(entry.record.status, SubmissionStatus::Accepted);
            assert!(w.contains(entry.record.submitted_at));
        }
    }
}
