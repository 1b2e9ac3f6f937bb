use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt::Display;

/// UTC 自然日区间 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TargetWindow {
    /// 某个 UTC 日期对应的整天区间
    pub fn for_day(day: NaiveDate) -> Self {
        let start = day.and_time(NaiveTime::MIN).and_utc();
        let end = day
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start, end }
    }

    /// 时间点是否落在区间内（含起点，不含终点）
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// 区间对应的日期
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }
}

impl Display for TargetWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%Y-%m-%dT%H:%M:%SZ"),
            self.end.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}

/// 计算"昨天"的 UTC 区间
pub fn compute_yesterday_window(now: DateTime<Utc>) -> TargetWindow {
    let today = now.date_naive();
    let yesterday = today.pred_opt().unwrap_or(today);
    TargetWindow::for_day(yesterday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_yesterday_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let window = compute_yesterday_window(now);

        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
        assert_eq!(window.to_string(), "[2024-03-14T00:00:00Z, 2024-03-15T00:00:00Z)");
    }

    #[test]
    fn test_window_at_midnight_and_month_boundary() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let window = compute_yesterday_window(now);
        assert_eq!(window.day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(window.end, now);
    }

    #[test]
    fn test_contains_is_half_open() {
        let window = TargetWindow::for_day(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert!(window.contains(window.start));
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 3, 14, 23, 59, 59).unwrap()));
        assert!(!window.contains(window.end));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 3, 13, 23, 59, 59).unwrap()));
    }
}
