use chrono::{DateTime, Utc};

/// Wall-clock duration of a session, or "-" while it is still running.
pub fn format_duration(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> String {
    let Some(end) = end else { return "-".to_string() };
    let ms = (end - start).num_milliseconds().max(0) as u64;
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else if ms < 3_600_000 {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = ms / 3_600_000;
        let mins = (ms % 3_600_000) / 60_000;
        format!("{}h {}m", hours, mins)
    }
}

pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_duration_buckets() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(format_duration(start, None), "-");
        assert_eq!(format_duration(start, Some(start + chrono::Duration::milliseconds(250))), "250ms");
        assert_eq!(format_duration(start, Some(start + chrono::Duration::seconds(5))), "5.0s");
        assert_eq!(format_duration(start, Some(start + chrono::Duration::seconds(95))), "1m 35s");
        assert_eq!(format_duration(start, Some(start + chrono::Duration::seconds(3_720))), "1h 2m");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(format_timestamp(Some(ts)), "2026-03-01 08:30:00");
        assert_eq!(format_timestamp(None), "-");
    }
}
