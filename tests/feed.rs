mod support;

#[cfg(test)]
mod tests {
    use crate::support::{client, record, FakeTransport};
    use punchclock::libs::attendance::AttendanceRecord;
    use punchclock::libs::feed::{build_feed, most_recent_first, LogKind};
    use reqwest::Method;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<AttendanceRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_clock_out_precedes_clock_in_per_record() {
        let feed = build_feed(&records(json!([
            record(2, "2024-03-06", Some("2024-03-06 08:45:00"), None, "on_time"),
            record(1, "2024-03-05", Some("2024-03-05 09:00:00"), Some("2024-03-05 17:30:00"), "late"),
        ])));

        let ids: Vec<&str> = feed.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, vec!["2-clockIn", "1-clockOut", "1-clockIn"]);
        assert_eq!(feed[1].kind, LogKind::ClockOut);
        assert_eq!(feed[1].time, "05:30 PM");
        assert_eq!(feed[1].date, "Tuesday, March 5, 2024");
    }

    #[test]
    fn test_missing_timestamps_emit_nothing() {
        let feed = build_feed(&records(json!([
            record(3, "2024-03-07", None, None, "absent"),
            record(4, "2024-03-08", None, Some("2024-03-08 18:00:00"), "late"),
        ])));
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, "4-clockOut");
        assert!(build_feed(&[]).is_empty());
    }

    #[test]
    fn test_most_recent_first_orders_by_date() {
        let sorted = most_recent_first(records(json!([
            record(1, "2024-03-05", Some("2024-03-05 09:00:00"), None, "on_time"),
            record(3, "2024-03-07", None, None, "absent"),
            record(2, "2024-03-06", Some("2024-03-06 09:00:00"), None, "on_time"),
        ])));
        let ids: Vec<&str> = sorted.iter().map(|record| record.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }

    #[tokio::test]
    async fn test_feed_from_history_endpoint() {
        let fake = FakeTransport::new();
        fake.reply(
            Method::GET,
            "/attendance",
            200,
            json!([record(1, "2024-03-05", Some("2024-03-05T09:00:00"), Some("2024-03-05T17:30:00"), "on_time")]),
        );

        let history = client(&fake).attendance().await.unwrap();
        let feed = build_feed(&most_recent_first(history));
        assert_eq!(feed.len(), 2);
        assert!(feed[0].at > feed[1].at);
    }
}
