//! Integration tests for rankgraph-common crate.

use chrono::{TimeZone, Utc};
use rankgraph_common::{format_timestamp, truncate_string, ChannelId, RankRecord, RawMessage};

#[test]
fn test_channel_id_display() {
    let channel_id = ChannelId(123456789);
    assert_eq!(format!("{}", channel_id), "123456789");
}

#[test]
fn test_channel_id_from_str() {
    let parsed: ChannelId = " 123456789012345678 ".parse().unwrap();
    assert_eq!(parsed, ChannelId(123456789012345678));

    assert!("not-a-number".parse::<ChannelId>().is_err());
    assert!("-5".parse::<ChannelId>().is_err());
}

#[test]
fn test_channel_id_serialization() {
    let channel_id = ChannelId(123456789);

    let serialized = serde_json::to_string(&channel_id).unwrap();
    assert_eq!(serialized, "123456789");

    let deserialized: ChannelId = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized, channel_id);
}

#[test]
fn test_raw_message_json_shape() {
    let raw: RawMessage = serde_json::from_str(
        r#"{"content": "01/03/2024-08:00:00 - Rank: 120", "timestamp": "2024-03-01T08:00:01+00:00"}"#,
    )
    .unwrap();
    assert_eq!(raw, RawMessage::new("01/03/2024-08:00:00 - Rank: 120", "2024-03-01T08:00:01+00:00"));
}

#[test]
fn test_rank_record_epoch_seconds() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let record = RankRecord::new(at, 42);
    assert_eq!(record.rank, 42);
    assert_eq!(record.epoch_seconds(), 1_704_067_200.0);
}

#[test]
fn test_format_timestamp() {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    assert_eq!(format_timestamp(&timestamp), "2024-01-01 12:00:00 +00:00");
}

#[test]
fn test_truncate_string() {
    let input = "This is a very long string that should be truncated";
    assert_eq!(truncate_string(input, 20), "This is a very lo...");
    assert_eq!(truncate_string("Short", 20), "Short");
}
