#![allow(dead_code)]

use chatstat_core::{AnalyticsConfig, Message, UserSelector};
use serde_json::json;
use std::path::Path;

pub const MIN: i64 = 60_000;
// 2024-05-01 00:00:00 UTC
pub const START: i64 = 1_714_521_600_000;

/// Direct chat between r and p, plus a three-person group
pub fn sample_stream() -> serde_json::Value {
    json!([
        ["0_10", "0_2", ["hej", "co", "tam"], START],
        ["0_10", "0_2", ["jesteś", "?"], START + 5 * MIN],
        ["0_10", "0_1", ["jestem", "😀"], START + 10 * MIN],
        ["0_10", "0_1", ["co", "tam", "u", "ciebie"], START + 11 * MIN],
        ["0_11", "0_1", ["hej", "wszystkim"], START],
        ["0_11", "0_2", ["siema", "👍"], START + MIN],
        ["0_11", "0_3", ["co", "tam"], START + 2 * MIN],
    ])
}

pub fn sample_users() -> serde_json::Value {
    json!({
        "0_1": ["Root", "male"],
        "0_2": ["Peer", "female"],
        "0_3": ["Third", "unknown"],
    })
}

pub fn sample_titles() -> serde_json::Value {
    json!({"0_10": "Root & Peer", "0_11": "Weekend"})
}

/// Write the sample inputs under `dir` using the default file layout
pub fn write_inputs(dir: &Path) {
    std::fs::write(
        dir.join("0_conversations.json"),
        serde_json::to_string(&sample_stream()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join("0_users.json"),
        serde_json::to_string(&sample_users()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.join("0_conversation_titles.json"),
        serde_json::to_string(&sample_titles()).unwrap(),
    )
    .unwrap();
}

pub fn sample_config(dir: &Path) -> AnalyticsConfig {
    AnalyticsConfig {
        output_dir: dir.to_path_buf(),
        user_id: UserSelector::parse("0_1"),
        ..Default::default()
    }
}

pub fn sample_messages() -> Vec<Message> {
    chatstat_core::parse_messages(&sample_stream()).unwrap()
}
