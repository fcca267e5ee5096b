//! Message records and loading of the flattened message stream

use crate::error::{AnalyticsError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

const EXPECTED_SHAPE: &str = "expected [conversation_id, sender_id, [tokens...], timestamp_ms]";

/// One anonymized chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub conversation_id: String,
    pub sender_id: String,
    pub tokens: Vec<String>,
    /// Epoch milliseconds, UTC
    pub timestamp_ms: i64,
}

impl Message {
    pub fn new(
        conversation_id: impl Into<String>,
        sender_id: impl Into<String>,
        tokens: &[&str],
        timestamp_ms: i64,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            sender_id: sender_id.into(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            timestamp_ms,
        }
    }
}

/// Read and validate a JSON message stream
pub fn load_messages(path: &Path) -> Result<Vec<Message>> {
    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents).map_err(|err| {
        AnalyticsError::MalformedInput(format!("{} is not valid JSON: {}", path.display(), err))
    })?;
    let messages = parse_messages(&value)?;
    debug!(path = %path.display(), records = messages.len(), "loaded message stream");
    Ok(messages)
}

/// Validate the stream shape and convert it into records.
///
/// Every record must be an array of at least three elements whose last
/// element is an integer timestamp and whose second-to-last element is a
/// list of token strings. The sender sits before the tokens and the
/// conversation id before the sender; a three-element record has an
/// empty conversation id.
pub fn parse_messages(value: &Value) -> Result<Vec<Message>> {
    let records = value.as_array().ok_or_else(|| {
        AnalyticsError::MalformedInput(format!("top level is not an array ({})", EXPECTED_SHAPE))
    })?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect()
}

fn parse_record(index: usize, record: &Value) -> Result<Message> {
    let malformed =
        |reason: &str| AnalyticsError::MalformedInput(format!("record {}: {} ({})", index, reason, EXPECTED_SHAPE));

    let fields = record.as_array().ok_or_else(|| malformed("not an array"))?;
    let len = fields.len();
    if len < 3 {
        return Err(malformed("fewer than 3 elements"));
    }

    let timestamp_ms = fields[len - 1]
        .as_i64()
        .ok_or_else(|| malformed("last element is not an integer timestamp"))?;
    if chrono::DateTime::from_timestamp_millis(timestamp_ms).is_none() {
        return Err(malformed("timestamp out of range"));
    }

    let tokens = fields[len - 2]
        .as_array()
        .ok_or_else(|| malformed("second-to-last element is not a token list"))?
        .iter()
        .map(|token| token.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| malformed("token list contains a non-string"))?;

    let sender_id = fields[len - 3]
        .as_str()
        .ok_or_else(|| malformed("sender id is not a string"))?
        .to_string();

    let conversation_id = match len {
        3 => String::new(),
        _ => fields[len - 4]
            .as_str()
            .ok_or_else(|| malformed("conversation id is not a string"))?
            .to_string(),
    };

    Ok(Message {
        conversation_id,
        sender_id,
        tokens,
        timestamp_ms,
    })
}
