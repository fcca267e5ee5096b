//! Response latency of a root user in direct conversations

use chatstat_core::{
    bucket_label, require_user, Cell, ContextKey, Granularity, Message, Query, QueryContext,
    QueryOutput, Result, Table, UserSelector,
};

pub const ID: &str = "time_to_respond";

/// Responses slower than this are dropped as outliers
pub const MAX_RESPONSE_SECS: i64 = 24 * 60 * 60;

/// One peer message answered by the root user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEvent {
    pub sender: String,
    /// Epoch seconds of the last peer message before the reply
    pub sent_at: i64,
    /// Epoch seconds of the root reply
    pub responded_at: i64,
}

impl ResponseEvent {
    pub fn delta_secs(&self) -> i64 {
        self.responded_at - self.sent_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum TrackerState {
    #[default]
    Idle,
    AwaitingRootReply { sender: String, sent_at: i64 },
}

/// Pairs peer messages with the root user's next reply within one conversation.
///
/// Consecutive peer messages overwrite the pending one, so only the last
/// message before a reply counts as sent.
#[derive(Debug, Clone)]
pub struct ResponseTracker<'r> {
    root: &'r str,
    state: TrackerState,
}

impl<'r> ResponseTracker<'r> {
    pub fn new(root: &'r str) -> Self {
        Self {
            root,
            state: TrackerState::Idle,
        }
    }

    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.state, TrackerState::AwaitingRootReply { .. })
    }

    /// Feed the next message in chronological order
    pub fn observe(&mut self, sender: &str, at_secs: i64) -> Option<ResponseEvent> {
        if sender != self.root {
            self.state = TrackerState::AwaitingRootReply {
                sender: sender.to_string(),
                sent_at: at_secs,
            };
            return None;
        }

        match std::mem::take(&mut self.state) {
            TrackerState::Idle => None,
            TrackerState::AwaitingRootReply { sender, sent_at } => {
                let event = ResponseEvent {
                    sender,
                    sent_at,
                    responded_at: at_secs,
                };
                (0..MAX_RESPONSE_SECS)
                    .contains(&event.delta_secs())
                    .then_some(event)
            }
        }
    }
}

/// Response events of `root` across all direct conversations.
///
/// Messages are ordered by `(conversation, timestamp)` first and each
/// conversation starts from an idle tracker.
pub fn response_events(
    messages: &[Message],
    root: &str,
    is_group: impl Fn(&str) -> bool,
) -> Vec<ResponseEvent> {
    let mut ordered: Vec<&Message> = messages
        .iter()
        .filter(|m| !is_group(&m.conversation_id))
        .collect();
    ordered.sort_by(|a, b| {
        a.conversation_id
            .cmp(&b.conversation_id)
            .then(a.timestamp_ms.cmp(&b.timestamp_ms))
    });

    let mut events = Vec::new();
    let mut current: Option<&str> = None;
    let mut tracker = ResponseTracker::new(root);
    for message in ordered {
        if current != Some(message.conversation_id.as_str()) {
            current = Some(message.conversation_id.as_str());
            tracker = ResponseTracker::new(root);
        }
        let at_secs = message.timestamp_ms.div_euclid(1000);
        if let Some(event) = tracker.observe(&message.sender_id, at_secs) {
            events.push(event);
        }
    }
    events
}

fn format_delta(secs: i64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[derive(Debug, Clone)]
pub struct TimeToRespondQuery {
    root: UserSelector,
}

impl TimeToRespondQuery {
    pub fn new(root: UserSelector) -> Self {
        Self { root }
    }
}

impl Query for TimeToRespondQuery {
    fn id(&self) -> &str {
        ID
    }

    fn granularity(&self) -> Granularity {
        Granularity::Second
    }

    fn required_context(&self) -> &[ContextKey] {
        &[ContextKey::Groups]
    }

    fn requires_root_user(&self) -> bool {
        true
    }

    fn compute(&self, messages: &[Message], context: &QueryContext<'_>) -> Result<QueryOutput> {
        let root = require_user(&self.root, ID)?;
        let groups = context.groups(ID)?;

        let events = response_events(messages, root, |id| groups.is_group(id));

        let mut table = Table::new(["sender", "time_sent", "time_responded", "delta"]);
        for event in events {
            table.push_row(vec![
                Cell::text(&event.sender),
                Cell::from(bucket_label(event.sent_at * 1000, self.granularity())),
                Cell::from(bucket_label(event.responded_at * 1000, self.granularity())),
                Cell::from(format_delta(event.delta_secs())),
            ]);
        }

        Ok(QueryOutput::Table(table))
    }
}
