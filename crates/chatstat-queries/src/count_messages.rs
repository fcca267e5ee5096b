//! Message counts per conversation, sender and time bucket

use crate::annotate::{annotate_conversation, annotate_user};
use chatstat_core::{
    Cell, ContextKey, Granularity, Message, Query, QueryContext, QueryOutput, Result, Table,
};
use indexmap::IndexMap;

pub const ID: &str = "count_messages";

/// For each `(conversation, sender, bucket)` group, counts how many
/// messages reach each token-length threshold. Thresholds are inclusive
/// and cumulative: one long message counts toward every threshold it
/// satisfies.
#[derive(Debug, Clone)]
pub struct CountMessagesQuery {
    thresholds: Vec<usize>,
    granularity: Granularity,
}

impl CountMessagesQuery {
    pub fn new(thresholds: Vec<usize>) -> Self {
        Self {
            thresholds,
            granularity: Granularity::Day,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn thresholds(&self) -> &[usize] {
        &self.thresholds
    }

    fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = [
            "conversation_id",
            "title",
            "user_id",
            "date",
            "name",
            "gender",
            "is_group",
            "participants_num",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect();
        columns.extend(self.thresholds.iter().map(|t| format!("min_messages={}", t)));
        columns
    }
}

impl Default for CountMessagesQuery {
    fn default() -> Self {
        Self::new(vec![0, 3, 7, 15])
    }
}

impl Query for CountMessagesQuery {
    fn id(&self) -> &str {
        ID
    }

    fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn required_context(&self) -> &[ContextKey] {
        &[
            ContextKey::UsersMap,
            ContextKey::ConversationsMap,
            ContextKey::Groups,
        ]
    }

    fn compute(&self, messages: &[Message], context: &QueryContext<'_>) -> Result<QueryOutput> {
        let users = context.users(ID)?;
        let titles = context.conversations(ID)?;
        let groups = context.groups(ID)?;

        let mut counts: IndexMap<(&str, &str, String), Vec<usize>> = IndexMap::new();
        for message in messages {
            let key = (
                message.conversation_id.as_str(),
                message.sender_id.as_str(),
                self.bucket(message.timestamp_ms),
            );
            let entry = counts
                .entry(key)
                .or_insert_with(|| vec![0; self.thresholds.len()]);
            let length = message.tokens.len();
            for (slot, &threshold) in entry.iter_mut().zip(&self.thresholds) {
                if length >= threshold {
                    *slot += 1;
                }
            }
        }

        let mut table = Table::new(self.columns());
        for ((conversation_id, user_id, date), per_threshold) in counts {
            let mut row = vec![
                Cell::text(conversation_id),
                Cell::text(titles.title(conversation_id)),
                Cell::text(user_id),
                Cell::from(date),
            ];
            row.extend(annotate_user(users, user_id));
            row.extend(annotate_conversation(groups, conversation_id));
            row.extend(per_threshold.into_iter().map(Cell::from));
            table.push_row(row);
        }

        Ok(QueryOutput::Table(table))
    }
}
