//! Most frequent word sequences

use crate::annotate::annotate_user;
use chatstat_core::{
    Cell, ContextKey, Message, Query, QueryContext, QueryOutput, Result, Table, UserSelector,
};
use indexmap::IndexMap;

pub const ID: &str = "most_common_strings";

/// Counts every window of `width` consecutive tokens inside a message,
/// per sender, and ranks the sequences by count. Windows never span two
/// messages.
#[derive(Debug, Clone)]
pub struct MostCommonStringsQuery {
    width: usize,
    user: UserSelector,
}

impl MostCommonStringsQuery {
    pub fn new(width: usize, user: UserSelector) -> Self {
        Self { width, user }
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

/// Sequences of `width` tokens with their counts, most frequent first.
///
/// Ties keep first-seen order.
pub fn count_sequences<'m>(
    messages: impl IntoIterator<Item = &'m Message>,
    width: usize,
) -> Vec<((&'m str, String), usize)> {
    if width == 0 {
        return Vec::new();
    }
    let mut counts: IndexMap<(&str, String), usize> = IndexMap::new();
    for message in messages {
        for window in message.tokens.windows(width) {
            *counts
                .entry((message.sender_id.as_str(), window.join(" ")))
                .or_default() += 1;
        }
    }

    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts.into_iter().collect()
}

impl Query for MostCommonStringsQuery {
    fn id(&self) -> &str {
        ID
    }

    fn required_context(&self) -> &[ContextKey] {
        &[ContextKey::UsersMap]
    }

    fn compute(&self, messages: &[Message], context: &QueryContext<'_>) -> Result<QueryOutput> {
        let users = context.users(ID)?;

        let selected = messages.iter().filter(|m| self.user.matches(&m.sender_id));
        let ranked = count_sequences(selected, self.width);

        let mut table = Table::new(["user_id", "name", "gender", "sequence_of_strings", "count"]);
        for ((user_id, sequence), count) in ranked {
            let mut row = vec![Cell::text(user_id)];
            row.extend(annotate_user(users, user_id));
            row.push(Cell::text(&sequence));
            row.push(Cell::from(count));
            table.push_row(row);
        }

        Ok(QueryOutput::Table(table))
    }
}
