//! Emoji usage with neighbouring words

use crate::annotate::annotate_user;
use chatstat_core::{
    Cell, ContextKey, Message, Query, QueryContext, QueryOutput, Result, Table, UserSelector,
};
use indexmap::IndexMap;

pub const ID: &str = "emoji";

/// True when the whole token is a single emoji glyph
pub fn is_emoji(token: &str) -> bool {
    emojis::get(token).is_some()
}

/// An emoji occurrence with the tokens around it in the same message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmojiUse<'m> {
    pub emoji: &'m str,
    pub word_behind: &'m str,
    pub word_next: &'m str,
}

/// Emoji occurrences of one message; neighbours are empty at message boundaries
pub fn emoji_uses(tokens: &[String]) -> Vec<EmojiUse<'_>> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, token)| is_emoji(token))
        .map(|(i, token)| EmojiUse {
            emoji: token.as_str(),
            word_behind: if i == 0 { "" } else { tokens[i - 1].as_str() },
            word_next: tokens.get(i + 1).map(String::as_str).unwrap_or(""),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct EmojiQuery {
    user: UserSelector,
}

impl EmojiQuery {
    pub fn new(user: UserSelector) -> Self {
        Self { user }
    }
}

impl Query for EmojiQuery {
    fn id(&self) -> &str {
        ID
    }

    fn required_context(&self) -> &[ContextKey] {
        &[ContextKey::UsersMap, ContextKey::Groups]
    }

    fn compute(&self, messages: &[Message], context: &QueryContext<'_>) -> Result<QueryOutput> {
        let users = context.users(ID)?;
        let groups = context.groups(ID)?;

        let mut counts: IndexMap<(&str, bool, String, EmojiUse<'_>), usize> = IndexMap::new();
        for message in messages.iter().filter(|m| self.user.matches(&m.sender_id)) {
            let uses = emoji_uses(&message.tokens);
            if uses.is_empty() {
                continue;
            }
            let is_group = groups.is_group(&message.conversation_id);
            let date = self.bucket(message.timestamp_ms);
            for emoji_use in uses {
                *counts
                    .entry((message.sender_id.as_str(), is_group, date.clone(), emoji_use))
                    .or_default() += 1;
            }
        }

        let mut table = Table::new([
            "user_id",
            "name",
            "gender",
            "is_group",
            "date",
            "emoji",
            "word_behind",
            "word_next",
            "count",
        ]);
        for ((user_id, is_group, date, emoji_use), count) in counts {
            let mut row = vec![Cell::text(user_id)];
            row.extend(annotate_user(users, user_id));
            row.extend([
                Cell::from(is_group),
                Cell::from(date),
                Cell::from(emoji_use.emoji),
                Cell::text(emoji_use.word_behind),
                Cell::text(emoji_use.word_next),
                Cell::from(count),
            ]);
            table.push_row(row);
        }

        Ok(QueryOutput::Table(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatstat_core::{AnalyticsConfig, Classification};
    use chatstat_ids::{Gender, UserMap};

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_is_emoji() {
        assert!(is_emoji("😀"));
        assert!(!is_emoji("hello"));
        assert!(!is_emoji("😀😀"));
        assert!(!is_emoji(""));
    }

    #[test]
    fn test_neighbours_stop_at_message_boundary() {
        let message = tokens(&["😀", "nice", "👍"]);
        let uses = emoji_uses(&message);
        assert_eq!(
            uses,
            vec![
                EmojiUse {
                    emoji: "😀",
                    word_behind: "",
                    word_next: "nice"
                },
                EmojiUse {
                    emoji: "👍",
                    word_behind: "nice",
                    word_next: ""
                },
            ]
        );
    }

    #[test]
    fn test_repeated_uses_are_counted() {
        let config = AnalyticsConfig::default();
        let mut users = UserMap::new();
        users.insert("u1", "Ola", Gender::Female);
        let messages = vec![
            Message::new("c1", "u1", &["super", "😀"], 0),
            Message::new("c1", "u2", &["😀"], 1_000),
            Message::new("c1", "u1", &["super", "😀"], 2_000),
        ];
        let groups = Classification::classify(&messages);
        let context = QueryContext::new(&config)
            .with_users(&users)
            .with_groups(&groups);

        let output = EmojiQuery::new(UserSelector::All)
            .compute(&messages, &context)
            .unwrap();
        let table = output.as_table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows()[0],
            vec![
                Cell::from("u1"),
                Cell::from("Ola"),
                Cell::from("female"),
                Cell::from(false),
                Cell::from("1970-01-01"),
                Cell::from("😀"),
                Cell::from("super"),
                Cell::from(""),
                Cell::from(2usize),
            ]
        );
    }

    #[test]
    fn test_selected_user_only() {
        let config = AnalyticsConfig::default();
        let users = UserMap::new();
        let messages = vec![
            Message::new("c1", "u1", &["😀"], 0),
            Message::new("c1", "u2", &["👍"], 0),
        ];
        let groups = Classification::classify(&messages);
        let context = QueryContext::new(&config)
            .with_users(&users)
            .with_groups(&groups);

        let output = EmojiQuery::new(UserSelector::parse("u2"))
            .compute(&messages, &context)
            .unwrap();
        let table = output.as_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0][5], Cell::from("👍"));
    }
}
