//! Most active senders of direct conversations

use chatstat_core::{ContextKey, Message, Query, QueryContext, QueryOutput, Result};
use indexmap::IndexMap;
use chatstat_ids::{repair_text, Gender};
use serde::Serialize;

pub const ID: &str = "top_senders";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderRank {
    pub rank: usize,
    pub user_id: String,
    pub name: String,
    pub gender: Gender,
    pub messages: usize,
}

/// Ranks senders by message count over direct conversations only.
/// Group conversations contribute nothing; ties keep first-seen order.
#[derive(Debug, Clone)]
pub struct TopSendersQuery {
    limit: usize,
}

impl TopSendersQuery {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Default for TopSendersQuery {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Query for TopSendersQuery {
    fn id(&self) -> &str {
        ID
    }

    fn extension(&self) -> &str {
        ".json"
    }

    fn required_context(&self) -> &[ContextKey] {
        &[ContextKey::UsersMap, ContextKey::Groups]
    }

    fn compute(&self, messages: &[Message], context: &QueryContext<'_>) -> Result<QueryOutput> {
        let users = context.users(ID)?;
        let groups = context.groups(ID)?;

        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for message in messages
            .iter()
            .filter(|m| !groups.is_group(&m.conversation_id))
        {
            *counts.entry(message.sender_id.as_str()).or_default() += 1;
        }

        counts.sort_by(|_, a, _, b| b.cmp(a));

        let ranks: Vec<SenderRank> = counts
            .into_iter()
            .take(self.limit)
            .enumerate()
            .map(|(i, (user_id, messages))| {
                let (name, gender) = users.resolve(user_id);
                SenderRank {
                    rank: i + 1,
                    user_id: user_id.to_string(),
                    name: repair_text(name).into_owned(),
                    gender,
                    messages,
                }
            })
            .collect();

        Ok(QueryOutput::Document(serde_json::to_value(ranks)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatstat_core::{AnalyticsConfig, Classification};
    use chatstat_ids::UserMap;
    use serde_json::json;

    fn compute(query: &TopSendersQuery, messages: &[Message]) -> serde_json::Value {
        let config = AnalyticsConfig::default();
        let mut users = UserMap::new();
        users.insert("a", "Anka", Gender::Female);
        let groups = Classification::classify(messages);
        let context = QueryContext::new(&config)
            .with_users(&users)
            .with_groups(&groups);
        query.compute(messages, &context).unwrap().to_json()
    }

    #[test]
    fn test_groups_are_excluded() {
        let messages = vec![
            Message::new("d", "a", &[], 0),
            Message::new("d", "b", &[], 0),
            Message::new("d", "a", &[], 0),
            Message::new("g", "b", &[], 0),
            Message::new("g", "b", &[], 0),
            Message::new("g", "x", &[], 0),
            Message::new("g", "y", &[], 0),
        ];
        let ranks = compute(&TopSendersQuery::default(), &messages);
        assert_eq!(
            ranks,
            json!([
                {"rank": 1, "user_id": "a", "name": "Anka", "gender": "female", "messages": 2},
                {"rank": 2, "user_id": "b", "name": "unknown", "gender": "unknown", "messages": 1},
            ])
        );
    }

    #[test]
    fn test_limit_and_ties() {
        let messages: Vec<Message> = (0..15)
            .map(|i| Message::new(format!("c{}", i), format!("u{}", i), &[], 0))
            .collect();
        let ranks = compute(&TopSendersQuery::default(), &messages);
        let ranks = ranks.as_array().unwrap();
        assert_eq!(ranks.len(), 10);
        assert_eq!(ranks[0]["user_id"], "u0");
        assert_eq!(ranks[9]["user_id"], "u9");
    }

    #[test]
    fn test_declares_json_output() {
        assert_eq!(TopSendersQuery::default().extension(), ".json");
    }
}
