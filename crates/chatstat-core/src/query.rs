//! The query contract every aggregation implements

use crate::bucket::{bucket_label, Granularity};
use crate::classifier::Classification;
use crate::config::{AnalyticsConfig, UserSelector};
use crate::error::{AnalyticsError, Result};
use crate::message::Message;
use crate::persist::persist_output;
use crate::table::QueryOutput;
use chatstat_ids::{ConversationMap, UserMap};
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Auxiliary values a query may require from its context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKey {
    UsersMap,
    ConversationsMap,
    Groups,
}

impl ContextKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextKey::UsersMap => "users_map",
            ContextKey::ConversationsMap => "conversations_map",
            ContextKey::Groups => "groups",
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only state shared by every query in a run
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    config: &'a AnalyticsConfig,
    users: Option<&'a UserMap>,
    conversations: Option<&'a ConversationMap>,
    groups: Option<&'a Classification>,
}

impl<'a> QueryContext<'a> {
    pub fn new(config: &'a AnalyticsConfig) -> Self {
        Self {
            config,
            users: None,
            conversations: None,
            groups: None,
        }
    }

    pub fn with_users(mut self, users: &'a UserMap) -> Self {
        self.users = Some(users);
        self
    }

    pub fn with_conversations(mut self, conversations: &'a ConversationMap) -> Self {
        self.conversations = Some(conversations);
        self
    }

    pub fn with_groups(mut self, groups: &'a Classification) -> Self {
        self.groups = Some(groups);
        self
    }

    pub fn config(&self) -> &'a AnalyticsConfig {
        self.config
    }

    pub fn has(&self, key: ContextKey) -> bool {
        match key {
            ContextKey::UsersMap => self.users.is_some(),
            ContextKey::ConversationsMap => self.conversations.is_some(),
            ContextKey::Groups => self.groups.is_some(),
        }
    }

    pub fn users(&self, query_id: &str) -> Result<&'a UserMap> {
        self.users.ok_or_else(|| missing(query_id, ContextKey::UsersMap))
    }

    pub fn conversations(&self, query_id: &str) -> Result<&'a ConversationMap> {
        self.conversations
            .ok_or_else(|| missing(query_id, ContextKey::ConversationsMap))
    }

    pub fn groups(&self, query_id: &str) -> Result<&'a Classification> {
        self.groups.ok_or_else(|| missing(query_id, ContextKey::Groups))
    }
}

fn missing(query_id: &str, key: ContextKey) -> AnalyticsError {
    AnalyticsError::MissingContext {
        query_id: query_id.to_string(),
        key,
    }
}

/// Concrete root user out of a selector, or `RootUserRequired`
pub fn require_user<'s>(selector: &'s UserSelector, query_id: &str) -> Result<&'s str> {
    selector
        .user_id()
        .ok_or_else(|| AnalyticsError::RootUserRequired {
            query_id: query_id.to_string(),
        })
}

/// A single aggregation over the message stream.
///
/// Implementors provide `compute`; `run` wraps it with input checks,
/// persistence and logging.
pub trait Query: Send + Sync {
    /// Stable identifier used in output file names
    fn id(&self) -> &str;

    /// Output file extension, `.csv` for tables
    fn extension(&self) -> &str {
        ".csv"
    }

    /// Bucket granularity for time-windowed grouping
    fn granularity(&self) -> Granularity {
        Granularity::Day
    }

    /// Context keys that must be present before `compute` runs
    fn required_context(&self) -> &[ContextKey] {
        &[]
    }

    /// Whether the query fails with `RootUserRequired` when the
    /// configured user is `all`
    fn requires_root_user(&self) -> bool {
        false
    }

    /// Pure function of the stream and the read-only context
    fn compute(&self, messages: &[Message], context: &QueryContext<'_>) -> Result<QueryOutput>;

    fn bucket(&self, timestamp_ms: i64) -> String {
        bucket_label(timestamp_ms, self.granularity())
    }

    fn output_path(&self, config: &AnalyticsConfig) -> PathBuf {
        config.output_path(self.id(), self.extension())
    }

    /// Validate, compute and persist; returns the written path
    fn run(&self, messages: &[Message], context: &QueryContext<'_>) -> Result<PathBuf> {
        info!(query = self.id(), "execution started");

        if messages.is_empty() {
            return Err(AnalyticsError::EmptyInput {
                query_id: self.id().to_string(),
            });
        }
        if let Some(&key) = self.required_context().iter().find(|&&k| !context.has(k)) {
            return Err(missing(self.id(), key));
        }

        let output = self.compute(messages, context)?;
        let path = self.output_path(context.config());
        persist_output(&output, &path)?;

        info!(query = self.id(), path = %path.display(), "execution finished, results saved");
        Ok(path)
    }
}
