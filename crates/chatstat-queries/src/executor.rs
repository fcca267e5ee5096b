//! Loads inputs once and runs the selected queries against shared state

use crate::registry::QueryRegistry;
use chatstat_core::{
    load_messages, AnalyticsConfig, AnalyticsError, Classification, Message, QueryContext, Result,
};
use chatstat_ids::{ConversationMap, UserMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct QueryExecutor {
    config: AnalyticsConfig,
    messages: Vec<Message>,
    users: Option<UserMap>,
    conversations: Option<ConversationMap>,
    classification: Classification,
    registry: QueryRegistry,
}

impl QueryExecutor {
    /// Read the message stream and identifier maps named by `config`.
    ///
    /// The message stream is mandatory; a missing map file leaves that
    /// context key absent so only the queries needing it fail.
    pub fn load(config: AnalyticsConfig) -> Result<Self> {
        config.validate()?;
        let messages = load_messages(&config.messages_path())?;
        let users = load_optional(&config.users_path(), UserMap::from_json)?;
        let conversations = load_optional(&config.conversations_path(), ConversationMap::from_json)?;
        Self::new(config, messages, users, conversations)
    }

    pub fn new(
        config: AnalyticsConfig,
        messages: Vec<Message>,
        users: Option<UserMap>,
        conversations: Option<ConversationMap>,
    ) -> Result<Self> {
        config.validate()?;
        let classification = Classification::classify(&messages);
        debug!(
            records = messages.len(),
            conversations = classification.len(),
            groups = classification.group_count(),
            "classified conversations"
        );
        let registry = QueryRegistry::from_config(&config);
        Ok(Self {
            config,
            messages,
            users,
            conversations,
            classification,
            registry,
        })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    pub fn registry(&self) -> &QueryRegistry {
        &self.registry
    }

    fn context(&self) -> QueryContext<'_> {
        let mut context = QueryContext::new(&self.config).with_groups(&self.classification);
        if let Some(users) = &self.users {
            context = context.with_users(users);
        }
        if let Some(conversations) = &self.conversations {
            context = context.with_conversations(conversations);
        }
        context
    }

    /// Run the queries selected in the configuration
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        self.run_selected(&self.config.queries)
    }

    /// Run `selectors` in order, stopping at the first failure.
    ///
    /// Every selector is resolved before anything executes.
    pub fn run_selected(&self, selectors: &[String]) -> Result<Vec<PathBuf>> {
        let queries = self.registry.resolve(selectors)?;
        let context = self.context();

        let mut written = Vec::with_capacity(queries.len());
        for query in queries {
            written.push(query.run(&self.messages, &context)?);
        }
        info!(queries = written.len(), "all queries finished");
        Ok(written)
    }
}

/// A map with the wrong shape is malformed input, like a bad stream.
fn load_optional<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> serde_json::Result<T>,
) -> Result<Option<T>> {
    if !path.exists() {
        warn!(path = %path.display(), "identifier map not found, continuing without it");
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let map = parse(&contents)
        .map_err(|err| AnalyticsError::MalformedInput(format!("{}: {}", path.display(), err)))?;
    Ok(Some(map))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor(dir: &Path, messages: Vec<Message>) -> QueryExecutor {
        let config = AnalyticsConfig {
            output_dir: dir.to_path_buf(),
            ..Default::default()
        };
        QueryExecutor::new(
            config,
            messages,
            Some(UserMap::new()),
            Some(ConversationMap::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_classification_precomputed() {
        let temp = tempfile::TempDir::new().unwrap();
        let exec = executor(
            temp.path(),
            vec![
                Message::new("c1", "a", &[], 0),
                Message::new("c1", "b", &[], 0),
                Message::new("c1", "c", &[], 0),
            ],
        );
        assert!(exec.classification().is_group("c1"));
    }

    #[test]
    fn test_unknown_query_fails_before_execution() {
        let temp = tempfile::TempDir::new().unwrap();
        let exec = executor(temp.path(), vec![Message::new("c1", "a", &["x"], 0)]);

        let err = exec
            .run_selected(&["0".to_string(), "42".to_string()])
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownQueryId { .. }));
        assert!(!temp.path().join("0_query_count_messages.csv").exists());
    }

    #[test]
    fn test_empty_stream_aborts_queue() {
        let temp = tempfile::TempDir::new().unwrap();
        let exec = executor(temp.path(), Vec::new());
        let err = exec.run().unwrap_err();
        assert!(matches!(err, AnalyticsError::EmptyInput { ref query_id } if query_id == "count_messages"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalyticsConfig {
            words_count: 0,
            ..Default::default()
        };
        assert!(QueryExecutor::new(config, Vec::new(), None, None).is_err());
    }

    #[test]
    fn test_missing_map_file_is_optional() {
        let temp = tempfile::TempDir::new().unwrap();
        let loaded = load_optional(&temp.path().join("absent.json"), UserMap::from_json).unwrap();
        assert!(loaded.is_none());
    }
}
