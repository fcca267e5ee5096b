//! Run configuration for the analytics engine

use crate::error::{AnalyticsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Sentinel selecting every sender
pub const ALL_USERS: &str = "all";

/// Which sender per-user queries look at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserSelector {
    #[default]
    All,
    User(String),
}

impl UserSelector {
    pub fn parse(value: &str) -> Self {
        if value == ALL_USERS {
            UserSelector::All
        } else {
            UserSelector::User(value.to_string())
        }
    }

    pub fn matches(&self, user_id: &str) -> bool {
        match self {
            UserSelector::All => true,
            UserSelector::User(id) => id == user_id,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            UserSelector::All => None,
            UserSelector::User(id) => Some(id),
        }
    }
}

impl From<String> for UserSelector {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<UserSelector> for String {
    fn from(value: UserSelector) -> Self {
        value.to_string()
    }
}

impl fmt::Display for UserSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserSelector::All => f.write_str(ALL_USERS),
            UserSelector::User(id) => f.write_str(id),
        }
    }
}

/// Analytics run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Directory holding inputs and receiving query outputs
    pub output_dir: PathBuf,

    /// Prefix of every identifier and output file
    pub prefix: String,

    /// Query indices or ids to run; empty runs all
    pub queries: Vec<String>,

    /// Root user for per-user queries
    pub user_id: UserSelector,

    /// Word sequence width (1-4)
    pub words_count: usize,

    /// Ascending message length thresholds for bucketed counts
    pub count_thresholds: Vec<usize>,

    /// Rows kept by the top senders ranking
    pub top_senders_limit: usize,

    pub messages_path: Option<PathBuf>,
    pub users_path: Option<PathBuf>,
    pub conversations_path: Option<PathBuf>,
}

impl AnalyticsConfig {
    pub fn new() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            prefix: "0".to_string(),
            queries: Vec::new(),
            user_id: UserSelector::All,
            words_count: 2,
            count_thresholds: vec![0, 3, 7, 15],
            top_senders_limit: 10,
            messages_path: None,
            users_path: None,
            conversations_path: None,
        }
    }

    /// Load a JSON config file; absent keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(AnalyticsError::InvalidConfig("prefix must not be empty".into()));
        }
        if !(1..=4).contains(&self.words_count) {
            return Err(AnalyticsError::InvalidConfig(format!(
                "words_count must be between 1 and 4, got {}",
                self.words_count
            )));
        }
        if self.count_thresholds.is_empty() {
            return Err(AnalyticsError::InvalidConfig(
                "count_thresholds must not be empty".into(),
            ));
        }
        if self.count_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AnalyticsError::InvalidConfig(format!(
                "count_thresholds must be strictly ascending, got {:?}",
                self.count_thresholds
            )));
        }
        if self.top_senders_limit == 0 {
            return Err(AnalyticsError::InvalidConfig(
                "top_senders_limit must be positive".into(),
            ));
        }
        Ok(())
    }

    fn input_path(&self, explicit: &Option<PathBuf>, name: &str) -> PathBuf {
        explicit
            .clone()
            .unwrap_or_else(|| self.output_dir.join(format!("{}_{}", self.prefix, name)))
    }

    pub fn messages_path(&self) -> PathBuf {
        self.input_path(&self.messages_path, "conversations.json")
    }

    pub fn users_path(&self) -> PathBuf {
        self.input_path(&self.users_path, "users.json")
    }

    pub fn conversations_path(&self) -> PathBuf {
        self.input_path(&self.conversations_path, "conversation_titles.json")
    }

    /// `{output_dir}/{prefix}_query_{id}{extension}`
    pub fn output_path(&self, query_id: &str, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_query_{}{}", self.prefix, query_id, extension))
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self::new()
    }
}
