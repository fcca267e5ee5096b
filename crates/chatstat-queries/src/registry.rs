//! Dispatch table of the available queries

use crate::{
    CountMessagesQuery, EmojiQuery, GenderTimeSeriesQuery, MostCommonStringsQuery,
    TimeToRespondQuery, TopSendersQuery,
};
use chatstat_core::{AnalyticsConfig, AnalyticsError, Granularity, Query, Result};

/// Fixed, ordered set of queries; the position of a query is its numeric id
pub struct QueryRegistry {
    queries: Vec<Box<dyn Query>>,
}

impl QueryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            queries: Vec::new(),
        }
    }

    /// Every query, each holding its own slice of `config`
    pub fn from_config(config: &AnalyticsConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CountMessagesQuery::new(
            config.count_thresholds.clone(),
        )));
        registry.register(Box::new(MostCommonStringsQuery::new(
            config.words_count,
            config.user_id.clone(),
        )));
        registry.register(Box::new(TimeToRespondQuery::new(config.user_id.clone())));
        registry.register(Box::new(EmojiQuery::new(config.user_id.clone())));
        registry.register(Box::new(GenderTimeSeriesQuery::new(Granularity::Day)));
        registry.register(Box::new(TopSendersQuery::new(config.top_senders_limit)));
        registry
    }

    /// Register a query at the next index
    pub fn register(&mut self, query: Box<dyn Query>) {
        self.queries.push(query);
    }

    pub fn get(&self, index: usize) -> Option<&dyn Query> {
        self.queries.get(index).map(|q| q.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Query> {
        self.queries.iter().map(|q| q.as_ref())
    }

    /// Resolve a numeric index or a query id
    pub fn find(&self, selector: &str) -> Result<&dyn Query> {
        let selector = selector.trim();
        let by_index = selector.parse::<usize>().ok().and_then(|i| self.get(i));
        by_index
            .or_else(|| self.iter().find(|q| q.id() == selector))
            .ok_or_else(|| AnalyticsError::UnknownQueryId {
                requested: selector.to_string(),
                available: self.len(),
            })
    }

    /// Resolve all selectors up front; empty selects every query in order
    pub fn resolve(&self, selectors: &[String]) -> Result<Vec<&dyn Query>> {
        if selectors.is_empty() {
            return Ok(self.iter().collect());
        }
        selectors.iter().map(|s| self.find(s)).collect()
    }

    /// Get number of registered queries
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl Default for QueryRegistry {
    fn default() -> Self {
        Self::from_config(&AnalyticsConfig::default())
    }
}
