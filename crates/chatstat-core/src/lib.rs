//! Message model, conversation classification and the query contract

mod bucket;
mod classifier;
mod config;
mod error;
mod message;
mod persist;
mod query;
mod table;

pub use bucket::{bucket_label, to_datetime, Granularity};
pub use classifier::{Classification, ConversationInfo, GROUP_MIN_PARTICIPANTS};
pub use config::{AnalyticsConfig, UserSelector, ALL_USERS};
pub use error::{AnalyticsError, Result};
pub use message::{load_messages, parse_messages, Message};
pub use persist::{atomic_write, persist_output, read_csv};
pub use query::{require_user, ContextKey, Query, QueryContext};
pub use table::{Cell, QueryOutput, Table};
