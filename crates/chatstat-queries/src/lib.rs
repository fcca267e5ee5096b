//! Aggregation queries over the anonymized message stream

mod annotate;
pub mod count_messages;
pub mod emoji;
pub mod executor;
pub mod gender_time_series;
pub mod most_common_strings;
pub mod registry;
pub mod time_to_respond;
pub mod top_senders;

pub use annotate::{annotate_conversation, annotate_user};
pub use count_messages::CountMessagesQuery;
pub use emoji::EmojiQuery;
pub use executor::QueryExecutor;
pub use gender_time_series::GenderTimeSeriesQuery;
pub use most_common_strings::MostCommonStringsQuery;
pub use registry::QueryRegistry;
pub use time_to_respond::{ResponseEvent, ResponseTracker, TimeToRespondQuery};
pub use top_senders::TopSendersQuery;
