//! Identifier maps and anonymized-id bookkeeping shared by the analytics engine

mod encoding;
mod identity;
mod sequence;

pub use encoding::repair_text;
pub use identity::{ConversationMap, Gender, UserInfo, UserMap, UNKNOWN};
pub use sequence::{Anonymizer, IdSequence};
