//! Group/direct classification of conversations

use crate::message::Message;
use std::collections::{BTreeSet, HashMap};

/// A conversation with at least this many distinct senders is a group
pub const GROUP_MIN_PARTICIPANTS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationInfo {
    pub is_group: bool,
    pub participant_ids: BTreeSet<String>,
}

impl ConversationInfo {
    pub fn participants_num(&self) -> usize {
        self.participant_ids.len()
    }
}

/// Participant sets and group labels for every conversation in a stream.
///
/// Labels come from the full participant set, so the result does not
/// depend on the order of the stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    conversations: HashMap<String, ConversationInfo>,
}

impl Classification {
    pub fn classify(messages: &[Message]) -> Self {
        let mut conversations: HashMap<String, ConversationInfo> = HashMap::new();
        for message in messages {
            conversations
                .entry(message.conversation_id.clone())
                .or_default()
                .participant_ids
                .insert(message.sender_id.clone());
        }

        for info in conversations.values_mut() {
            info.is_group = info.participant_ids.len() >= GROUP_MIN_PARTICIPANTS;
        }

        Self { conversations }
    }

    pub fn get(&self, conversation_id: &str) -> Option<&ConversationInfo> {
        self.conversations.get(conversation_id)
    }

    /// Unknown conversations are treated as direct
    pub fn is_group(&self, conversation_id: &str) -> bool {
        self.get(conversation_id).is_some_and(|info| info.is_group)
    }

    pub fn participants_num(&self, conversation_id: &str) -> usize {
        self.get(conversation_id)
            .map(ConversationInfo::participants_num)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConversationInfo)> {
        self.conversations
            .iter()
            .map(|(id, info)| (id.as_str(), info))
    }

    pub fn group_count(&self) -> usize {
        self.conversations.values().filter(|i| i.is_group).count()
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
