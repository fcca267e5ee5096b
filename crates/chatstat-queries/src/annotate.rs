use chatstat_core::{Cell, Classification};
use chatstat_ids::UserMap;

/// `[name, gender]` cells for a sender
pub fn annotate_user(users: &UserMap, user_id: &str) -> [Cell; 2] {
    let (name, gender) = users.resolve(user_id);
    [Cell::text(name), Cell::from(gender.as_str())]
}

/// `[is_group, participants_num]` cells for a conversation
pub fn annotate_conversation(groups: &Classification, conversation_id: &str) -> [Cell; 2] {
    [
        Cell::from(groups.is_group(conversation_id)),
        Cell::from(groups.participants_num(conversation_id)),
    ]
}
