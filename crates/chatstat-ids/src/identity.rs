//! Read-only maps from anonymized ids to display data

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Placeholder returned for ids missing from a map
pub const UNKNOWN: &str = "unknown";

/// Demographic attribute attached to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    /// Anything other than "male"/"female" maps to `Unknown`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub name: String,
    pub gender: Gender,
}

/// `user_id -> (display_name, gender)`
#[derive(Debug, Clone, Default)]
pub struct UserMap {
    users: HashMap<String, UserInfo>,
}

impl UserMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `{"<user_id>": ["<name>", "<gender>"], ...}`
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&contents)?)
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        let raw: HashMap<String, (String, String)> = serde_json::from_str(contents)?;
        let users = raw
            .into_iter()
            .map(|(id, (name, gender))| {
                (
                    id,
                    UserInfo {
                        name,
                        gender: Gender::parse(&gender),
                    },
                )
            })
            .collect();
        Ok(Self { users })
    }

    pub fn insert(&mut self, user_id: impl Into<String>, name: impl Into<String>, gender: Gender) {
        self.users.insert(
            user_id.into(),
            UserInfo {
                name: name.into(),
                gender,
            },
        );
    }

    pub fn get(&self, user_id: &str) -> Option<&UserInfo> {
        self.users.get(user_id)
    }

    /// Name and gender for `user_id`, `("unknown", Unknown)` when absent
    pub fn resolve(&self, user_id: &str) -> (&str, Gender) {
        match self.users.get(user_id) {
            Some(info) => (info.name.as_str(), info.gender),
            None => (UNKNOWN, Gender::Unknown),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// `conversation_id -> display title`
#[derive(Debug, Clone, Default)]
pub struct ConversationMap {
    titles: HashMap<String, String>,
}

impl ConversationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&contents)?)
    }

    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        Ok(Self {
            titles: serde_json::from_str(contents)?,
        })
    }

    pub fn insert(&mut self, conversation_id: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(conversation_id.into(), title.into());
    }

    pub fn title(&self, conversation_id: &str) -> &str {
        self.titles
            .get(conversation_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("male"), Gender::Male);
        assert_eq!(Gender::parse("Female"), Gender::Female);
        assert_eq!(Gender::parse("robot"), Gender::Unknown);
        assert_eq!(Gender::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_user_map_from_json() {
        let users =
            UserMap::from_json(r#"{"0_1": ["Anna", "female"], "0_2": ["Jan", "male"]}"#).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users.resolve("0_1"), ("Anna", Gender::Female));
        assert_eq!(users.resolve("0_2"), ("Jan", Gender::Male));
    }

    #[test]
    fn test_missing_user_resolves_unknown() {
        let users = UserMap::new();
        assert_eq!(users.resolve("0_99"), ("unknown", Gender::Unknown));
    }

    #[test]
    fn test_conversation_titles() {
        let mut titles = ConversationMap::from_json(r#"{"0_5": "Hiking club"}"#).unwrap();
        titles.insert("0_6", "Family");
        assert_eq!(titles.title("0_5"), "Hiking club");
        assert_eq!(titles.title("0_6"), "Family");
        assert_eq!(titles.title("0_7"), "unknown");
    }

    #[test]
    fn test_user_map_load() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("0_users.json");
        std::fs::write(&path, r#"{"0_1": ["Zoë", "female"]}"#).unwrap();

        let users = UserMap::load(&path).unwrap();
        assert_eq!(users.resolve("0_1"), ("Zoë", Gender::Female));
    }

    #[test]
    fn test_malformed_user_map_is_error() {
        assert!(UserMap::from_json(r#"{"0_1": "Anna"}"#).is_err());
    }
}
