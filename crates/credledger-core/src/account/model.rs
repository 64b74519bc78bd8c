//! Account model types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a fresh random ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authentication type for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccountType {
    /// Credentials are checked against a directory server.
    #[default]
    #[serde(rename = "LDAP")]
    Ldap,
    /// Credentials are stored with the record.
    #[serde(rename = "Local")]
    Local,
}

impl AccountType {
    /// Get display name for the account type.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Ldap => "LDAP",
            Self::Local => "Local",
        }
    }

    /// Whether records of this type carry a password.
    #[must_use]
    pub const fn requires_password(&self) -> bool {
        matches!(self, Self::Local)
    }
}

/// Free-text tag attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Tag text (at most 50 characters).
    pub text: String,
}

impl Label {
    /// Create a label from its text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Parse a semicolon-separated label list as entered in a form field.
    ///
    /// Fragments are trimmed; empty fragments are dropped, so
    /// `"work; ; prod"` yields two labels.
    #[must_use]
    pub fn parse_list(input: &str) -> Vec<Self> {
        input
            .split(';')
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(Self::new)
            .collect()
    }

    /// Render a label list back into form-field text, joined with `"; "`.
    #[must_use]
    pub fn format_list(labels: &[Self]) -> String {
        labels
            .iter()
            .map(|label| label.text.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A stored credential record.
///
/// The serialized form matches the persisted storage format: `type` is
/// written as `"LDAP"` or `"Local"` and `password` is `null` for LDAP
/// accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Tags attached to the record.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Authentication type.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Login name.
    pub login: String,
    /// Password (`None` for LDAP accounts).
    pub password: Option<String>,
}

impl Account {
    /// Create a new record with empty defaults: a fresh ID, LDAP type,
    /// blank login, no labels, no password.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: AccountId::new(),
            labels: Vec::new(),
            account_type: AccountType::Ldap,
            login: String::new(),
            password: None,
        }
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal
)]
mod tests {
    use super::*;

    mod account_id_tests {
        use super::*;

        #[test]
        fn new_ids_are_unique() {
            let id1 = AccountId::new();
            let id2 = AccountId::new();
            assert_ne!(id1, id2);
        }

        #[test]
        fn display_matches_inner_uuid() {
            let id = AccountId::new();
            assert_eq!(format!("{id}"), id.0.to_string());
        }
    }

    mod account_type_tests {
        use super::*;

        #[test]
        fn default_is_ldap() {
            assert_eq!(AccountType::default(), AccountType::Ldap);
        }

        #[test]
        fn display_names() {
            assert_eq!(AccountType::Ldap.display_name(), "LDAP");
            assert_eq!(AccountType::Local.display_name(), "Local");
        }

        #[test]
        fn only_local_requires_password() {
            assert!(!AccountType::Ldap.requires_password());
            assert!(AccountType::Local.requires_password());
        }

        #[test]
        fn serializes_as_wire_strings() {
            assert_eq!(serde_json::to_string(&AccountType::Ldap).unwrap(), "\"LDAP\"");
            assert_eq!(
                serde_json::to_string(&AccountType::Local).unwrap(),
                "\"Local\""
            );
        }
    }

    mod label_tests {
        use super::*;

        #[test]
        fn parse_list_splits_and_trims() {
            let labels = Label::parse_list("label1; label2");
            assert_eq!(labels, vec![Label::new("label1"), Label::new("label2")]);
        }

        #[test]
        fn parse_list_drops_empty_fragments() {
            let labels = Label::parse_list("work; ; prod;");
            assert_eq!(labels, vec![Label::new("work"), Label::new("prod")]);
        }

        #[test]
        fn parse_list_of_blank_input_is_empty() {
            assert!(Label::parse_list("").is_empty());
            assert!(Label::parse_list("  ;  ").is_empty());
        }

        #[test]
        fn format_list_joins_with_separator() {
            let labels = vec![Label::new("work"), Label::new("prod")];
            assert_eq!(Label::format_list(&labels), "work; prod");
        }

        #[test]
        fn parse_format_round_trip() {
            let text = "alpha; beta; gamma";
            assert_eq!(Label::format_list(&Label::parse_list(text)), text);
        }
    }

    mod account_tests {
        use super::*;

        #[test]
        fn new_creates_empty_ldap_record() {
            let account = Account::new();
            assert_eq!(account.account_type, AccountType::Ldap);
            assert!(account.login.is_empty());
            assert!(account.password.is_none());
            assert!(account.labels.is_empty());
        }

        #[test]
        fn serialized_shape_matches_storage_format() {
            let account = Account {
                id: AccountId(Uuid::nil()),
                labels: vec![Label::new("work")],
                account_type: AccountType::Ldap,
                login: "jdoe".to_string(),
                password: None,
            };

            let json = serde_json::to_value(&account).unwrap();
            assert_eq!(
                json,
                serde_json::json!({
                    "id": "00000000-0000-0000-0000-000000000000",
                    "labels": [{"text": "work"}],
                    "type": "LDAP",
                    "login": "jdoe",
                    "password": null,
                })
            );
        }

        #[test]
        fn deserializes_without_labels_field() {
            let json = r#"{
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "type": "Local",
                "login": "jdoe",
                "password": "secret"
            }"#;

            let account: Account = serde_json::from_str(json).unwrap();
            assert!(account.labels.is_empty());
            assert_eq!(account.account_type, AccountType::Local);
            assert_eq!(account.password.as_deref(), Some("secret"));
        }
    }
}
