//! Account validation.

use super::model::{Account, AccountType};

/// Maximum login length, in characters.
pub const MAX_LOGIN_LEN: usize = 100;

/// Maximum password length, in characters.
pub const MAX_PASSWORD_LEN: usize = 100;

/// Maximum label length, in characters.
pub const MAX_LABEL_LEN: usize = 50;

/// Validation error for an account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Login is empty.
    EmptyLogin,
    /// Login exceeds the maximum length.
    LoginTooLong,
    /// Password is missing on a Local account.
    MissingPassword,
    /// Password exceeds the maximum length.
    PasswordTooLong,
    /// Password is present on an LDAP account.
    ForbiddenPassword,
    /// Label at the given index exceeds the maximum length.
    LabelTooLong(usize),
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::EmptyLogin => "Login is required",
            Self::LoginTooLong => "Login must be at most 100 characters",
            Self::MissingPassword => "Password is required for Local accounts",
            Self::PasswordTooLong => "Password must be at most 100 characters",
            Self::ForbiddenPassword => "Password must be empty for LDAP accounts",
            Self::LabelTooLong(_) => "Label must be at most 50 characters",
        }
    }

    /// Get the form field this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyLogin | Self::LoginTooLong => "login",
            Self::MissingPassword | Self::PasswordTooLong | Self::ForbiddenPassword => "password",
            Self::LabelTooLong(_) => "labels",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating an account.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Validate a candidate account record.
///
/// Returns `Ok(())` if valid, or `Err(Vec<ValidationError>)` with all
/// errors. Password presence is fully determined by the account type:
/// Local accounts require one, LDAP accounts must not carry one.
///
/// # Errors
///
/// Returns a vector of `ValidationError` if any fields are invalid.
pub fn validate_account(account: &Account) -> ValidationResult {
    let mut errors = Vec::new();

    // Login validation
    if account.login.is_empty() {
        errors.push(ValidationError::EmptyLogin);
    } else if account.login.chars().count() > MAX_LOGIN_LEN {
        errors.push(ValidationError::LoginTooLong);
    }

    // Password presence follows the account type
    match (account.account_type, account.password.as_deref()) {
        (AccountType::Local, None | Some("")) => {
            errors.push(ValidationError::MissingPassword);
        }
        (AccountType::Local, Some(password)) => {
            if password.chars().count() > MAX_PASSWORD_LEN {
                errors.push(ValidationError::PasswordTooLong);
            }
        }
        (AccountType::Ldap, Some(_)) => {
            errors.push(ValidationError::ForbiddenPassword);
        }
        (AccountType::Ldap, None) => {}
    }

    // Label validation
    for (index, label) in account.labels.iter().enumerate() {
        if label.text.chars().count() > MAX_LABEL_LEN {
            errors.push(ValidationError::LabelTooLong(index));
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
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
    use crate::account::Label;
    use proptest::prelude::*;

    fn local_account(login: &str, password: &str) -> Account {
        Account {
            account_type: AccountType::Local,
            login: login.to_string(),
            password: Some(password.to_string()),
            ..Account::new()
        }
    }

    fn ldap_account(login: &str) -> Account {
        Account {
            login: login.to_string(),
            ..Account::new()
        }
    }

    #[test]
    fn valid_ldap_account() {
        assert!(validate_account(&ldap_account("jdoe")).is_ok());
    }

    #[test]
    fn valid_local_account() {
        assert!(validate_account(&local_account("jdoe", "secret")).is_ok());
    }

    #[test]
    fn empty_login_is_rejected() {
        let errors = validate_account(&ldap_account("")).unwrap_err();
        assert_eq!(errors, vec![ValidationError::EmptyLogin]);
    }

    #[test]
    fn overlong_login_is_rejected() {
        let errors = validate_account(&ldap_account(&"a".repeat(101))).unwrap_err();
        assert_eq!(errors, vec![ValidationError::LoginTooLong]);
    }

    #[test]
    fn login_at_limit_is_accepted() {
        assert!(validate_account(&ldap_account(&"a".repeat(100))).is_ok());
    }

    #[test]
    fn login_length_counts_characters_not_bytes() {
        // 100 two-byte characters
        assert!(validate_account(&ldap_account(&"ф".repeat(100))).is_ok());
    }

    #[test]
    fn local_account_without_password_is_rejected() {
        let mut account = ldap_account("jdoe");
        account.account_type = AccountType::Local;
        let errors = validate_account(&account).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingPassword]);
    }

    #[test]
    fn local_account_with_empty_password_is_rejected() {
        let errors = validate_account(&local_account("jdoe", "")).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingPassword]);
    }

    #[test]
    fn overlong_password_is_rejected() {
        let errors = validate_account(&local_account("jdoe", &"a".repeat(101))).unwrap_err();
        assert_eq!(errors, vec![ValidationError::PasswordTooLong]);
    }

    #[test]
    fn ldap_account_with_password_is_rejected() {
        let mut account = ldap_account("jdoe");
        account.password = Some("should_be_null".to_string());
        let errors = validate_account(&account).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ForbiddenPassword]);
    }

    #[test]
    fn ldap_account_with_empty_string_password_is_rejected() {
        let mut account = ldap_account("jdoe");
        account.password = Some(String::new());
        let errors = validate_account(&account).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ForbiddenPassword]);
    }

    #[test]
    fn overlong_label_reports_its_index() {
        let mut account = ldap_account("jdoe");
        account.labels = vec![Label::new("ok"), Label::new("a".repeat(51))];
        let errors = validate_account(&account).unwrap_err();
        assert_eq!(errors, vec![ValidationError::LabelTooLong(1)]);
    }

    #[test]
    fn label_at_limit_is_accepted() {
        let mut account = ldap_account("jdoe");
        account.labels = vec![Label::new("a".repeat(50))];
        assert!(validate_account(&account).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let account = Account {
            account_type: AccountType::Local,
            labels: vec![Label::new("a".repeat(51))],
            ..Account::new()
        };

        let errors = validate_account(&account).unwrap_err();
        assert!(errors.contains(&ValidationError::EmptyLogin));
        assert!(errors.contains(&ValidationError::MissingPassword));
        assert!(errors.contains(&ValidationError::LabelTooLong(0)));
    }

    #[test]
    fn errors_map_to_form_fields() {
        assert_eq!(ValidationError::EmptyLogin.field(), "login");
        assert_eq!(ValidationError::MissingPassword.field(), "password");
        assert_eq!(ValidationError::ForbiddenPassword.field(), "password");
        assert_eq!(ValidationError::LabelTooLong(0).field(), "labels");
    }

    proptest! {
        #[test]
        fn local_accounts_within_limits_validate(
            login in "[a-zA-Z0-9_.]{1,100}",
            password in "[a-zA-Z0-9_.]{1,100}",
        ) {
            prop_assert!(validate_account(&local_account(&login, &password)).is_ok());
        }

        #[test]
        fn overlong_logins_never_validate(extra in 1usize..200) {
            let account = ldap_account(&"a".repeat(MAX_LOGIN_LEN + extra));
            prop_assert!(validate_account(&account).is_err());
        }
    }
}
