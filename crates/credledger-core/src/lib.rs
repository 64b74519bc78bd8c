//! # credledger-core
//!
//! Core business logic for `CredLedger` account management.
//!
//! This crate provides:
//! - Account records — labeled LDAP or Local credential entries
//! - Field-level validation, including the conditional password rule
//!   (required for Local accounts, forbidden for LDAP accounts)
//! - Label-list parsing for free-text tag input
//! - An account store that persists the whole collection as a JSON blob
//! - Key-value storage backends (file-backed and in-memory)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
mod error;
pub mod storage;

pub use account::{
    Account, AccountId, AccountStore, AccountType, Label, ValidationError, ValidationResult,
    validate_account,
};
pub use error::{Error, Result};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
