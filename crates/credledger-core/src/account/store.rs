//! Account storage and retrieval.

use tracing::{debug, info, warn};

use super::model::{Account, AccountId};
use crate::storage::{MemoryStorage, StorageBackend};
use crate::{Error, Result};

/// Storage key the account collection is persisted under.
const STORAGE_KEY: &str = "accounts";

/// Store for account records over a persistent key-value backend.
///
/// Holds the collection in memory and rewrites the whole list as a JSON
/// blob after every successful mutation. The store does not validate
/// records; callers run [`validate_account`](crate::validate_account)
/// before mutating.
pub struct AccountStore {
    accounts: Vec<Account>,
    backend: Box<dyn StorageBackend>,
}

impl AccountStore {
    /// Open a store over the given backend, loading any persisted records.
    ///
    /// A backend with nothing stored yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails or the persisted blob
    /// is not valid JSON.
    pub fn open(backend: impl StorageBackend + 'static) -> Result<Self> {
        let mut store = Self {
            accounts: Vec::new(),
            backend: Box::new(backend),
        };
        store.load()?;
        info!("Opened account store with {} records", store.accounts.len());
        Ok(store)
    }

    /// Create an empty store over in-memory storage, for testing.
    ///
    /// # Errors
    ///
    /// Never fails in practice; kept fallible for parity with [`Self::open`].
    pub fn in_memory() -> Result<Self> {
        Self::open(MemoryStorage::new())
    }

    /// Append a new record with empty defaults and persist.
    ///
    /// Returns the ID of the new record.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the collection fails.
    pub fn add(&mut self) -> Result<AccountId> {
        let account = Account::new();
        let id = account.id;
        self.accounts.push(account);
        self.save()?;
        debug!("Added account {id}");
        Ok(id)
    }

    /// Replace the record carrying the same ID and persist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AccountNotFound`] if no record has the given ID,
    /// or an error if persisting the collection fails.
    pub fn update(&mut self, account: Account) -> Result<()> {
        let id = account.id;
        let Some(existing) = self.accounts.iter_mut().find(|a| a.id == id) else {
            return Err(Error::AccountNotFound(id));
        };
        *existing = account;
        self.save()?;
        debug!("Updated account {id}");
        Ok(())
    }

    /// Remove the record with the given ID and persist.
    ///
    /// Deleting an unknown ID is a no-op; storage is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting the collection fails.
    pub fn delete(&mut self, id: AccountId) -> Result<()> {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != id);
        if self.accounts.len() == before {
            warn!("No account {id} to delete");
            return Ok(());
        }
        self.save()?;
        debug!("Deleted account {id}");
        Ok(())
    }

    /// Get a record by ID.
    #[must_use]
    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    /// All records, in insertion order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Number of records in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn load(&mut self) -> Result<()> {
        match self.backend.get(STORAGE_KEY)? {
            Some(blob) => {
                self.accounts = serde_json::from_str(&blob)?;
                debug!("Loaded {} accounts from storage", self.accounts.len());
            }
            None => debug!("No persisted accounts found"),
        }
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.accounts)?;
        self.backend.set(STORAGE_KEY, &blob)
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
    use crate::account::{AccountType, Label};

    #[test]
    fn add_appends_default_record() {
        let mut store = AccountStore::in_memory().unwrap();

        let id = store.add().unwrap();

        assert_eq!(store.len(), 1);
        let account = store.get(id).unwrap();
        assert_eq!(account.account_type, AccountType::Ldap);
        assert!(account.login.is_empty());
        assert!(account.password.is_none());
        assert!(account.labels.is_empty());
    }

    #[test]
    fn delete_removes_record() {
        let mut store = AccountStore::in_memory().unwrap();
        let id = store.add().unwrap();

        store.delete(id).unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn delete_of_unknown_id_is_noop() {
        let mut store = AccountStore::in_memory().unwrap();
        store.add().unwrap();

        store.delete(AccountId::new()).unwrap();

        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_replaces_record_in_place() {
        let mut store = AccountStore::in_memory().unwrap();
        let id = store.add().unwrap();

        let mut account = store.get(id).unwrap().clone();
        account.login = "new_login".to_string();
        account.account_type = AccountType::Local;
        account.password = Some("new_password".to_string());
        account.labels = Label::parse_list("work; prod");
        store.update(account).unwrap();

        let updated = store.get(id).unwrap();
        assert_eq!(updated.login, "new_login");
        assert_eq!(updated.account_type, AccountType::Local);
        assert_eq!(updated.password.as_deref(), Some("new_password"));
        assert_eq!(updated.labels.len(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_of_unknown_id_fails() {
        let mut store = AccountStore::in_memory().unwrap();

        let result = store.update(Account::new());

        assert!(matches!(result, Err(Error::AccountNotFound(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn mutations_persist_to_backend() {
        let mut store = AccountStore::in_memory().unwrap();
        store.add().unwrap();

        let blob = store.backend.get(STORAGE_KEY).unwrap().unwrap();
        let accounts: Vec<Account> = serde_json::from_str(&blob).unwrap();
        assert_eq!(accounts.len(), 1);
    }

    #[test]
    fn reload_round_trips_collection() {
        let mut store = AccountStore::in_memory().unwrap();
        let id = store.add().unwrap();
        let mut account = store.get(id).unwrap().clone();
        account.login = "jdoe".to_string();
        store.update(account).unwrap();

        let blob = store.backend.get(STORAGE_KEY).unwrap().unwrap();
        let mut backend = MemoryStorage::new();
        backend.set(STORAGE_KEY, &blob).unwrap();
        let reloaded = AccountStore::open(backend).unwrap();

        assert_eq!(reloaded.accounts(), store.accounts());
    }

    #[test]
    fn open_with_empty_backend_yields_empty_store() {
        let store = AccountStore::open(MemoryStorage::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn open_with_corrupt_blob_fails() {
        let mut backend = MemoryStorage::new();
        backend.set(STORAGE_KEY, "not json").unwrap();

        assert!(matches!(
            AccountStore::open(backend),
            Err(Error::Serde(_))
        ));
    }
}
