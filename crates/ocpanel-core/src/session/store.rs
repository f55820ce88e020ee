use std::sync::Arc;

use tracing::{info, warn};

use crate::error::StorageError;

use super::storage::{MemoryStorage, TokenStorage};

/// Storage key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Handle to the session credential.
///
/// The store is the single source of truth for authentication state: it keeps
/// no copy of the token and reads the backing storage on every call. Clones
/// share the same storage.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn from_shared(storage: Arc<dyn TokenStorage>) -> Self {
        Self { storage }
    }

    /// Session backed by process-local storage
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Current bearer token, if logged in. An empty stored value reads as absent.
    pub fn get_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self
            .storage
            .get_item(TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        if token.is_empty() {
            return Err(StorageError::EmptyToken);
        }
        self.storage.set_item(TOKEN_KEY, token)?;
        info!("Session token stored");
        Ok(())
    }

    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)?;
        info!("Session token cleared");
        Ok(())
    }

    /// Check for a token, treating a storage failure as logged out
    pub fn is_authenticated(&self) -> bool {
        match self.get_token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Failed to read session token");
                false
            }
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Storage whose every operation fails, for exercising error paths
    pub(crate) struct BrokenStorage;

    impl TokenStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("storage disabled".to_string()))
        }
    }

    #[test]
    fn test_token_round_trip() {
        let session = SessionStore::in_memory();
        for token in ["abc", "eyJhbGciOiJIUzI1NiJ9.e30.sig", "with space", "ünïcödé"] {
            session.set_token(token).unwrap();
            assert_eq!(session.get_token().unwrap().as_deref(), Some(token));
        }
    }

    #[test]
    fn test_clear_token_from_any_state() {
        let session = SessionStore::in_memory();
        session.clear_token().unwrap();
        assert_eq!(session.get_token().unwrap(), None);

        session.set_token("abc").unwrap();
        session.clear_token().unwrap();
        assert_eq!(session.get_token().unwrap(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clones_share_storage() {
        let session = SessionStore::in_memory();
        let other = session.clone();
        session.set_token("shared").unwrap();
        assert_eq!(other.get_token().unwrap().as_deref(), Some("shared"));
    }

    #[test]
    fn test_empty_token_rejected_and_reads_absent() {
        let storage = Arc::new(MemoryStorage::new());
        let session = SessionStore::from_shared(storage.clone());

        assert!(matches!(session.set_token(""), Err(StorageError::EmptyToken)));

        storage.set_item(TOKEN_KEY, "").unwrap();
        assert_eq!(session.get_token().unwrap(), None);
    }

    #[test]
    fn test_storage_errors_propagate() {
        let session = SessionStore::new(BrokenStorage);
        assert!(matches!(
            session.get_token(),
            Err(StorageError::Unavailable(_))
        ));
        assert!(session.set_token("abc").is_err());
        assert!(session.clear_token().is_err());
        assert!(!session.is_authenticated());
    }
}
