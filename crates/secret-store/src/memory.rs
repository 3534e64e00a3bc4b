//! In-memory secret store.

use std::sync::RwLock;

use secrecy::SecretString;

use crate::{SecretStore, SecretStoreError};

/// A secret store that keeps the credential in process memory.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    slot: RwLock<Option<SecretString>>,
}

impl MemorySecretStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `value`.
    pub fn with_secret(value: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(SecretString::from(value.into()))),
        }
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self) -> Option<SecretString> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    fn set(&self, value: &str) -> Result<(), SecretStoreError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| SecretStoreError::Unavailable(e.to_string()))?;
        *slot = Some(SecretString::from(value.to_string()));
        Ok(())
    }

    fn delete(&self) -> Result<(), SecretStoreError> {
        let mut slot = self
            .slot
            .write()
            .map_err(|e| SecretStoreError::Unavailable(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_set_get_delete() {
        let store = MemorySecretStore::new();
        assert!(!store.has());
        assert!(store.get().is_none());

        store.set("key-1").unwrap();
        assert!(store.has());
        assert_eq!(store.get().unwrap().expose_secret(), "key-1");

        store.set("key-2").unwrap();
        assert_eq!(store.get().unwrap().expose_secret(), "key-2");

        store.delete().unwrap();
        assert!(!store.has());
    }

    #[test]
    fn test_delete_absent_succeeds() {
        let store = MemorySecretStore::new();
        assert!(store.delete().is_ok());
    }

    #[test]
    fn test_values_are_not_normalized() {
        let store = MemorySecretStore::with_secret("  padded \n");
        assert_eq!(store.get().unwrap().expose_secret(), "  padded \n");
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let store = MemorySecretStore::with_secret("super-secret");
        assert!(!format!("{:?}", store).contains("super-secret"));
    }
}
