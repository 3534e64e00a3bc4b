//! Credential storage for the War Room dashboard.
//!
//! The dashboard needs exactly one secret: the incident feed API key. This
//! crate hides where that key lives behind the [`SecretStore`] trait so the
//! refresh logic can be tested with an in-memory store.
//!
//! - [`MemorySecretStore`] - process-local slot, used in tests and embedding
//! - [`FileSecretStore`] - one owner-readable file per slot
//!
//! # Example
//!
//! ```rust
//! use secret_store::{ExposeSecret, MemorySecretStore, SecretStore};
//!
//! let store = MemorySecretStore::new();
//! assert!(!store.has());
//!
//! store.set("inc_live_abc123").unwrap();
//! assert_eq!(store.get().unwrap().expose_secret(), "inc_live_abc123");
//!
//! store.delete().unwrap();
//! store.delete().unwrap(); // already absent is still success
//! assert!(store.get().is_none());
//! ```

mod error;
mod file;
mod memory;

use std::sync::Arc;

pub use error::SecretStoreError;
pub use file::FileSecretStore;
pub use memory::MemorySecretStore;

// Re-export secrecy types used in the store API
pub use secrecy::{ExposeSecret, SecretString};

/// Default service identifier of the credential slot.
pub const DEFAULT_SERVICE: &str = "war-room";

/// Default account identifier of the credential slot.
pub const DEFAULT_ACCOUNT: &str = "incident-io-api-key";

/// The fixed (service, account) pair a store keeps its credential under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SecretSlot {
    pub service: String,
    pub account: String,
}

impl SecretSlot {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            account: account.into(),
        }
    }
}

impl Default for SecretSlot {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE, DEFAULT_ACCOUNT)
    }
}

/// A single-credential secret store.
///
/// Stores keep values exactly as given; trimming is the caller's job.
pub trait SecretStore: Send + Sync {
    /// Whether a credential is currently stored.
    fn has(&self) -> bool {
        self.get().is_some()
    }

    /// Read the stored credential, `None` when absent or unreadable.
    fn get(&self) -> Option<SecretString>;

    /// Replace the stored credential.
    fn set(&self, value: &str) -> Result<(), SecretStoreError>;

    /// Remove the stored credential. Removing an absent credential succeeds.
    fn delete(&self) -> Result<(), SecretStoreError>;
}

impl<T: SecretStore + ?Sized> SecretStore for Arc<T> {
    fn has(&self) -> bool {
        (**self).has()
    }

    fn get(&self) -> Option<SecretString> {
        (**self).get()
    }

    fn set(&self, value: &str) -> Result<(), SecretStoreError> {
        (**self).set(value)
    }

    fn delete(&self) -> Result<(), SecretStoreError> {
        (**self).delete()
    }
}
