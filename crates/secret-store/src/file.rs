//! File-backed secret store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use tracing::{debug, warn};

use crate::{SecretSlot, SecretStore, SecretStoreError};

/// A secret store that keeps the credential in `<root>/<service>/<account>`.
///
/// On Unix the file is kept at mode `0600`, including a pre-existing file
/// that had wider permissions.
#[derive(Debug, Clone)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Create a store for the default slot under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_slot(root, &SecretSlot::default())
    }

    /// Create a store for a specific slot under `root`.
    pub fn with_slot(root: impl AsRef<Path>, slot: &SecretSlot) -> Self {
        Self {
            path: root.as_ref().join(&slot.service).join(&slot.account),
        }
    }

    /// Location of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, value: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path)?;
        // `mode` only applies on creation; tighten an existing file before
        // the new value lands in it.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(value.as_bytes())?;
        file.sync_all()
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self) -> Option<SecretString> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Some(SecretString::from(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read credential file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn set(&self, value: &str) -> Result<(), SecretStoreError> {
        self.write_file(value)?;
        debug!("Stored credential in {:?}", self.path);
        Ok(())
    }

    fn delete(&self) -> Result<(), SecretStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed credential file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SecretStoreError::Io(e)),
        }
    }
}
