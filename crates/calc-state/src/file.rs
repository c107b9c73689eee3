//! World state persisted as a single JSON document.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{StateError, StateResult};
use crate::kyc::{KycRegistry, KycVerifier};
use crate::traits::{check_key, WorldState};

/// File-backed world state.
///
/// The whole key space lives in memory and is mirrored to `path` as a JSON
/// object mapping each key to its value's bytes. Every put rewrites the file
/// through a temporary sibling and an atomic rename, so a crash mid-write
/// leaves the previous document intact.
pub struct FileWorldState {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    kyc: Box<dyn KycVerifier>,
}

impl FileWorldState {
    /// Open (or create on first write) the state document at `path`.
    pub fn open(path: impl AsRef<Path>) -> StateResult<Self> {
        Self::open_with_kyc(path, KycRegistry::new())
    }

    /// Like [`FileWorldState::open`], using `kyc` for checked writes.
    pub fn open_with_kyc(
        path: impl AsRef<Path>,
        kyc: impl KycVerifier + 'static,
    ) -> StateResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let bytes = fs::read(&path)?;
            if bytes.is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_slice(&bytes).map_err(|e| {
                    StateError::Serialization(format!("{}: {e}", path.display()))
                })?
            }
        } else {
            BTreeMap::new()
        };
        info!(path = %path.display(), keys = entries.len(), "world state opened");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
            kyc: Box::new(kyc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    fn persist(&self, entries: &BTreeMap<String, Vec<u8>>) -> StateResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let payload =
            serde_json::to_vec(entries).map_err(|e| StateError::Serialization(e.to_string()))?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&payload)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StateError::Io(e.error))?;

        debug!(path = %self.path.display(), bytes = payload.len(), "world state persisted");
        Ok(())
    }
}

impl WorldState for FileWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        check_key(key)?;
        let entries = self
            .entries
            .read()
            .map_err(|e| StateError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(entries.get(key).filter(|v| !v.is_empty()).cloned())
    }

    fn put_state_without_kyc(&self, key: &str, value: &[u8]) -> StateResult<()> {
        check_key(key)?;
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StateError::Unavailable(format!("lock poisoned: {e}")))?;

        let previous = entries.insert(key.to_string(), value.to_vec());
        if let Err(e) = self.persist(&entries) {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn kyc_verifier(&self) -> &dyn KycVerifier {
        self.kyc.as_ref()
    }
}

impl std::fmt::Debug for FileWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWorldState")
            .field("path", &self.path)
            .field("key_count", &self.len())
            .finish()
    }
}
