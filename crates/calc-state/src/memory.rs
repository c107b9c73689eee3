use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::kyc::{KycRegistry, KycVerifier};
use crate::traits::{check_key, WorldState};

/// In-memory, `BTreeMap`-based world state.
///
/// Intended for tests and embedding. Values are cloned on read/write. Reads
/// and writes can be made to fail on demand to exercise error paths.
pub struct InMemoryWorldState {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    kyc: Box<dyn KycVerifier>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryWorldState {
    /// Create an empty state whose KYC registry verifies nobody.
    pub fn new() -> Self {
        Self::with_kyc(KycRegistry::new())
    }

    /// Create an empty state using `kyc` for checked writes.
    pub fn with_kyc(kyc: impl KycVerifier + 'static) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            kyc: Box::new(kyc),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Sorted list of stored keys.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .expect("lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }

    /// Make subsequent reads fail with [`StateError::Unavailable`].
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent writes fail with [`StateError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Default for InMemoryWorldState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldState for InMemoryWorldState {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        check_key(key)?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StateError::Unavailable("injected read failure".into()));
        }
        let entries = self.entries.read().expect("lock poisoned");
        Ok(entries.get(key).filter(|v| !v.is_empty()).cloned())
    }

    fn put_state_without_kyc(&self, key: &str, value: &[u8]) -> StateResult<()> {
        check_key(key)?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StateError::Unavailable("injected write failure".into()));
        }
        let mut entries = self.entries.write().expect("lock poisoned");
        entries.insert(key.to_string(), value.to_vec());
        debug!(key, len = value.len(), "state put");
        Ok(())
    }

    fn kyc_verifier(&self) -> &dyn KycVerifier {
        self.kyc.as_ref()
    }
}

impl std::fmt::Debug for InMemoryWorldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryWorldState")
            .field("key_count", &self.len())
            .finish()
    }
}
