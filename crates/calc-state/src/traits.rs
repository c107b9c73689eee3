use std::sync::Arc;

use crate::error::{StateError, StateResult};
use crate::kyc::KycVerifier;

/// Key-value world state maintained by the ledger platform.
///
/// All implementations must satisfy these invariants:
/// - A missing key reads as `Ok(None)`. So does a key holding an empty value.
/// - A put replaces any previous value for the key in full.
/// - A failed put leaves the previous value readable.
/// - The state never interprets values -- it is a pure key-value store.
pub trait WorldState: Send + Sync {
    /// Read the value stored under `key`.
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>>;

    /// Write `value` under `key` without consulting the KYC verifier.
    fn put_state_without_kyc(&self, key: &str, value: &[u8]) -> StateResult<()>;

    /// Verifier consulted by [`WorldState::put_state`].
    fn kyc_verifier(&self) -> &dyn KycVerifier;

    /// Write `value` under `key` on behalf of `identity`.
    ///
    /// Fails with [`StateError::KycRejected`] unless the verifier accepts the
    /// identity.
    fn put_state(&self, key: &str, value: &[u8], identity: &str) -> StateResult<()> {
        if !self.kyc_verifier().is_verified(identity)? {
            return Err(StateError::KycRejected {
                identity: identity.to_string(),
            });
        }
        self.put_state_without_kyc(key, value)
    }
}

impl<T: WorldState + ?Sized> WorldState for Arc<T> {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        (**self).get_state(key)
    }

    fn put_state_without_kyc(&self, key: &str, value: &[u8]) -> StateResult<()> {
        (**self).put_state_without_kyc(key, value)
    }

    fn kyc_verifier(&self) -> &dyn KycVerifier {
        (**self).kyc_verifier()
    }

    fn put_state(&self, key: &str, value: &[u8], identity: &str) -> StateResult<()> {
        (**self).put_state(key, value, identity)
    }
}

impl<T: WorldState + ?Sized> WorldState for &T {
    fn get_state(&self, key: &str) -> StateResult<Option<Vec<u8>>> {
        (**self).get_state(key)
    }

    fn put_state_without_kyc(&self, key: &str, value: &[u8]) -> StateResult<()> {
        (**self).put_state_without_kyc(key, value)
    }

    fn kyc_verifier(&self) -> &dyn KycVerifier {
        (**self).kyc_verifier()
    }

    fn put_state(&self, key: &str, value: &[u8], identity: &str) -> StateResult<()> {
        (**self).put_state(key, value, identity)
    }
}

/// Reject keys the ledger cannot address.
pub(crate) fn check_key(key: &str) -> StateResult<()> {
    if key.is_empty() {
        return Err(StateError::EmptyKey);
    }
    Ok(())
}
