//! Identity verification consulted by KYC-checked writes.

use std::collections::BTreeSet;
use std::sync::RwLock;

use crate::error::{StateError, StateResult};

/// Decides whether a submitting identity has passed KYC.
///
/// The trait is object-safe and `Send + Sync` so backends can hold a
/// `Box<dyn KycVerifier>`.
pub trait KycVerifier: Send + Sync {
    fn is_verified(&self, identity: &str) -> StateResult<bool>;
}

/// Treats every identity as verified.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAllKyc;

impl KycVerifier for AllowAllKyc {
    fn is_verified(&self, _identity: &str) -> StateResult<bool> {
        Ok(true)
    }
}

/// Treats every identity as unverified.
#[derive(Clone, Copy, Debug, Default)]
pub struct DenyAllKyc;

impl KycVerifier for DenyAllKyc {
    fn is_verified(&self, _identity: &str) -> StateResult<bool> {
        Ok(false)
    }
}

/// Explicit set of verified identities. Starts empty.
#[derive(Debug, Default)]
pub struct KycRegistry {
    verified: RwLock<BTreeSet<String>>,
}

impl KycRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry pre-populated with `identities`.
    pub fn with_verified<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verified: RwLock::new(identities.into_iter().map(Into::into).collect()),
        }
    }

    /// Mark `identity` as verified. Returns `false` if it already was.
    pub fn verify(&self, identity: impl Into<String>) -> bool {
        self.verified
            .write()
            .expect("lock poisoned")
            .insert(identity.into())
    }

    /// Withdraw verification. Returns `true` if the identity was verified.
    pub fn revoke(&self, identity: &str) -> bool {
        self.verified.write().expect("lock poisoned").remove(identity)
    }
}

impl KycVerifier for KycRegistry {
    fn is_verified(&self, identity: &str) -> StateResult<bool> {
        let verified = self
            .verified
            .read()
            .map_err(|e| StateError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(verified.contains(identity))
    }
}
