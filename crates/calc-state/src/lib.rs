//! World-state storage for the calculator chaincode.
//!
//! The world state is the ledger's key-value layer. Contracts never own it;
//! they receive a handle implementing [`WorldState`] and issue `get_state` /
//! `put_state*` calls against it. Durability, isolation and consensus are the
//! backend's business.
//!
//! # Storage Backends
//!
//! - [`InMemoryWorldState`] -- `BTreeMap`-based state for tests and embedding,
//!   with optional fault injection
//! - [`FileWorldState`] -- single JSON document on disk, rewritten atomically
//!   on every put
//!
//! # Identity Checks
//!
//! Writes come in two flavours. [`WorldState::put_state`] consults the
//! backend's [`KycVerifier`] for the submitting identity before writing;
//! [`WorldState::put_state_without_kyc`] skips that check entirely.
//!
//! # Design Rules
//!
//! 1. An absent key is `Ok(None)`, never an error.
//! 2. An empty stored value reads back as absent.
//! 3. A put either lands completely or leaves the previous value in place.
//! 4. All backend errors are propagated, never silently ignored.

pub mod error;
pub mod file;
pub mod kyc;
pub mod memory;
pub mod traits;

pub use error::{StateError, StateResult};
pub use file::FileWorldState;
pub use kyc::{AllowAllKyc, DenyAllKyc, KycRegistry, KycVerifier};
pub use memory::InMemoryWorldState;
pub use traits::WorldState;
