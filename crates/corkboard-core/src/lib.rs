//! Corkboard Core
//!
//! Key agreement over an untrusted public board. Parties publish X25519
//! public points under their names, derive pairwise secrets from each
//! other's entries, and agree on group secrets by repeatedly applying their
//! scalars to shared composites.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Node<E, K, D>                            │
//! │  messaging: identities, peer/group AEAD  │
//! │  group:     base, rounds, resolution     │
//! └──────┬──────────────┬──────────────┬─────┘
//!        │              │              │
//!   Environment      KeyStore      Directory
//!   (randomness)     (local keys)  (public board)
//! ```
//!
//! Each seam is a trait so that tests run with a seeded RNG, an in-memory
//! key store and an in-memory board, while the binary uses the OS RNG, the
//! filesystem and a redb file.
//!
//! # Security
//!
//! The board is never trusted. Every loaded value is checked as a curve point
//! and degenerate points are rejected before use. The board is, however,
//! trusted not to substitute identities: nothing here authenticates who
//! published an entry.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod armor;
mod directory;
mod env;
mod error;
mod group;
mod identity;
pub mod keystore;
mod messaging;
mod node;

pub use corkboard_crypto::{PrivateScalar, PublicPoint, SharedSecret};
pub use directory::{Directory, DirectoryError, MemoryDirectory, RedbDirectory};
pub use env::{Environment, SystemEnv};
#[cfg(any(test, feature = "test-utils"))]
pub use env::test_utils;
pub use error::Error;
pub use group::{Round, RoundReport, composite_name};
pub use identity::Identity;
pub use keystore::{FsKeyStore, KeyStore, KeyStoreError, MemoryKeyStore};
pub use node::Node;
