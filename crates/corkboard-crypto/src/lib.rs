//! Corkboard Cryptographic Primitives
//!
//! Cryptographic building blocks for Corkboard. Pure functions with
//! deterministic outputs. Callers provide random scalars so that every
//! operation can be replayed in tests.
//!
//! # Key Lifecycle
//!
//! A raw X25519 shared secret is never used directly. It is expanded with
//! HKDF into 96 bytes of message key material, of which the first 32 bytes
//! key the AEAD and the tail seeds the nonce.
//!
//! ```text
//! Private Scalar ── X25519 ──► Shared Secret
//!        ▲                          │
//! Public Point                      ▼
//!                        HKDF → Message Key Material
//!                                   │
//!                                   ▼
//!                    XChaCha20-Poly1305 → Ciphertext
//! ```
//!
//! The same X25519 operation also drives group key agreement: because
//! clamped scalar multiplication on a fixed u-coordinate commutes, applying a
//! set of scalars to a base point in any order lands on the same point.
//!
//! # Security
//!
//! Point validation:
//! - Every scalar multiplication rejects non-contributory results, so
//!   low-order and identity inputs never produce a usable secret
//!
//! Authenticity:
//! - XChaCha20-Poly1305 AEAD provides tamper-proof encryption
//! - Failed authentication tag -> reject message, no partial plaintext
//!
//! Nonce reuse:
//! - The AEAD nonce is derived from the key material, not drawn at random.
//!   Two messages sealed under the same shared secret share a nonce. The
//!   ephemeral variants avoid this by deriving from a fresh point per message.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod derivation;
mod encryption;
mod error;
mod exchange;

pub use derivation::{
    ENCRYPTION_KEY_SIZE, MESSAGE_KEY_MATERIAL_SIZE, MessageKeyMaterial, derive_message_key,
};
pub use encryption::{
    EphemeralEnvelope, NONCE_SIZE, TAG_SIZE, decrypt, encrypt, open, open_ephemeral,
    open_from_point, seal, seal_ephemeral, seal_for_point,
};
pub use error::CryptoError;
pub use exchange::{
    Keypair, POINT_SIZE, PrivateScalar, PublicPoint, SCALAR_SIZE, SharedSecret, dh,
};
