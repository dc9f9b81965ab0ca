//! X25519 Diffie-Hellman over Curve25519
//!
//! # Security Properties
//!
//! - Constant time: scalar multiplication is delegated to `x25519-dalek`
//! - Contributory: results that collapse to the identity are rejected
//! - Hygiene: private scalars and shared secrets are zeroized on drop and
//!   redacted from `Debug` output

use std::fmt;

use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;

/// Size of an encoded public point (Montgomery u-coordinate)
pub const POINT_SIZE: usize = 32;

/// Size of an encoded private scalar
pub const SCALAR_SIZE: usize = 32;

/// A public Curve25519 point, encoded as its 32-byte u-coordinate.
///
/// Used for identity public keys, group base points and every composite
/// value published during group key agreement.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicPoint([u8; POINT_SIZE]);

impl PublicPoint {
    /// Wrap a 32-byte encoding.
    pub fn from_bytes(bytes: [u8; POINT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse a point from an untrusted byte slice (e.g. a directory entry).
    ///
    /// # Errors
    ///
    /// - `InvalidPoint`: slice is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; POINT_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidPoint {
            reason: format!("expected {POINT_SIZE} bytes, got {}", bytes.len()),
        })?;
        Ok(Self(array))
    }

    /// Encoded u-coordinate.
    pub fn as_bytes(&self) -> &[u8; POINT_SIZE] {
        &self.0
    }
}

impl fmt::Debug for PublicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicPoint(")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..)")
    }
}

/// A private X25519 scalar.
///
/// Clamping is applied inside every scalar multiplication, so any 32 bytes
/// form a valid scalar.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateScalar([u8; SCALAR_SIZE]);

impl PrivateScalar {
    /// Wrap 32 bytes (typically fresh CSPRNG output) as a scalar.
    pub fn from_bytes(bytes: [u8; SCALAR_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse a scalar from stored key material.
    ///
    /// # Errors
    ///
    /// - `InvalidLength`: slice is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; SCALAR_SIZE] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidLength { expected: SCALAR_SIZE, actual: bytes.len() })?;
        Ok(Self(array))
    }

    /// Raw scalar bytes, for persisting to local storage only.
    pub fn as_bytes(&self) -> &[u8; SCALAR_SIZE] {
        &self.0
    }

    /// Public point for this scalar on the standard base point.
    pub fn public_point(&self) -> PublicPoint {
        let secret = StaticSecret::from(self.0);
        PublicPoint(PublicKey::from(&secret).to_bytes())
    }
}

impl fmt::Debug for PrivateScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateScalar(<redacted>)")
    }
}

/// Raw 32-byte output of a scalar multiplication.
///
/// Depending on context this is a pairwise secret (fed to
/// [`crate::derive_message_key`]), a composite value that gets published
/// ([`SharedSecret::to_point`]), or a resolved group secret that is later
/// used as a scalar itself ([`SharedSecret::to_scalar`]).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; 32]);

impl SharedSecret {
    /// Parse a secret from stored key material.
    ///
    /// # Errors
    ///
    /// - `InvalidLength`: slice is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidLength { expected: 32, actual: bytes.len() })?;
        Ok(Self(array))
    }

    /// Raw secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Reinterpret the output as a public point.
    ///
    /// X25519 outputs are u-coordinates, so a scalar multiplication result
    /// can be published and multiplied again by another party.
    pub fn to_point(&self) -> PublicPoint {
        PublicPoint(self.0)
    }

    /// Reinterpret the output as a private scalar.
    pub fn to_scalar(&self) -> PrivateScalar {
        PrivateScalar(self.0)
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// A private scalar together with its public point.
#[derive(Clone, Debug)]
pub struct Keypair {
    scalar: PrivateScalar,
    public: PublicPoint,
}

impl Keypair {
    /// Derive the keypair for a scalar.
    pub fn from_scalar(scalar: PrivateScalar) -> Self {
        let public = scalar.public_point();
        Self { scalar, public }
    }

    /// Private half.
    pub fn scalar(&self) -> &PrivateScalar {
        &self.scalar
    }

    /// Public half.
    pub fn public(&self) -> &PublicPoint {
        &self.public
    }
}

/// Multiply `point` by `scalar`.
///
/// Constant time in the scalar. Symmetric for keypairs: `dh(a, B) == dh(b, A)`.
///
/// # Errors
///
/// - `InvalidPoint`: the result is all-zero, meaning `point` has low order
///   or is the identity
pub fn dh(scalar: &PrivateScalar, point: &PublicPoint) -> Result<SharedSecret, CryptoError> {
    let secret = StaticSecret::from(scalar.0);
    let shared = secret.diffie_hellman(&PublicKey::from(point.0));

    if !shared.was_contributory() {
        return Err(CryptoError::InvalidPoint {
            reason: "non-contributory result (low-order point)".to_string(),
        });
    }

    Ok(SharedSecret(shared.to_bytes()))
}
