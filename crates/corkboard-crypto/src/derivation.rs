//! Message key derivation using HKDF

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::exchange::SharedSecret;

/// Label used for message key derivation
const MESSAGE_KEY_LABEL: &[u8] = b"corkboardMessageV1";

/// Total length of derived key material
pub const MESSAGE_KEY_MATERIAL_SIZE: usize = 96;

/// Length of the AEAD encryption key
pub const ENCRYPTION_KEY_SIZE: usize = 32;

/// Offset of the nonce material within the derived output
const NONCE_MATERIAL_OFFSET: usize = 64;

/// Key material expanded from one shared secret.
///
/// Layout of the 96 derived bytes:
/// - bytes 0-31: encryption key
/// - bytes 32-63: authentication material (reserved)
/// - bytes 64-95: nonce material
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MessageKeyMaterial {
    bytes: [u8; MESSAGE_KEY_MATERIAL_SIZE],
}

impl MessageKeyMaterial {
    /// 32-byte XChaCha20-Poly1305 key.
    pub fn encryption_key(&self) -> [u8; ENCRYPTION_KEY_SIZE] {
        let mut key = [0u8; ENCRYPTION_KEY_SIZE];
        key.copy_from_slice(&self.bytes[..ENCRYPTION_KEY_SIZE]);
        key
    }

    /// Reserved authentication material (bytes 32-63).
    pub fn auth_material(&self) -> &[u8] {
        &self.bytes[ENCRYPTION_KEY_SIZE..NONCE_MATERIAL_OFFSET]
    }

    /// Tail of the derived output, from which the AEAD nonce is taken.
    pub fn nonce_material(&self) -> &[u8] {
        &self.bytes[NONCE_MATERIAL_OFFSET..]
    }

    /// Full 96-byte output.
    pub fn as_bytes(&self) -> &[u8; MESSAGE_KEY_MATERIAL_SIZE] {
        &self.bytes
    }
}

/// Expand a shared secret into message key material.
///
/// HKDF-SHA256, no salt, fixed info label. Pure: both sides of a pairwise
/// exchange compute identical material independently.
pub fn derive_message_key(shared_secret: &SharedSecret) -> MessageKeyMaterial {
    let hkdf = Hkdf::<Sha256>::new(None, shared_secret.as_bytes());

    let mut bytes = [0u8; MESSAGE_KEY_MATERIAL_SIZE];
    let Ok(()) = hkdf.expand(MESSAGE_KEY_LABEL, &mut bytes) else {
        unreachable!("96 bytes is a valid HKDF-SHA256 output length");
    };

    MessageKeyMaterial { bytes }
}
