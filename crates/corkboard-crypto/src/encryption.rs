//! Message encryption using `XChaCha20-Poly1305`
//!
//! All functions are pure. The nonce is taken from derived key material
//! rather than drawn at random, so sealing twice under one shared secret
//! reuses the nonce. The ephemeral variants derive from a fresh point per
//! message and do not have this problem.

use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};

use crate::{
    derivation::{ENCRYPTION_KEY_SIZE, MessageKeyMaterial, derive_message_key},
    error::CryptoError,
    exchange::{POINT_SIZE, PrivateScalar, PublicPoint, dh},
};

/// Size of the `XChaCha20` nonce (24 bytes)
pub const NONCE_SIZE: usize = 24;

/// Poly1305 tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Encrypt `plaintext` under `key` with a nonce taken from `nonce_material`.
///
/// The first 24 bytes of `nonce_material` form the nonce.
///
/// # Errors
///
/// - `InvalidLength`: `nonce_material` is shorter than 24 bytes
pub fn encrypt(
    nonce_material: &[u8],
    key: &[u8; ENCRYPTION_KEY_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let nonce = build_nonce(nonce_material)?;
    let cipher = XChaCha20Poly1305::new(key.into());

    let Ok(ciphertext) = cipher.encrypt(XNonce::from_slice(&nonce), plaintext) else {
        unreachable!("XChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    Ok(ciphertext)
}

/// Decrypt `ciphertext` under `key` with a nonce taken from `nonce_material`.
///
/// # Errors
///
/// - `InvalidLength`: `nonce_material` is shorter than 24 bytes
/// - `AuthenticationFailed`: tag mismatch (tampering or wrong key)
pub fn decrypt(
    nonce_material: &[u8],
    key: &[u8; ENCRYPTION_KEY_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let nonce = build_nonce(nonce_material)?;
    let cipher = XChaCha20Poly1305::new(key.into());

    cipher
        .decrypt(XNonce::from_slice(&nonce), ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)
}

/// Encrypt with the key and nonce split out of derived material.
pub fn seal(material: &MessageKeyMaterial, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    encrypt(material.nonce_material(), &material.encryption_key(), plaintext)
}

/// Decrypt with the key and nonce split out of derived material.
pub fn open(material: &MessageKeyMaterial, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    decrypt(material.nonce_material(), &material.encryption_key(), ciphertext)
}

/// Derive material from `dh(scalar, point)` and seal `plaintext` with it.
pub fn seal_for_point(
    scalar: &PrivateScalar,
    point: &PublicPoint,
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let shared = dh(scalar, point)?;
    seal(&derive_message_key(&shared), plaintext)
}

/// Derive material from `dh(scalar, point)` and open `ciphertext` with it.
pub fn open_from_point(
    scalar: &PrivateScalar,
    point: &PublicPoint,
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let shared = dh(scalar, point)?;
    open(&derive_message_key(&shared), ciphertext)
}

/// A ciphertext prefixed by the public point needed to derive its key.
///
/// Wire format: `point (32 bytes) || ciphertext (plaintext + 16-byte tag)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EphemeralEnvelope {
    /// Throw-away public point the recipient multiplies with
    pub point: PublicPoint,
    /// AEAD ciphertext including tag
    pub ciphertext: Vec<u8>,
}

impl EphemeralEnvelope {
    /// Serialize as `point || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(POINT_SIZE + self.ciphertext.len());
        bytes.extend_from_slice(self.point.as_bytes());
        bytes.extend_from_slice(&self.ciphertext);
        bytes
    }

    /// Split a serialized envelope.
    ///
    /// # Errors
    ///
    /// - `InvalidLength`: fewer than 32 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < POINT_SIZE {
            return Err(CryptoError::InvalidLength { expected: POINT_SIZE, actual: bytes.len() });
        }

        let (point, ciphertext) = bytes.split_at(POINT_SIZE);
        Ok(Self { point: PublicPoint::from_slice(point)?, ciphertext: ciphertext.to_vec() })
    }
}

/// Seal `plaintext` to `recipient` with a throw-away scalar.
///
/// `ephemeral` MUST be fresh CSPRNG output and must not be reused. The
/// recipient learns nothing about the sender; in exchange, compromising the
/// throw-away scalar after use reveals nothing about other messages.
pub fn seal_ephemeral(
    ephemeral: &PrivateScalar,
    recipient: &PublicPoint,
    plaintext: &[u8],
) -> Result<EphemeralEnvelope, CryptoError> {
    let ciphertext = seal_for_point(ephemeral, recipient, plaintext)?;
    Ok(EphemeralEnvelope { point: ephemeral.public_point(), ciphertext })
}

/// Open an envelope produced by [`seal_ephemeral`] with the recipient's
/// long-term scalar.
pub fn open_ephemeral(
    recipient: &PrivateScalar,
    envelope: &EphemeralEnvelope,
) -> Result<Vec<u8>, CryptoError> {
    open_from_point(recipient, &envelope.point, &envelope.ciphertext)
}

/// Take the first 24 bytes of nonce material.
fn build_nonce(nonce_material: &[u8]) -> Result<[u8; NONCE_SIZE], CryptoError> {
    if nonce_material.len() < NONCE_SIZE {
        return Err(CryptoError::InvalidLength {
            expected: NONCE_SIZE,
            actual: nonce_material.len(),
        });
    }

    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&nonce_material[..NONCE_SIZE]);
    Ok(nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::{Keypair, SharedSecret};

    fn test_material(fill: u8) -> MessageKeyMaterial {
        derive_message_key(&SharedSecret::from_slice(&[fill; 32]).unwrap())
    }

    fn keypair(fill: u8) -> Keypair {
        Keypair::from_scalar(PrivateScalar::from_bytes([fill; 32]))
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let material = test_material(1);
        let plaintext = b"Hello, World!";

        let ciphertext = seal(&material, plaintext).unwrap();
        let decrypted = open(&material, &ciphertext).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn encrypt_decrypt_empty_message() {
        let material = test_material(2);

        let ciphertext = seal(&material, b"").unwrap();
        assert_eq!(ciphertext.len(), TAG_SIZE);

        assert_eq!(open(&material, &ciphertext).unwrap(), b"");
    }

    #[test]
    fn encrypt_decrypt_large_message() {
        let material = test_material(3);
        let plaintext = vec![0x42u8; 64 * 1024]; // 64KB

        let ciphertext = seal(&material, &plaintext).unwrap();
        assert_eq!(open(&material, &ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn ciphertext_is_plaintext_plus_tag() {
        let material = test_material(4);
        let plaintext = b"test message";

        let ciphertext = seal(&material, plaintext).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + TAG_SIZE);
    }

    #[test]
    fn same_material_reuses_nonce() {
        // Deterministic nonce: identical inputs give identical ciphertexts.
        let material = test_material(5);

        let first = seal(&material, b"same").unwrap();
        let second = seal(&material, b"same").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let ciphertext = seal(&test_material(6), b"secret message").unwrap();

        let result = open(&test_material(7), &ciphertext);
        assert_eq!(result, Err(CryptoError::AuthenticationFailed));
    }

    #[test]
    fn tampered_ciphertext_fails_decryption() {
        let material = test_material(8);
        let mut ciphertext = seal(&material, b"original message").unwrap();

        ciphertext[0] ^= 0xFF;

        assert_eq!(open(&material, &ciphertext), Err(CryptoError::AuthenticationFailed));
    }

    #[test]
    fn truncated_ciphertext_fails_decryption() {
        let material = test_material(9);
        let ciphertext = seal(&material, b"original message").unwrap();

        let result = open(&material, &ciphertext[..ciphertext.len() - 1]);
        assert_eq!(result, Err(CryptoError::AuthenticationFailed));

        assert_eq!(open(&material, &[]), Err(CryptoError::AuthenticationFailed));
    }

    #[test]
    fn short_nonce_material_is_rejected() {
        let key = [0u8; ENCRYPTION_KEY_SIZE];

        let result = encrypt(&[0u8; 23], &key, b"x");
        assert_eq!(result, Err(CryptoError::InvalidLength { expected: NONCE_SIZE, actual: 23 }));

        let result = decrypt(&[0u8; 10], &key, b"x");
        assert_eq!(result, Err(CryptoError::InvalidLength { expected: NONCE_SIZE, actual: 10 }));
    }

    #[test]
    fn nonce_uses_first_24_bytes_of_material() {
        let key = [7u8; ENCRYPTION_KEY_SIZE];
        let mut long = [0xABu8; 32];
        long[30] = 0x00; // beyond the nonce, must not matter

        let from_long = encrypt(&long, &key, b"payload").unwrap();
        let from_exact = encrypt(&[0xABu8; NONCE_SIZE], &key, b"payload").unwrap();

        assert_eq!(from_long, from_exact);
    }

    #[test]
    fn ephemeral_roundtrip() {
        let recipient = keypair(10);
        let ephemeral = PrivateScalar::from_bytes([11; 32]);

        let envelope = seal_ephemeral(&ephemeral, recipient.public(), b"for your eyes").unwrap();
        assert_eq!(envelope.point, ephemeral.public_point());

        let plaintext = open_ephemeral(recipient.scalar(), &envelope).unwrap();
        assert_eq!(plaintext, b"for your eyes");
    }

    #[test]
    fn ephemeral_wrong_recipient_fails() {
        let recipient = keypair(12);
        let eavesdropper = keypair(13);

        let envelope =
            seal_ephemeral(&PrivateScalar::from_bytes([14; 32]), recipient.public(), b"hi")
                .unwrap();

        let result = open_ephemeral(eavesdropper.scalar(), &envelope);
        assert_eq!(result, Err(CryptoError::AuthenticationFailed));
    }

    #[test]
    fn ephemeral_scalars_unlink_messages() {
        let recipient = keypair(15);

        let first =
            seal_ephemeral(&PrivateScalar::from_bytes([16; 32]), recipient.public(), b"same")
                .unwrap();
        let second =
            seal_ephemeral(&PrivateScalar::from_bytes([17; 32]), recipient.public(), b"same")
                .unwrap();

        assert_ne!(first.point, second.point);
        assert_ne!(first.ciphertext, second.ciphertext);
    }

    #[test]
    fn envelope_bytes_layout() {
        let recipient = keypair(18);
        let envelope =
            seal_ephemeral(&PrivateScalar::from_bytes([19; 32]), recipient.public(), b"abc")
                .unwrap();

        let bytes = envelope.to_bytes();
        assert_eq!(&bytes[..POINT_SIZE], envelope.point.as_bytes());
        assert_eq!(&bytes[POINT_SIZE..], envelope.ciphertext.as_slice());
        assert_eq!(EphemeralEnvelope::from_bytes(&bytes).unwrap(), envelope);
        assert_eq!(envelope.ciphertext.len(), 3 + TAG_SIZE);
    }

    #[test]
    fn short_envelope_is_rejected() {
        let result = EphemeralEnvelope::from_bytes(&[1u8; 31]);
        assert_eq!(result, Err(CryptoError::InvalidLength { expected: POINT_SIZE, actual: 31 }));
    }

    #[test]
    fn envelope_with_low_order_point_is_rejected() {
        let recipient = keypair(20);
        let envelope = EphemeralEnvelope { point: PublicPoint::from_bytes([0; 32]), ciphertext: vec![0; 20] };

        let result = open_ephemeral(recipient.scalar(), &envelope);
        assert!(matches!(result, Err(CryptoError::InvalidPoint { .. })));
    }
}
