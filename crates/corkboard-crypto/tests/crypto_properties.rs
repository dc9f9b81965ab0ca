//! Property-based tests for the Corkboard primitives
//!
//! These tests verify the invariants the protocol layers depend on:
//!
//! 1. **Symmetry**: dh(a, B) == dh(b, A) for independent keypairs
//! 2. **Round-trip**: open(seal(m)) == m for all messages
//! 3. **Tamper detection**: any flipped bit fails authentication
//! 4. **Commutativity**: applying scalars to a base point in any order agrees
//! 5. **Determinism**: exchange and key derivation match fixed vectors

use corkboard_crypto::{
    CryptoError, Keypair, PrivateScalar, PublicPoint, derive_message_key, dh, open,
    open_ephemeral, seal, seal_ephemeral,
};
use proptest::prelude::*;

fn scalar_strategy() -> impl Strategy<Value = PrivateScalar> {
    any::<[u8; 32]>().prop_map(PrivateScalar::from_bytes)
}

// Randomized generator: e^2 * G, the same construction groups use.
fn base_point(seed: &PrivateScalar) -> PublicPoint {
    dh(seed, &seed.public_point()).unwrap().to_point()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_dh_symmetric(a in scalar_strategy(), b in scalar_strategy()) {
        let alice = Keypair::from_scalar(a);
        let bob = Keypair::from_scalar(b);

        let ab = dh(alice.scalar(), bob.public()).unwrap();
        let ba = dh(bob.scalar(), alice.public()).unwrap();

        prop_assert_eq!(ab.as_bytes(), ba.as_bytes());
    }

    #[test]
    fn prop_seal_open_roundtrip(
        secret in scalar_strategy(),
        peer in scalar_strategy(),
        plaintext in prop::collection::vec(any::<u8>(), 0..1000),
    ) {
        let shared = dh(&secret, &peer.public_point()).unwrap();
        let material = derive_message_key(&shared);

        let ciphertext = seal(&material, &plaintext).unwrap();
        let decrypted = open(&material, &ciphertext).unwrap();

        prop_assert_eq!(decrypted, plaintext);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_any_bit_flip_fails_authentication(
        secret in scalar_strategy(),
        plaintext in prop::collection::vec(any::<u8>(), 0..128),
        bit in any::<prop::sample::Index>(),
    ) {
        let shared = dh(&secret, &secret.public_point()).unwrap();
        let material = derive_message_key(&shared);
        let mut ciphertext = seal(&material, &plaintext).unwrap();

        let position = bit.index(ciphertext.len() * 8);
        ciphertext[position / 8] ^= 1 << (position % 8);

        prop_assert_eq!(open(&material, &ciphertext), Err(CryptoError::AuthenticationFailed));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_scalar_application_commutes(
        seed in scalar_strategy(),
        scalars in prop::collection::vec(scalar_strategy(), 2..=6),
        rotation in any::<prop::sample::Index>(),
    ) {
        let base = base_point(&seed);

        let apply = |order: &[PrivateScalar]| {
            order.iter().fold(base, |point, scalar| dh(scalar, &point).unwrap().to_point())
        };

        let forward = apply(&scalars);

        let mut reversed = scalars.clone();
        reversed.reverse();

        let mut rotated = scalars.clone();
        rotated.rotate_left(rotation.index(scalars.len()));

        prop_assert_eq!(forward, apply(&reversed));
        prop_assert_eq!(forward, apply(&rotated));
    }

    #[test]
    fn prop_derivation_deterministic(bytes in any::<[u8; 32]>()) {
        let scalar = PrivateScalar::from_bytes(bytes);
        let shared = dh(&scalar, &scalar.public_point()).unwrap();

        let first = derive_message_key(&shared);
        let second = derive_message_key(&shared.clone());

        prop_assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn prop_ephemeral_envelopes_unlinkable(
        recipient in scalar_strategy(),
        first in scalar_strategy(),
        second in scalar_strategy(),
        plaintext in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        prop_assume!(first.public_point() != second.public_point());
        let recipient = Keypair::from_scalar(recipient);

        let one = seal_ephemeral(&first, recipient.public(), &plaintext).unwrap();
        let two = seal_ephemeral(&second, recipient.public(), &plaintext).unwrap();

        prop_assert_ne!(one.point, two.point);
        prop_assert_ne!(&one.ciphertext, &two.ciphertext);

        prop_assert_eq!(open_ephemeral(recipient.scalar(), &one).unwrap(), plaintext.clone());
        prop_assert_eq!(open_ephemeral(recipient.scalar(), &two).unwrap(), plaintext);
    }
}

#[test]
fn exchange_and_derivation_match_known_answer() {
    let alice = PrivateScalar::from_bytes([0x11; 32]);
    let bob = PrivateScalar::from_bytes([0x22; 32]);

    let shared = dh(&alice, &bob.public_point()).unwrap();
    assert_eq!(
        hex::encode(shared.as_bytes()),
        "9e004098efc091d4ec2663b4e9f5cfd4d7064571690b4bea97ab146ab9f35056"
    );

    let material = derive_message_key(&shared);
    assert_eq!(
        hex::encode(material.encryption_key()),
        "b4c24c1f47604434f26ed718294692d4312bf0eb246c250f8f364a3912b40bd3"
    );
    assert_eq!(
        hex::encode(material.auth_material()),
        "35d57afb59cb7dd5c62fd77f144f541766babf7e0dca0f216edf19f2d639abac"
    );
    assert_eq!(
        hex::encode(material.nonce_material()),
        "e1cb7349a401971cd80afb20b145308a92f7cd6132cd46fff9d273c438fdfd1f"
    );
}
