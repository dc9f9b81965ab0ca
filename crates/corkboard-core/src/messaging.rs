//! Pairwise and group message encryption.
//!
//! Every operation names the identity it acts as. Ciphertexts are raw bytes;
//! ephemeral variants return `point || ciphertext` so the recipient can
//! replay the key derivation.
//!
//! # Security
//!
//! The static variants derive the same key and nonce for every message
//! between the same pair (or within the same group). Two messages sealed
//! this way share a nonce, which leaks the XOR of their plaintexts to anyone
//! holding both ciphertexts. Prefer the ephemeral variants for more than one
//! message.

use corkboard_crypto::{
    EphemeralEnvelope, MessageKeyMaterial, SharedSecret, derive_message_key, dh, open,
    open_ephemeral, open_from_point, seal, seal_ephemeral, seal_for_point,
};
use tracing::{debug, info};

use crate::{Directory, Environment, Error, Identity, KeyStore, Node};

impl<E, K, D> Node<E, K, D>
where
    E: Environment,
    K: KeyStore,
    D: Directory,
{
    /// Generate a keypair for `name`, store it locally and publish the public
    /// point under `name`.
    ///
    /// Running this again for an existing name replaces the identity; secrets
    /// derived from the old key stop working.
    pub fn publish_identity(&self, name: &str) -> Result<Identity, Error> {
        let identity = Identity::generate(name, &self.env);

        self.keystore.persist(name, identity.scalar())?;
        self.keystore.persist_public(name, identity.public())?;
        self.publish_point(name, identity.public())?;

        info!(name, public = ?identity.public(), "published identity");
        Ok(identity)
    }

    /// Load `name`'s stored identity.
    pub fn identity(&self, name: &str) -> Result<Identity, Error> {
        Ok(Identity::from_scalar(name, self.private_scalar(name)?))
    }

    /// Compute the shared secret between `name` and `peer`, persisting it
    /// locally.
    pub fn pairwise_secret(&self, name: &str, peer: &str) -> Result<SharedSecret, Error> {
        let secret = self.dh_with_entry(name, peer)?;
        self.keystore.persist_shared_secret(name, peer, &secret)?;

        debug!(name, peer, "computed pairwise secret");
        Ok(secret)
    }

    /// Encrypt `plaintext` from `name` to `peer` under their static shared
    /// secret.
    pub fn encrypt_for_peer(
        &self,
        name: &str,
        peer: &str,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let material = self.pairwise_material(name, peer)?;
        Ok(seal(&material, plaintext)?)
    }

    /// Decrypt a ciphertext produced by [`Node::encrypt_for_peer`].
    ///
    /// # Errors
    ///
    /// - `AuthenticationFailed`: tampered ciphertext, or not from `peer`
    pub fn decrypt_from_peer(
        &self,
        name: &str,
        peer: &str,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let material = self.pairwise_material(name, peer)?;
        Ok(open(&material, ciphertext)?)
    }

    /// Encrypt to `peer` under a throw-away key.
    ///
    /// Needs no local identity. Returns `point || ciphertext`.
    pub fn ephemeral_encrypt_for_peer(
        &self,
        peer: &str,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let recipient = self.load_point(peer)?;
        let ephemeral = self.env.random_scalar();

        let envelope = seal_ephemeral(&ephemeral, &recipient, plaintext)?;
        Ok(envelope.to_bytes())
    }

    /// Decrypt an envelope produced by [`Node::ephemeral_encrypt_for_peer`].
    ///
    /// # Errors
    ///
    /// - `Decode`: envelope shorter than a point
    /// - `AuthenticationFailed`: tampered or addressed to someone else
    pub fn ephemeral_decrypt(&self, name: &str, envelope: &[u8]) -> Result<Vec<u8>, Error> {
        let envelope = EphemeralEnvelope::from_bytes(envelope)?;
        let scalar = self.private_scalar(name)?;
        Ok(open_ephemeral(&scalar, &envelope)?)
    }

    /// Encrypt to `group` under `name`'s resolved group secret and the
    /// group's base point.
    pub fn encrypt_for_group(
        &self,
        name: &str,
        group: &str,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let material = self.group_material(name, group)?;
        Ok(seal(&material, plaintext)?)
    }

    /// Decrypt a ciphertext produced by [`Node::encrypt_for_group`].
    pub fn decrypt_for_group(
        &self,
        name: &str,
        group: &str,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let material = self.group_material(name, group)?;
        Ok(open(&material, ciphertext)?)
    }

    /// Encrypt to `group` under a fresh random point.
    ///
    /// The key comes from applying the group secret to the fresh point, so
    /// any member can open it. Returns `point || ciphertext`.
    pub fn ephemeral_encrypt_for_group(
        &self,
        name: &str,
        group: &str,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let secret = self.keystore.load_group_secret(name, group)?;
        let point = self.env.random_scalar().public_point();

        let ciphertext = seal_for_point(&secret.to_scalar(), &point, plaintext)?;
        Ok(EphemeralEnvelope { point, ciphertext }.to_bytes())
    }

    /// Decrypt an envelope produced by [`Node::ephemeral_encrypt_for_group`].
    pub fn ephemeral_decrypt_for_group(
        &self,
        name: &str,
        group: &str,
        envelope: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let envelope = EphemeralEnvelope::from_bytes(envelope)?;
        let secret = self.keystore.load_group_secret(name, group)?;
        Ok(open_from_point(&secret.to_scalar(), &envelope.point, &envelope.ciphertext)?)
    }

    fn pairwise_material(&self, name: &str, peer: &str) -> Result<MessageKeyMaterial, Error> {
        let secret = self.dh_with_entry(name, peer)?;
        Ok(derive_message_key(&secret))
    }

    fn group_material(&self, name: &str, group: &str) -> Result<MessageKeyMaterial, Error> {
        let secret = self.keystore.load_group_secret(name, group)?;
        let base = self.load_point(group)?;
        let shared = dh(&secret.to_scalar(), &base)?;
        Ok(derive_message_key(&shared))
    }
}
