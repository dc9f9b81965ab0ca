//! Operation context shared by the messaging and group operations.

use corkboard_crypto::{PrivateScalar, PublicPoint, SharedSecret, dh};
use tracing::debug;

use crate::{Directory, Environment, Error, KeyStore};

/// One machine's view of the board.
///
/// Bundles the randomness source, the local key store and the board. Holds
/// no identity of its own: every operation names the identity it acts as,
/// so one node can drive several local identities.
#[derive(Clone)]
pub struct Node<E, K, D>
where
    E: Environment,
    K: KeyStore,
    D: Directory,
{
    /// Environment (RNG)
    pub(crate) env: E,
    /// Local key material
    pub(crate) keystore: K,
    /// Public board
    pub(crate) directory: D,
}

impl<E, K, D> Node<E, K, D>
where
    E: Environment,
    K: KeyStore,
    D: Directory,
{
    /// Create a node over the given backends.
    pub fn new(env: E, keystore: K, directory: D) -> Self {
        Self { env, keystore, directory }
    }

    /// Local key store.
    pub fn keystore(&self) -> &K {
        &self.keystore
    }

    /// Public board.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Load `name`'s private scalar.
    pub(crate) fn private_scalar(&self, name: &str) -> Result<PrivateScalar, Error> {
        Ok(self.keystore.load_private(name)?)
    }

    /// Load and validate the point published under `key`.
    pub(crate) fn load_point(&self, key: &str) -> Result<PublicPoint, Error> {
        let bytes = self.directory.load(key)?;
        debug!(key, "loaded board entry");
        Ok(PublicPoint::from_slice(&bytes)?)
    }

    /// Publish a point under `key`.
    pub(crate) fn publish_point(&self, key: &str, point: &PublicPoint) -> Result<(), Error> {
        self.directory.publish(key, point.as_bytes())?;
        debug!(key, "published board entry");
        Ok(())
    }

    /// `dh(name's scalar, point under key)`.
    pub(crate) fn dh_with_entry(&self, name: &str, key: &str) -> Result<SharedSecret, Error> {
        let scalar = self.private_scalar(name)?;
        let point = self.load_point(key)?;
        Ok(dh(&scalar, &point)?)
    }
}
