//! Named keypairs.

use std::fmt;

use corkboard_crypto::{Keypair, PrivateScalar, PublicPoint};

use crate::env::Environment;

/// A named X25519 keypair.
///
/// The private scalar is zeroized when the identity is dropped and never
/// appears in `Debug` output.
#[derive(Clone)]
pub struct Identity {
    name: String,
    keypair: Keypair,
}

impl Identity {
    /// Generate a fresh identity from the environment's CSPRNG.
    ///
    /// # Panics
    ///
    /// Panics if the environment cannot produce entropy (see
    /// [`crate::SystemEnv`]).
    pub fn generate<E: Environment>(name: impl Into<String>, env: &E) -> Self {
        Self::from_scalar(name, env.random_scalar())
    }

    /// Rebuild an identity from a stored scalar.
    pub fn from_scalar(name: impl Into<String>, scalar: PrivateScalar) -> Self {
        Self { name: name.into(), keypair: Keypair::from_scalar(scalar) }
    }

    /// Identity name, also its key on the board.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Private scalar.
    pub fn scalar(&self) -> &PrivateScalar {
        self.keypair.scalar()
    }

    /// Public point.
    pub fn public(&self) -> &PublicPoint {
        self.keypair.public()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity").field("name", &self.name).field("public", self.public()).finish()
    }
}
