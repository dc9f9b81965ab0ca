//! Environment abstraction for deterministic testing.
//!
//! Decouples protocol logic from the entropy source. Production code uses
//! [`SystemEnv`] (OS CSPRNG); tests use a seeded generator so that keypairs,
//! base points and ephemeral envelopes are reproducible.

use corkboard_crypto::{PrivateScalar, SCALAR_SIZE};
use zeroize::Zeroize;

/// Abstract environment providing randomness.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `random_bytes()` uses cryptographically secure entropy in production
/// - Methods are infallible except in exceptional circumstances (e.g., OS
///   entropy exhaustion)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    /// - Uses cryptographically secure RNG
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Draws a fresh private scalar.
    ///
    /// Used for identity keys, group base points and throw-away keys.
    fn random_scalar(&self) -> PrivateScalar {
        let mut bytes = [0u8; SCALAR_SIZE];
        self.random_bytes(&mut bytes);
        let scalar = PrivateScalar::from_bytes(bytes);
        bytes.zeroize();
        scalar
    }
}

/// Production environment using the OS cryptographic RNG.
///
/// # Panics
///
/// Panics if the OS RNG fails. A key agreement tool without functioning
/// randomness cannot produce secure keys, and continuing would hand out
/// predictable scalars.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer)
            .expect("invariant: OS RNG failure is unrecoverable - cannot generate keys securely");
    }
}

/// Seeded environment shared by unit and integration tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils {
    #![allow(clippy::disallowed_types, reason = "test-only synchronous RNG sharing")]

    use std::sync::{Arc, Mutex};

    use rand::RngCore;
    use rand_chacha::{ChaCha20Rng, rand_core::SeedableRng};

    use super::Environment;

    /// Seeded environment: same seed, same keys.
    ///
    /// Clones share one RNG stream.
    #[derive(Clone)]
    pub struct MockEnv {
        rng: Arc<Mutex<ChaCha20Rng>>,
    }

    impl MockEnv {
        /// Create an environment whose RNG starts from `seed`.
        pub fn seeded(seed: u64) -> Self {
            Self { rng: Arc::new(Mutex::new(ChaCha20Rng::seed_from_u64(seed))) }
        }
    }

    impl Environment for MockEnv {
        #[allow(clippy::expect_used)]
        fn random_bytes(&self, buffer: &mut [u8]) {
            self.rng.lock().expect("Mutex poisoned").fill_bytes(buffer);
        }
    }
}
