//! Group key agreement over the board.
//!
//! Every member applies its private scalar to a shared base point, and to
//! every composite published by the other members. Because scalar
//! application commutes, once each member has a composite covering all the
//! *other* members, applying its own scalar lands everyone on the same point.
//!
//! # Board Layout
//!
//! ```text
//! G1                base point for group G1
//! aliceG1           alice · base
//! bobaliceG1        bob · alice · base
//! carolbobaliceG1   carol · bob · alice · base
//! ```
//!
//! Composite names are the member names concatenated in the order given,
//! with no separator, followed by the group name. The order is part of the
//! key: `alicebobG1` and `bobaliceG1` name the same point but are distinct
//! entries.
//!
//! # Rounds
//!
//! A round by `self` with peer list `P`:
//!
//! 1. publish `self‖G` from the base
//! 2. for each peer `p` in `P`, extend the composite of `P` without `p`
//! 3. [`Round::Start`] only, with `P` non-empty: extend the composite of all
//!    of `P`
//!
//! A round aborts at the first composite that is not on the board yet.
//! Entries published before the abort stay published.
//!
//! # Security
//!
//! Step 3 publishes `self · concat(P)`, which IS the group secret every member
//! resolves to. Anyone reading the board learns it. The step is kept for
//! compatibility with boards built by existing deployments; callers that need
//! confidentiality against board readers must finish every member with
//! [`Round::Finish`] and build the remaining composites with
//! [`Node::extend_composite`].

use std::fmt;

use corkboard_crypto::{SharedSecret, dh};
use tracing::{debug, info};

use crate::{Directory, Environment, Error, KeyStore, Node};

/// Board key for the composite built from `members` within `group`.
///
/// Concatenates the member names in the order given, then the group name.
/// An empty member list names the group base point itself.
pub fn composite_name<S: AsRef<str>>(members: &[S], group: &str) -> String {
    let mut name = String::new();
    for member in members {
        name.push_str(member.as_ref());
    }
    name.push_str(group);
    name
}

/// Which contribution round to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    /// Contribute and also publish the full composite of all peers.
    Start,
    /// Contribute without the full composite.
    Finish,
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Finish => f.write_str("finish"),
        }
    }
}

/// Outcome of a completed contribution round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// Group the round ran in
    pub group: String,
    /// Round kind
    pub round: Round,
    /// Board keys written, in publication order
    pub published: Vec<String>,
}

impl<E, K, D> Node<E, K, D>
where
    E: Environment,
    K: KeyStore,
    D: Directory,
{
    /// Create the base point for `group` and publish it under the group name.
    ///
    /// The base is `e · (e · 9)` for a fresh throw-away scalar `e`, which is
    /// discarded afterwards. Republishing replaces the base and invalidates
    /// every composite built on the previous one.
    ///
    /// # Errors
    ///
    /// - `Io`: board write failed
    pub fn create_base(&self, group: &str) -> Result<SharedSecret, Error> {
        let ephemeral = self.env.random_scalar();
        let base = dh(&ephemeral, &ephemeral.public_point())?;

        self.publish_point(group, &base.to_point())?;

        info!(group, "published group base point");
        Ok(base)
    }

    /// Apply `name`'s scalar to the composite of `members` and publish the
    /// result under `name‖composite`.
    ///
    /// Returns the board key written.
    ///
    /// # Errors
    ///
    /// - `DirectoryNotFound`: the source composite is not on the board yet
    /// - `IdentityNotFound`: no local key for `name`
    /// - `InvalidPoint`: the source entry is malformed or low-order
    pub fn extend_composite<S: AsRef<str>>(
        &self,
        name: &str,
        members: &[S],
        group: &str,
    ) -> Result<String, Error> {
        let source = composite_name(members, group);
        let extended = self.dh_with_entry(name, &source)?;

        let target = format!("{name}{source}");
        self.publish_point(&target, &extended.to_point())?;

        debug!(group, source = %source, target = %target, "extended composite");
        Ok(target)
    }

    /// Run one contribution round as `name` with the given peers.
    ///
    /// # Errors
    ///
    /// Aborts at the first failing step, see [`Node::extend_composite`].
    /// [`Error::is_missing_round`] tells a missing composite apart from
    /// other failures.
    pub fn contribute<S: AsRef<str>>(
        &self,
        name: &str,
        group: &str,
        peers: &[S],
        round: Round,
    ) -> Result<RoundReport, Error> {
        let no_members: &[&str] = &[];
        let mut published = vec![self.extend_composite(name, no_members, group)?];

        for skip in 0..peers.len() {
            let others: Vec<&str> = peers
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, peer)| peer.as_ref())
                .collect();
            published.push(self.extend_composite(name, others.as_slice(), group)?);
        }

        if round == Round::Start && !peers.is_empty() {
            published.push(self.extend_composite(name, peers, group)?);
        }

        info!(name, group, %round, entries = published.len(), "contribution round complete");
        Ok(RoundReport { group: group.to_string(), round, published })
    }

    /// [`Node::contribute`] with [`Round::Start`].
    pub fn start_group<S: AsRef<str>>(
        &self,
        name: &str,
        group: &str,
        peers: &[S],
    ) -> Result<RoundReport, Error> {
        self.contribute(name, group, peers, Round::Start)
    }

    /// [`Node::contribute`] with [`Round::Finish`].
    pub fn finish_group<S: AsRef<str>>(
        &self,
        name: &str,
        group: &str,
        peers: &[S],
    ) -> Result<RoundReport, Error> {
        self.contribute(name, group, peers, Round::Finish)
    }

    /// Resolve the group secret for `name` from the composite of all peers,
    /// and persist it locally.
    ///
    /// Members that pass their own peer lists converge on the same secret
    /// once every needed composite is on the board.
    ///
    /// # Errors
    ///
    /// - `DirectoryNotFound`: the composite of `peers` is not on the board
    /// - `IdentityNotFound`: no local key for `name`
    pub fn resolve<S: AsRef<str>>(
        &self,
        name: &str,
        group: &str,
        peers: &[S],
    ) -> Result<SharedSecret, Error> {
        let source = composite_name(peers, group);
        let secret = self.dh_with_entry(name, &source)?;

        self.keystore.persist_group_secret(name, group, &secret)?;

        info!(name, group, source = %source, "resolved group secret");
        Ok(secret)
    }
}
