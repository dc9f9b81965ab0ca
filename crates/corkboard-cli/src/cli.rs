//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Key agreement and encryption over a shared board
#[derive(Parser, Debug)]
#[command(name = "corkboard")]
#[command(about = "Pairwise and group key agreement over an untrusted bulletin board")]
#[command(version)]
pub struct Cli {
    /// Identity to act as (defaults to the configured current name)
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Data directory holding keys, config and the default board
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Board file to publish to and load from
    #[arg(long, global = true)]
    pub board: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate an x25519 keypair and publish the public key
    #[command(alias = "p")]
    Publish,

    /// Print the shared secret with a peer
    #[command(alias = "s")]
    Secret {
        /// Peer name on the board
        peer: String,
    },

    /// Encrypt a message for a peer
    #[command(alias = "e")]
    Encrypt {
        /// Peer name on the board
        peer: String,
        /// Message words, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Encrypt a message for a peer under a throw-away key
    #[command(alias = "ee")]
    EphemeralEncrypt {
        /// Peer name on the board
        peer: String,
        /// Message words, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Decrypt a message from a peer
    #[command(alias = "d")]
    Decrypt {
        /// Sender name on the board
        peer: String,
        /// Base64 ciphertext
        ciphertext: String,
    },

    /// Decrypt a message sealed under a throw-away key
    #[command(alias = "ed")]
    EphemeralDecrypt {
        /// Base64 envelope
        ciphertext: String,
    },

    /// Save --name as the default identity
    UseCurrent,

    /// Create and publish the base point for the group named by --name
    Group,

    /// Run a starting contribution round
    StartGroup {
        /// Group name
        group: String,
        /// Other members, in order
        peers: Vec<String>,
    },

    /// Run a finishing contribution round
    FinishGroup {
        /// Group name
        group: String,
        /// Other members, in order
        #[arg(required = true)]
        peers: Vec<String>,
    },

    /// Resolve and store the group secret
    SecretGroup {
        /// Group name
        group: String,
        /// Other members, in the order their composite was built
        #[arg(required = true)]
        peers: Vec<String>,
    },

    /// Encrypt a message for a group
    #[command(alias = "eg")]
    EncryptGroup {
        /// Group name
        group: String,
        /// Message words, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Encrypt a message for a group under a fresh point
    #[command(alias = "eeg")]
    EphemeralEncryptGroup {
        /// Group name
        group: String,
        /// Message words, joined with spaces
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Decrypt a group message
    #[command(alias = "dg")]
    DecryptGroup {
        /// Group name
        group: String,
        /// Base64 ciphertext
        ciphertext: String,
    },

    /// Decrypt a group message sealed under a fresh point
    #[command(alias = "edg")]
    EphemeralDecryptGroup {
        /// Group name
        group: String,
        /// Base64 envelope
        ciphertext: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("corkboard").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn message_words_are_collected() {
        let cli = parse(&["--name", "alice", "e", "bob", "hello", "there"]);

        assert_eq!(cli.name.as_deref(), Some("alice"));
        assert_eq!(
            cli.command,
            Command::Encrypt {
                peer: "bob".to_string(),
                message: vec!["hello".to_string(), "there".to_string()],
            }
        );
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(parse(&["p"]).command, Command::Publish);
        assert!(matches!(parse(&["ee", "bob", "x"]).command, Command::EphemeralEncrypt { .. }));
        assert!(matches!(parse(&["ed", "AAAA"]).command, Command::EphemeralDecrypt { .. }));
        assert!(matches!(parse(&["eg", "G1", "x"]).command, Command::EncryptGroup { .. }));
        assert!(matches!(parse(&["dg", "G1", "AAAA"]).command, Command::DecryptGroup { .. }));

        let eeg = parse(&["eeg", "G1", "x"]).command;
        assert!(matches!(eeg, Command::EphemeralEncryptGroup { .. }));
        let edg = parse(&["edg", "G1", "AAAA"]).command;
        assert!(matches!(edg, Command::EphemeralDecryptGroup { .. }));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["publish", "--name", "carol", "--log-level", "debug"]);
        assert_eq!(cli.name.as_deref(), Some("carol"));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn start_group_peers_optional() {
        let cli = parse(&["start-group", "G1"]);
        assert_eq!(cli.command, Command::StartGroup { group: "G1".to_string(), peers: vec![] });
    }

    #[test]
    fn finish_group_requires_peers() {
        let result = Cli::try_parse_from(["corkboard", "finish-group", "G1"]);
        assert!(result.is_err());
    }

    #[test]
    fn encrypt_requires_message() {
        let result = Cli::try_parse_from(["corkboard", "encrypt", "bob"]);
        assert!(result.is_err());
    }
}
