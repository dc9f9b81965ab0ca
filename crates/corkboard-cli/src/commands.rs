//! Command dispatch.
//!
//! Results go to the supplied writer, one line per value. Logs go through
//! `tracing`, never to the writer.

use std::{fs, io::Write, path::PathBuf};

use corkboard_core::{
    Directory, Environment, FsKeyStore, KeyStore, Node, RedbDirectory, SystemEnv, armor,
};
use tracing::info;

use crate::{
    CliError,
    cli::{Cli, Command},
    config::{self, BOARD_FILE_NAME, CONFIG_FILE_NAME, Config, KEYS_DIR_NAME},
};

/// Per-invocation settings resolved from flags and the config file.
#[derive(Debug, Clone)]
pub struct Context {
    /// `--name`, if given
    pub name: Option<String>,
    /// Loaded config
    pub config: Config,
    /// Where the config is saved
    pub config_path: PathBuf,
}

impl Context {
    /// Identity to act as: `--name`, else the configured current name.
    pub fn active_name(&self) -> Result<&str, CliError> {
        self.name.as_deref().or(self.config.current_name.as_deref()).ok_or(CliError::ConfigMissing)
    }

    fn explicit_name(&self, command: &'static str) -> Result<&str, CliError> {
        self.name.as_deref().ok_or(CliError::NameRequired { command })
    }
}

/// Run a parsed command against the on-disk data directory and board.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<(), CliError> {
    let data_dir = config::data_dir(cli.data_dir)?;
    let config_path = data_dir.join(CONFIG_FILE_NAME);
    let config = Config::load(&config_path)?;

    let board_path = cli
        .board
        .or_else(|| config.board.clone())
        .unwrap_or_else(|| data_dir.join(BOARD_FILE_NAME));
    if let Some(parent) = board_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let board = RedbDirectory::open(&board_path)?;
    let keys = FsKeyStore::new(data_dir.join(KEYS_DIR_NAME));
    let node = Node::new(SystemEnv::new(), keys, board);
    let mut ctx = Context { name: cli.name, config, config_path };

    execute(&node, &mut ctx, cli.command, out)
}

/// Execute one command on an already-assembled node.
pub fn execute<E, K, D, W>(
    node: &Node<E, K, D>,
    ctx: &mut Context,
    command: Command,
    out: &mut W,
) -> Result<(), CliError>
where
    E: Environment,
    K: KeyStore,
    D: Directory,
    W: Write,
{
    match command {
        Command::Publish => {
            let name = ctx.active_name()?;
            let identity = node.publish_identity(name)?;
            writeln!(out, "generated x25519 keypair for {}", identity.name())?;
        },
        Command::Secret { peer } => {
            let secret = node.pairwise_secret(ctx.active_name()?, &peer)?;
            writeln!(out, "{}", armor::encode(secret.as_bytes()))?;
        },
        Command::Encrypt { peer, message } => {
            let ciphertext =
                node.encrypt_for_peer(ctx.active_name()?, &peer, message.join(" ").as_bytes())?;
            writeln!(out, "{}", armor::encode(&ciphertext))?;
        },
        Command::EphemeralEncrypt { peer, message } => {
            let envelope = node.ephemeral_encrypt_for_peer(&peer, message.join(" ").as_bytes())?;
            writeln!(out, "{}", armor::encode(&envelope))?;
        },
        Command::Decrypt { peer, ciphertext } => {
            let ciphertext = armor::decode(&ciphertext)?;
            let plaintext = node.decrypt_from_peer(ctx.active_name()?, &peer, &ciphertext)?;
            writeln!(out, "{}", String::from_utf8_lossy(&plaintext))?;
        },
        Command::EphemeralDecrypt { ciphertext } => {
            let envelope = armor::decode(&ciphertext)?;
            let plaintext = node.ephemeral_decrypt(ctx.active_name()?, &envelope)?;
            writeln!(out, "{}", String::from_utf8_lossy(&plaintext))?;
        },
        Command::UseCurrent => {
            let name = ctx.explicit_name("use-current")?.to_string();
            ctx.config.current_name = Some(name.clone());
            ctx.config.save(&ctx.config_path)?;
            info!(name, "saved current name");
        },
        Command::Group => {
            node.create_base(ctx.explicit_name("group")?)?;
        },
        Command::StartGroup { group, peers } => {
            node.start_group(ctx.active_name()?, &group, peers.as_slice())?;
        },
        Command::FinishGroup { group, peers } => {
            node.finish_group(ctx.active_name()?, &group, peers.as_slice())?;
        },
        Command::SecretGroup { group, peers } => {
            node.resolve(ctx.active_name()?, &group, peers.as_slice())?;
        },
        Command::EncryptGroup { group, message } => {
            let ciphertext =
                node.encrypt_for_group(ctx.active_name()?, &group, message.join(" ").as_bytes())?;
            writeln!(out, "{}", armor::encode(&ciphertext))?;
        },
        Command::EphemeralEncryptGroup { group, message } => {
            let envelope = node.ephemeral_encrypt_for_group(
                ctx.active_name()?,
                &group,
                message.join(" ").as_bytes(),
            )?;
            writeln!(out, "{}", armor::encode(&envelope))?;
        },
        Command::DecryptGroup { group, ciphertext } => {
            let ciphertext = armor::decode(&ciphertext)?;
            let plaintext = node.decrypt_for_group(ctx.active_name()?, &group, &ciphertext)?;
            writeln!(out, "{}", String::from_utf8_lossy(&plaintext))?;
        },
        Command::EphemeralDecryptGroup { group, ciphertext } => {
            let envelope = armor::decode(&ciphertext)?;
            let plaintext =
                node.ephemeral_decrypt_for_group(ctx.active_name()?, &group, &envelope)?;
            writeln!(out, "{}", String::from_utf8_lossy(&plaintext))?;
        },
    }

    Ok(())
}
