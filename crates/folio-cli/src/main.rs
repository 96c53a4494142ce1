mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "folio content API")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP API server.
    Serve {
        /// Path to folio.yaml
        #[arg(long, short, env = "FOLIO_CONFIG")]
        config: Option<PathBuf>,

        /// Override server.host
        #[arg(long)]
        host: Option<String>,

        /// Override server.port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Token signing key management
    Keys {
        #[command(subcommand)]
        cmd: KeysCommand,
    },

    /// Password utilities
    Password {
        #[command(subcommand)]
        cmd: PasswordCommand,
    },

    /// Issue and verify bearer tokens offline
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },
}

#[derive(Subcommand, Debug)]
enum KeysCommand {
    /// Generate a new Ed25519 signing keypair
    Generate {
        /// Directory to write private.key and public.key into; prints to stdout if omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum PasswordCommand {
    /// Print the Argon2 digest of a password
    Hash { password: String },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Issue a token for a subject
    Issue {
        /// Private key: path to a key file or hex string
        #[arg(long, env = "FOLIO_TOKEN_PRIVATE_KEY", hide_env_values = true)]
        key: Option<String>,

        /// Principal the token is issued to
        #[arg(long)]
        subject: String,

        #[arg(long, default_value_t = 30)]
        lifetime_minutes: u64,
    },

    /// Verify a token (or a file containing one)
    Verify {
        /// Private key: path to a key file or hex string
        #[arg(long, env = "FOLIO_TOKEN_PRIVATE_KEY", hide_env_values = true)]
        key: Option<String>,

        token: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Serve { config, host, port } => commands::serve::run(config, host, port).await?,

        Command::Keys { cmd } => match cmd {
            KeysCommand::Generate { output } => commands::keys::generate(output)?,
        },

        Command::Password { cmd } => match cmd {
            PasswordCommand::Hash { password } => commands::password::hash(password)?,
        },

        Command::Token { cmd } => match cmd {
            TokenCommand::Issue {
                key,
                subject,
                lifetime_minutes,
            } => commands::token::issue(key, subject, lifetime_minutes)?,
            TokenCommand::Verify { key, token } => commands::token::verify(key, token)?,
        },
    }

    Ok(())
}
