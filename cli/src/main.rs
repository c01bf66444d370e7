mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ks_crypto::keypair::SharedParams;
use ks_crypto::session::Session;

#[derive(Parser, Debug)]
#[command(
    name = "ks-cli",
    about = "Khan & Shah matrix cipher: 2x2 blocks over Z_m"
)]
struct Cli {
    /// JSON parameter set (modulus, matrix_A, matrix_B, matrix_N). Defaults to the m = 95 reference set.
    #[arg(long, value_name = "FILE", global = true)]
    params: Option<PathBuf>,

    /// Raise the log level (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the key pair and print it
    Keys {
        #[arg(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
    /// Encrypt text and print the framed ciphertext
    Encrypt {
        /// Text to encrypt; read from stdin when omitted
        text: Option<String>,
    },
    /// Decrypt a framed ciphertext and print the plaintext
    Decrypt {
        /// Framed ciphertext `<...>`; read from stdin when omitted
        ciphertext: Option<String>,
    },
    /// Walk through encode, encrypt, frame, parse, decrypt and decode
    Demo { text: String },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Log to stderr, `RUST_LOG` overrides the -v flags.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn load_params(path: Option<&PathBuf>) -> Result<SharedParams> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading parameters from {}", path.display()))?;
            SharedParams::from_json(&json)
                .with_context(|| format!("parsing parameters from {}", path.display()))
        }
        None => Ok(SharedParams::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let params = load_params(cli.params.as_ref())?;
    log::debug!("using parameters: {:?}", params);

    let session = Session::try_with(&params).context("generating keys")?;

    match cli.command {
        Command::Keys { json } => commands::keys::run(&session, json),
        Command::Encrypt { text } => commands::encrypt::run(&session, text),
        Command::Decrypt { ciphertext } => commands::decrypt::run(&session, ciphertext),
        Command::Demo { text } => commands::demo::run(&session, &text),
    }
}
