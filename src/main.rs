//! credvault - encrypted multi-profile credential vault.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use credvault::cli::output;
use credvault::cli::{execute, Cli};
use credvault::core::constants::LOG_ENV;
use credvault::core::status::Status;
use credvault::error::{Error, RegistryError};

fn main() {
    let cli = Cli::parse();
    output::init();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("credvault=debug")
        } else {
            EnvFilter::new("credvault=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.target) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::Registry(RegistryError::NotFound(_)) => Some("run: credvault profile list"),
        Error::Registry(RegistryError::AlreadyExists(_)) => {
            Some("pick another name or run: credvault profile rm NAME")
        }
        _ => match e.status() {
            Status::MissingKeyFile | Status::MissingCredentialsFile => {
                Some("run: credvault create EMAIL PASSWORD")
            }
            Status::DecryptionFailed => Some("the key file does not belong to these credentials"),
            Status::KeyFilePermission | Status::CredentialsFilePermission => {
                Some("run: credvault check")
            }
            _ => None,
        },
    }
}
