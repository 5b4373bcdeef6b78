//! Command-line interface.

pub mod check;
pub mod completions;
pub mod create;
pub mod output;
pub mod profile;
pub mod resolve;
pub mod show;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::constants::REGISTRY_DIR_ENV;

/// credvault - encrypted multi-profile credential vault.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Encrypted multi-profile credential vault for automation tooling",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub target: Target,

    #[command(subcommand)]
    pub command: Command,
}

/// Which profile a command operates on.
#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// Registered profile to use (path flags are ignored)
    #[arg(long, global = true, env = "CREDVAULT_PROFILE")]
    pub profile: Option<String>,

    /// Registry directory
    #[arg(long, global = true, env = REGISTRY_DIR_ENV, value_name = "DIR")]
    pub registry_dir: Option<PathBuf>,

    /// Base directory holding the credentials folder (default: home)
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Credentials folder name (default: .credentials)
    #[arg(long, global = true, value_name = "NAME")]
    pub folder: Option<String>,

    /// Credentials file name (default: credentials.enc)
    #[arg(long, global = true, value_name = "NAME")]
    pub credentials_file: Option<String>,

    /// Key file name (default: key.key)
    #[arg(long, global = true, value_name = "NAME")]
    pub key_file: Option<String>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a key and encrypted credentials for the profile
    Create(create::CreateArgs),

    /// Show decrypted credentials
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Print the password instead of masking it
        #[arg(long)]
        reveal: bool,
    },

    /// Print one field (username, email, password, or an additional key)
    Get {
        /// Field name
        field: String,
    },

    /// Check a login against the stored credentials
    Verify {
        email: String,
        password: String,
    },

    /// Check the directory, credentials file, and key file
    Check {
        /// Output as JSON
        #[arg(long, conflicts_with = "binary")]
        json: bool,
        /// Output three native-endian i32 status codes
        #[arg(long)]
        binary: bool,
    },

    /// Manage registered profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Profile subcommands.
#[derive(Subcommand)]
pub enum ProfileAction {
    /// Register the current paths under a name
    Save {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// List registered profiles
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Unregister a profile (files are kept)
    Rm { name: String },

    /// Show which files of a profile exist
    Status {
        /// Profile name (default: the active profile)
        name: Option<String>,
        /// Every registered profile
        #[arg(long, conflicts_with = "name")]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a profile's description
    Describe { name: String, description: String },
}

/// Execute a command.
pub fn execute(command: Command, target: Target) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Create(args) => create::execute(&target, args),
        Show { json, reveal } => show::show(&target, json, reveal),
        Get { field } => show::get(&target, &field),
        Verify { email, password } => show::verify(&target, &email, &password),
        Check { json, binary } => check::execute(&target, json, binary),
        Profile { action } => match action {
            ProfileAction::Save { name, description } => {
                profile::save(&target, &name, description.as_deref())
            }
            ProfileAction::List { json } => profile::list(&target, json),
            ProfileAction::Rm { name } => profile::rm(&target, &name),
            ProfileAction::Status { name, all, json } => {
                profile::status(&target, name.as_deref(), all, json)
            }
            ProfileAction::Describe { name, description } => {
                profile::describe(&target, &name, &description)
            }
        },
        Completions { shell } => completions::execute(shell),
    }
}
