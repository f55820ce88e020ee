//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use ocpanel_core::rpc::proto::RunningStatus;
use ocpanel_core::{Config, StorageBackend};

#[derive(Parser, Debug)]
#[command(name = "ocpanel", version, about = "Admin panel for an OurChat server")]
pub struct Cli {
    /// Server base address, e.g. http://127.0.0.1:7777/backend
    #[arg(long, global = true)]
    pub base_address: Option<String>,

    /// Where the session token is kept
    #[arg(long, global = true)]
    pub storage: Option<StorageBackend>,

    /// Also write daily-rotated logs to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Flags take precedence over the environment and the config file
    pub fn apply(&self, config: &mut Config) {
        if let Some(ref address) = self.base_address {
            config.base_address = address.clone();
        }
        if let Some(storage) = self.storage {
            config.storage = storage;
        }
        if let Some(ref dir) = self.log_dir {
            config.log_dir = Some(dir.clone());
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login {
        /// OCID or email. Defaults to the last account used.
        account: Option<String>,
    },
    /// Forget the session token
    Logout,
    /// Show the configured server and session state
    Status,
    /// List navigable routes
    Routes,
    /// Navigate to a route and print what its view loads
    Open {
        path: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Switch the server between normal and maintenance mode
    SetStatus {
        status: StatusArg,
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Ban a user, permanently unless --seconds is given
    Ban {
        user_id: u64,
        #[arg(long)]
        seconds: Option<u64>,
        #[arg(long)]
        reason: Option<String>,
    },
    Unban {
        user_id: u64,
    },
    DeleteAccount {
        user_id: u64,
    },
    /// Publish a server-wide announcement
    Announce {
        title: String,
        content: String,
    },
    /// Print the server configuration
    GetConfig,
    /// Replace the server configuration with the contents of FILE
    SetConfig {
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Normal,
    Maintaining,
}

impl From<StatusArg> for RunningStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Normal => RunningStatus::Normal,
            StatusArg::Maintaining => RunningStatus::Maintaining,
        }
    }
}
