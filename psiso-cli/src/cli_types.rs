//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use psiso_core::Platform;

#[derive(Parser)]
#[command(name = "psiso-tool", version)]
#[command(
    about = "Extract title ids and titles from PS1/PS2/PS3/PSP disc images",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the title id and title of disc images
    Inspect {
        /// Platform of the images (ps1, ps2, ps3, psp or an alias)
        #[arg(short, long)]
        platform: Platform,

        /// Write the PS3 disc header if the image lacks it (PS3 only)
        #[arg(long)]
        patch: bool,

        /// Title database for PS1/PS2 (overrides the configured one)
        #[arg(long)]
        title_db: Option<PathBuf>,

        /// Disc image files
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },

    /// Dump or query a standalone PARAM.SFO file
    Sfo {
        /// Path to the PARAM.SFO file
        file: PathBuf,

        /// Only print this key
        #[arg(short, long)]
        key: Option<String>,
    },

    /// List supported platforms
    List,

    /// Manage title database settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and the resolved title databases
    Show,

    /// Print the settings file path
    Path,

    /// Set the title database file for a platform
    SetDb {
        /// Platform (ps1 or ps2)
        platform: Platform,

        /// Title database file
        file: PathBuf,
    },

    /// Remove the configured title database for a platform
    ClearDb {
        /// Platform (ps1 or ps2)
        platform: Platform,
    },
}

#[cfg(test)]
#[path = "tests/cli_types_tests.rs"]
mod tests;
