//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments and options using the
//! [clap](https://docs.rs/clap/) library, providing structured access to
//! user input.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the `dc-utils` binary.
#[derive(Parser)]
#[command(
    name = "dc-utils",
    version,
    about = "Scan project trees and generate a dev-container configuration"
)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Scan workspace folders and generate the dev-container configuration
    ///
    /// Classifies every project found beneath the given roots, prompts for
    /// any missing runtime versions, and prints the derived configuration
    /// dictionary as JSON on stdout.
    Generate {
        /// Workspace folders to scan
        ///
        /// Each folder becomes one workspace in the generated
        /// configuration. Defaults to the current directory.
        workspace_folders: Vec<PathBuf>,

        /// Directory the rendered configuration is intended for
        ///
        /// Recorded in the generated volume mounts. Defaults to the current
        /// directory.
        #[arg(long)]
        output_path: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["dc-utils", "generate"]);

        let Commands::Generate {
            workspace_folders,
            output_path,
        } = cli.command;

        assert!(workspace_folders.is_empty());
        assert!(output_path.is_none());
    }

    #[test]
    fn test_generate_with_folders_and_output_path() {
        let cli = Cli::parse_from([
            "dc-utils",
            "generate",
            "/home/dev/app",
            "/home/dev/lib",
            "--output-path",
            "/home/dev/out",
        ]);

        let Commands::Generate {
            workspace_folders,
            output_path,
        } = cli.command;

        assert_eq!(
            workspace_folders,
            vec![PathBuf::from("/home/dev/app"), PathBuf::from("/home/dev/lib")]
        );
        assert_eq!(output_path, Some(PathBuf::from("/home/dev/out")));
    }
}
