//! # devcontainer-utils
//!
//! A CLI tool that scans one or more project directory trees, classifies the
//! projects it finds by ecosystem, and derives a merged dev-container
//! configuration: editor extensions and settings, container volumes, image
//! build instructions, and a provisioning script.
//!
//! The derived configuration is printed as a single JSON dictionary on
//! stdout; discovery progress and prompts use stderr, so the output can be
//! piped straight into a rendering step.
//!
//! ## Usage
//!
//! ```bash
//! # Scan the current directory
//! dc-utils generate
//!
//! # Scan several roots, rendering into a dedicated output directory
//! dc-utils generate ~/src/app ~/src/lib --output-path ~/src/app/.devcontainer
//! ```

mod cli;

use std::{env, path::PathBuf, process::exit};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use devcontainer_utils::{ClassifierRegistry, ConsoleTerminal, create_config, render_data};

use cli::{Cli, Commands};

/// Entry point for the dc-utils application.
///
/// Handles all errors by printing them to stderr before exiting with a
/// non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err:#}", "Error:".red());

        exit(1);
    }
}

/// Main application logic that can return errors.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Commands::Generate {
            workspace_folders,
            output_path,
        } => generate(workspace_folders, output_path),
    }
}

/// Run the full pipeline: assemble the configuration from the given roots,
/// derive the output dictionary, and print it on stdout.
fn generate(workspace_folders: Vec<PathBuf>, output_path: Option<PathBuf>) -> Result<()> {
    let current_dir = env::current_dir()?;
    let workspace_folders = if workspace_folders.is_empty() {
        vec![current_dir.clone()]
    } else {
        workspace_folders
    };
    let output_path = output_path.unwrap_or(current_dir);

    let registry = ClassifierRegistry::builtin();
    let terminal = ConsoleTerminal::new();
    let config = create_config(&workspace_folders, &output_path, &registry, Some(&terminal))?;

    let project_count: usize = config
        .workspaces
        .iter()
        .map(|workspace| workspace.projects.len())
        .sum();
    eprintln!(
        "{}",
        format!(
            "Found {project_count} projects across {} workspaces",
            config.workspaces.len()
        )
        .bold()
    );

    let data = render_data(&config, &registry)?;
    println!("{}", serde_json::to_string_pretty(&data)?);

    Ok(())
}
