//! Whole-run configuration assembly.
//!
//! A [`Config`] combines the resolved output path with one workspace per
//! command-line root argument. It is immutable after assembly: the
//! derivation engine only ever reads it.

use std::path::{Path, PathBuf, absolute};

use anyhow::Result;
use serde::Serialize;

use crate::{
    classifier::ClassifierRegistry,
    terminal::Terminal,
    workspace::{Workspace, create_workspace},
};

/// The whole-run input to derivation.
#[derive(Clone, Debug, Serialize)]
pub struct Config {
    /// Absolute path where artifacts are ultimately written. Resolved, but
    /// not required to exist yet.
    pub output_path: PathBuf,

    /// One workspace per root argument, in argument order.
    pub workspaces: Vec<Workspace>,
}

/// Assemble the configuration for one invocation.
///
/// Roots are not deduplicated: passing the same root twice yields two
/// workspace entries with the same name, and downstream derivation does not
/// protect against this.
///
/// # Errors
///
/// Returns an error when a path cannot be made absolute or when discovery
/// beneath one of the roots fails.
pub fn create_config(
    workspace_folders: &[PathBuf],
    output_path: &Path,
    registry: &ClassifierRegistry,
    terminal: Option<&dyn Terminal>,
) -> Result<Config> {
    let output_path = absolute(output_path)?;

    let mut workspaces = Vec::with_capacity(workspace_folders.len());
    for folder in workspace_folders {
        workspaces.push(create_workspace(folder, registry, terminal)?);
    }

    Ok(Config {
        output_path,
        workspaces,
    })
}
