//! Workspace assembly.
//!
//! A workspace wraps one discovery root: its absolute path, a display name
//! derived from the last path segment, and the finalized projects discovered
//! beneath it. Workspaces also know where their contents will be mounted
//! inside the container.

use std::path::{Path, PathBuf, absolute};

use anyhow::Result;
use serde::Serialize;

use crate::{
    classifier::ClassifierRegistry, project::Project, scanner::Scanner, terminal::Terminal,
};

/// In-container directory all workspaces are mounted beneath.
pub const CONTAINER_WORKSPACE_ROOT: &str = "/workspace";

/// One discovery root and the projects found beneath it.
///
/// A workspace with zero projects is valid (a plain-file workspace).
#[derive(Clone, Debug, Serialize)]
pub struct Workspace {
    /// Absolute path of the scanned root.
    pub directory: PathBuf,

    /// Display name, computed once at creation from the last path segment.
    pub name: String,

    /// Finalized projects discovered beneath the root, in discovery order.
    pub projects: Vec<Project>,
}

impl Workspace {
    /// Create a workspace around an already-discovered project list.
    #[must_use]
    pub fn new(directory: PathBuf, projects: Vec<Project>) -> Self {
        let name = directory
            .file_name()
            .map_or_else(String::new, |segment| {
                segment.to_string_lossy().into_owned()
            });

        Self {
            directory,
            name,
            projects,
        }
    }

    /// The workspace's mount point inside the container.
    #[must_use]
    pub fn container_root(&self) -> PathBuf {
        Path::new(CONTAINER_WORKSPACE_ROOT).join(&self.name)
    }

    /// Map a host path under this workspace to its in-container location.
    ///
    /// Falls back to the workspace's own mount point when `subpath` does not
    /// lie beneath the workspace directory.
    #[must_use]
    pub fn container_path(&self, subpath: &Path) -> PathBuf {
        let root = self.container_root();
        match subpath.strip_prefix(&self.directory) {
            Ok(relative) if !relative.as_os_str().is_empty() => root.join(relative),
            _ => root,
        }
    }
}

/// Assemble a workspace for one root: absolutize the path, discover the
/// projects beneath it, and wrap the result.
///
/// # Errors
///
/// Returns an error when the root cannot be made absolute or when discovery
/// fails (a project's version stayed unresolved).
pub fn create_workspace(
    root: &Path,
    registry: &ClassifierRegistry,
    terminal: Option<&dyn Terminal>,
) -> Result<Workspace> {
    let directory = absolute(root)?;
    let projects = Scanner::new(registry).find_projects(&directory, terminal)?;

    Ok(Workspace::new(directory, projects))
}
