//! Core project data structures and types.
//!
//! This module defines the fundamental data structures used to represent
//! detected ecosystem projects throughout the application, along with the
//! validation error raised when a project is finalized with missing metadata.

use std::{
    fmt::{Display, Formatter, Result},
    path::PathBuf,
};

use serde::Serialize;
use thiserror::Error;

/// Enumeration of supported project ecosystems.
///
/// Each variant corresponds to one registered classifier and carries a stable
/// lowercase identifier used for serialization and for the lexicographic
/// ordering of the classifier registry. Adding a new ecosystem is an additive
/// change: existing identifiers never change.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// Node.js project, marked by a `package.json` manifest
    #[serde(rename = "nodejs")]
    NodeJs,

    /// Perl project, marked by a `Makefile.PL` build description
    Perl,

    /// Python project, marked by a `pyproject.toml` or legacy `setup.py`
    Python,
}

impl ProjectType {
    /// Stable lowercase identifier for this project type.
    ///
    /// This is the string used in serialized output, in tool-install
    /// commands, and as the registry sort key.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::NodeJs => "nodejs",
            Self::Perl => "perl",
            Self::Python => "python",
        }
    }
}

impl Display for ProjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.id())
    }
}

/// Error raised when a project fails validation at finalize time.
///
/// Discovery is not partial-failure-tolerant: this error aborts the whole
/// invocation, since every downstream artifact assumes fully resolved
/// project metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The project's runtime version was never resolved.
    #[error("{} project at {}: version is unresolved", .kind, .directory.display())]
    UnresolvedVersion {
        /// Type of the offending project.
        kind: ProjectType,
        /// Directory the project was detected in.
        directory: PathBuf,
    },
}

/// One detected ecosystem instance inside a directory.
///
/// A directory may host multiple `Project` entries of different types
/// simultaneously (e.g. a repo with both a `package.json` and a
/// `pyproject.toml`). The `(directory, kind)` pair is unique per scan.
#[derive(Clone, Debug, Serialize)]
pub struct Project {
    /// Type of the project, immutable once created.
    #[serde(rename = "type")]
    pub kind: ProjectType,

    /// Absolute path of the directory the project was detected in.
    pub directory: PathBuf,

    /// Runtime version to install inside the container.
    ///
    /// `None` until resolved through the interactive prompt. A finalized
    /// project always carries `Some`; finalization happens before the
    /// project is attached to a workspace.
    pub version: Option<String>,
}

impl Project {
    /// Create a new, not-yet-resolved project.
    #[must_use]
    pub const fn new(kind: ProjectType, directory: PathBuf) -> Self {
        Self {
            kind,
            directory,
            version: None,
        }
    }

    /// Whether the project's version has been resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.version.is_some()
    }

    /// The resolved version string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnresolvedVersion`] when the version has
    /// not been resolved yet.
    pub fn resolved_version(&self) -> std::result::Result<&str, ValidationError> {
        self.version
            .as_deref()
            .ok_or_else(|| ValidationError::UnresolvedVersion {
                kind: self.kind,
                directory: self.directory.clone(),
            })
    }
}

impl Display for Project {
    /// Format the project as `<type> project (<directory>)`.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} project ({})", self.kind, self.directory.display())
    }
}
