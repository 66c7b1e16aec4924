//! Project classification.
//!
//! This module defines the [`Classifier`] capability set and the
//! [`ClassifierRegistry`] that holds one classifier per supported ecosystem.
//!
//! ## Main Parts
//!
//! - [`Classifier`] - Probes a directory for an ecosystem's marker files and
//!   supplies the ecosystem's setup and tool-install commands
//! - [`ClassifierRegistry`] - An immutable, deterministically ordered table
//!   of classifiers, built once at startup and passed by parameter
//! - [`NodeJsClassifier`], [`PerlClassifier`], [`PythonClassifier`] - The
//!   built-in ecosystem classifiers

pub mod nodejs;
pub mod perl;
pub mod python;

use std::{fmt::Debug, path::Path};

use anyhow::Result;

use crate::{
    project::{Project, ProjectType, ValidationError},
    terminal::Terminal,
};

pub use nodejs::NodeJsClassifier;
pub use perl::PerlClassifier;
pub use python::PythonClassifier;

/// Capability set of one ecosystem classifier.
///
/// A classifier knows how to recognize its ecosystem's marker files in a
/// directory, how to install the ecosystem's runtime into the container
/// image, and how to set up a detected project inside the container.
pub trait Classifier: Debug {
    /// The project type this classifier produces.
    fn kind(&self) -> ProjectType;

    /// Test a directory for this ecosystem's marker files.
    ///
    /// Returns a new, not-yet-resolved [`Project`] on a match. `None` is the
    /// expected not-applicable outcome when the marker condition fails; it
    /// is never an error.
    fn probe(&self, directory: &Path) -> Option<Project>;

    /// Shell command that sets up a detected project inside the container.
    fn setup_command(&self, project: &Project) -> String;

    /// Shell command that installs the ecosystem runtime into the image.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnresolvedVersion`] when the project's
    /// version has not been resolved, since the command pins the runtime to
    /// that version.
    fn tool_install_command(
        &self,
        project: &Project,
    ) -> std::result::Result<String, ValidationError> {
        let version = project.resolved_version()?;
        Ok(format!("dc-utils-install-tool {} {version}", self.kind()))
    }

    /// Fill in unresolved fields by asking the injected terminal.
    ///
    /// Blocks on the prompt only while `version` is unresolved; a no-op for
    /// an already resolved project, so calling it repeatedly is safe.
    ///
    /// # Errors
    ///
    /// Returns an error when the prompt itself fails.
    fn resolve_missing_fields(
        &self,
        project: &mut Project,
        terminal: &dyn Terminal,
    ) -> Result<()> {
        if !project.is_resolved() {
            let version = terminal.prompt(&format!("Enter '{}' version", self.kind()))?;
            project.version = Some(version);
        }
        Ok(())
    }

    /// Validate that the project is fully resolved.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnresolvedVersion`] when the version is
    /// still missing. This is fatal to the whole invocation: no partial
    /// configuration is ever emitted.
    fn finalize(&self, project: &Project) -> std::result::Result<(), ValidationError> {
        project.resolved_version().map(|_| ())
    }
}

/// Immutable table of classifiers, ordered by type identifier.
///
/// The registry is an explicit value constructed at startup and passed by
/// parameter into discovery and derivation; there is no global state.
/// Iteration order is lexicographic by [`ProjectType::id`], so a directory
/// matching multiple classifiers always yields its projects in the same,
/// reproducible order.
#[derive(Debug)]
pub struct ClassifierRegistry {
    classifiers: Vec<Box<dyn Classifier>>,
}

impl ClassifierRegistry {
    /// Build a registry from an explicit classifier list.
    ///
    /// The list is sorted by type identifier on construction.
    #[must_use]
    pub fn new(mut classifiers: Vec<Box<dyn Classifier>>) -> Self {
        classifiers.sort_by_key(|classifier| classifier.kind().id());
        Self { classifiers }
    }

    /// The built-in registry covering every supported ecosystem.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            Box::new(NodeJsClassifier),
            Box::new(PerlClassifier),
            Box::new(PythonClassifier),
        ])
    }

    /// Look up the classifier for a project type.
    #[must_use]
    pub fn get(&self, kind: ProjectType) -> Option<&dyn Classifier> {
        self.classifiers
            .iter()
            .find(|classifier| classifier.kind() == kind)
            .map(|classifier| &**classifier)
    }

    /// Iterate over the classifiers in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Classifier> {
        self.classifiers.iter().map(|classifier| &**classifier)
    }

    /// Number of registered classifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }
}
