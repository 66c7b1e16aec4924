//! Directory scanning and project discovery.
//!
//! This module provides the discovery loop that traverses a workspace root
//! to find ecosystem projects. Traversal keeps an explicit work list, prunes
//! excluded directories (dependency caches, version-control metadata), and
//! stops descending below any directory that matched at least one
//! classifier: ecosystem projects are not expected to nest, so a matched
//! directory is a leaf for discovery purposes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use glob::Pattern;

use crate::{classifier::ClassifierRegistry, project::Project, terminal::Terminal};

/// Exclusion patterns applied by default: dependency-cache directories and
/// version-control metadata are neither classified nor descended into.
pub const DEFAULT_EXCLUDE_PATTERNS: [&str; 2] = ["**/node_modules", "**/.git"];

/// Directory scanner that discovers ecosystem projects beneath a root.
///
/// The scanner borrows the classifier registry it applies per directory;
/// constructing one is cheap and a scanner can be reused across roots.
#[derive(Debug)]
pub struct Scanner<'a> {
    /// Classifiers applied to every visited directory, in registry order.
    registry: &'a ClassifierRegistry,

    /// Compiled patterns for directories to skip entirely.
    exclude: Vec<Pattern>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner with the default exclusion patterns.
    #[must_use]
    pub fn new(registry: &'a ClassifierRegistry) -> Self {
        let exclude = DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .filter_map(|pattern| Pattern::new(pattern).ok())
            .collect();

        Self { registry, exclude }
    }

    /// Create a scanner with custom exclusion patterns.
    ///
    /// # Errors
    ///
    /// Returns an error when one of the patterns is not valid glob syntax.
    pub fn with_exclude_patterns(
        registry: &'a ClassifierRegistry,
        patterns: &[&str],
    ) -> Result<Self> {
        let exclude = patterns
            .iter()
            .copied()
            .map(Pattern::new)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { registry, exclude })
    }

    /// Discover the ordered list of finalized projects beneath a root.
    ///
    /// Visits directories from an explicit work list seeded with `root`.
    /// Non-existent or non-directory entries are silently dropped, excluded
    /// directories are skipped without descent, and every classifier in the
    /// registry is run against each remaining directory. When at least one
    /// classifier matches, the matches are resolved through `terminal` (when
    /// present), finalized, and recorded, and the directory's children are
    /// not visited. When none match, the children are queued in sorted order
    /// so traversal is reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error when a matched project fails finalization (its
    /// version stayed unresolved) or when prompting fails. Discovery is not
    /// partial-failure-tolerant: the first such error aborts the scan.
    pub fn find_projects(
        &self,
        root: &Path,
        terminal: Option<&dyn Terminal>,
    ) -> Result<Vec<Project>> {
        let mut pending = vec![root.to_path_buf()];
        let mut projects = Vec::new();

        while let Some(directory) = pending.pop() {
            if !directory.is_dir() {
                continue;
            }
            if self.is_excluded(&directory) {
                continue;
            }

            let found = self.classify_directory(&directory, terminal)?;
            if found.is_empty() {
                // Reverse so the stack pops children in lexicographic order.
                for child in Self::child_directories(&directory).into_iter().rev() {
                    pending.push(child);
                }
            } else {
                projects.extend(found);
            }
        }

        Ok(projects)
    }

    /// Run every registered classifier against one directory.
    ///
    /// All matches contribute: a directory may simultaneously be, e.g., a
    /// Python project and a Node.js project. Matches are echoed, resolved,
    /// and finalized before being returned.
    fn classify_directory(
        &self,
        directory: &Path,
        terminal: Option<&dyn Terminal>,
    ) -> Result<Vec<Project>> {
        let mut found = Vec::new();

        for classifier in self.registry.iter() {
            let Some(mut project) = classifier.probe(directory) else {
                continue;
            };

            if let Some(terminal) = terminal {
                terminal.echo(&format!(
                    "Found {} project: {}",
                    classifier.kind(),
                    directory.display()
                ));
                classifier.resolve_missing_fields(&mut project, terminal)?;
            }
            classifier.finalize(&project)?;

            found.push(project);
        }

        Ok(found)
    }

    /// Check whether a directory matches an exclusion pattern.
    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path(path))
    }

    /// Immediate child directories of `directory`, sorted by name.
    ///
    /// An unreadable directory contributes no children rather than failing
    /// the scan.
    fn child_directories(directory: &Path) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(directory) else {
            return Vec::new();
        };

        let mut children: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        children.sort();
        children
    }
}
