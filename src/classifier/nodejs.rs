//! Node.js project classification.

use std::path::Path;

use crate::project::{Project, ProjectType};

use super::Classifier;

/// Classifier for Node.js projects.
///
/// A directory is a Node.js project when it contains a `package.json`
/// manifest. Setup installs all declared dependencies with npm.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeJsClassifier;

impl Classifier for NodeJsClassifier {
    fn kind(&self) -> ProjectType {
        ProjectType::NodeJs
    }

    fn probe(&self, directory: &Path) -> Option<Project> {
        directory
            .join("package.json")
            .is_file()
            .then(|| Project::new(ProjectType::NodeJs, directory.to_path_buf()))
    }

    fn setup_command(&self, _project: &Project) -> String {
        "npm install .".to_string()
    }
}
