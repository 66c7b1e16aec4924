//! Python project classification.

use std::path::Path;

use crate::project::{Project, ProjectType};

use super::Classifier;

/// Classifier for Python projects.
///
/// A directory is a Python project when it contains a `pyproject.toml` or a
/// legacy `setup.py`. Setup installs an optional `requirements.txt` first,
/// then the project itself in editable mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct PythonClassifier;

impl Classifier for PythonClassifier {
    fn kind(&self) -> ProjectType {
        ProjectType::Python
    }

    fn probe(&self, directory: &Path) -> Option<Project> {
        let has_marker =
            directory.join("pyproject.toml").is_file() || directory.join("setup.py").is_file();
        has_marker.then(|| Project::new(ProjectType::Python, directory.to_path_buf()))
    }

    fn setup_command(&self, _project: &Project) -> String {
        "[ -f requirements.txt ] && pip install -r requirements.txt; pip install -e .".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_probe_matches_pyproject_toml() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("pyproject.toml"), "[project]").unwrap();

        let project = PythonClassifier.probe(temp_dir.path()).unwrap();
        assert_eq!(project.kind, ProjectType::Python);
    }

    #[test]
    fn test_probe_matches_legacy_setup_py() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("setup.py"), "from setuptools import setup").unwrap();

        assert!(PythonClassifier.probe(temp_dir.path()).is_some());
    }

    #[test]
    fn test_probe_without_marker_is_not_applicable() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("requirements.txt"), "requests\n").unwrap();

        // A requirements file alone does not mark a project.
        assert!(PythonClassifier.probe(temp_dir.path()).is_none());
    }

    #[test]
    fn test_setup_command_handles_optional_requirements() {
        let project = Project::new(ProjectType::Python, "/apps/api".into());
        let command = PythonClassifier.setup_command(&project);

        assert!(command.starts_with("[ -f requirements.txt ]"));
        assert!(command.ends_with("pip install -e ."));
    }

    #[test]
    fn test_tool_install_command() {
        let mut project = Project::new(ProjectType::Python, "/apps/api".into());
        project.version = Some("3.12.0".to_string());

        assert_eq!(
            PythonClassifier.tool_install_command(&project).unwrap(),
            "dc-utils-install-tool python 3.12.0"
        );
    }
}
