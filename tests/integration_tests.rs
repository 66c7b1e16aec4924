//! Integration tests for devcontainer-utils
//!
//! These tests create temporary file structures and drive the full
//! discovery → assembly → derivation pipeline against them, checking the
//! derived output dictionary end to end.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use devcontainer_utils::classifier::ClassifierRegistry;
use devcontainer_utils::config::{Config, create_config};
use devcontainer_utils::project::ProjectType;
use devcontainer_utils::template::{self, render_data};
use devcontainer_utils::terminal::ScriptedTerminal;

/// Helper function to create a temporary directory structure for testing
fn create_test_directory() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a file with specified content
fn create_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    fs::write(path, content).expect("Failed to write file");
}

/// Create a mock Node.js project directory with a package.json manifest
fn create_node_project(base_path: &Path, project_name: &str) -> PathBuf {
    let project_path = base_path.join(project_name);

    let package_json_content = format!(
        r#"{{
  "name": "{project_name}",
  "version": "1.0.0",
  "dependencies": {{
    "express": "^4.18.0"
  }}
}}"#
    );
    create_file(&project_path.join("package.json"), &package_json_content);
    create_file(&project_path.join("index.js"), "console.log('hi');\n");

    project_path
}

/// Create a mock Python project directory with a pyproject.toml
fn create_python_project(base_path: &Path, project_name: &str) -> PathBuf {
    let project_path = base_path.join(project_name);

    let pyproject_content = format!(
        r#"[project]
name = "{project_name}"
version = "0.1.0"
"#
    );
    create_file(&project_path.join("pyproject.toml"), &pyproject_content);
    create_file(&project_path.join("main.py"), "print('hi')\n");

    project_path
}

/// Create a mock Perl project directory with a Makefile.PL
fn create_perl_project(base_path: &Path, project_name: &str) -> PathBuf {
    let project_path = base_path.join(project_name);

    create_file(
        &project_path.join("Makefile.PL"),
        "use ExtUtils::MakeMaker;\nWriteMakefile(NAME => 'Test');\n",
    );
    create_file(&project_path.join("lib").join("Test.pm"), "package Test;\n");

    project_path
}

/// Run the full pipeline against a set of roots with scripted answers.
fn run_pipeline(roots: &[PathBuf], output_path: &Path, answers: &[&str]) -> Config {
    let registry = ClassifierRegistry::builtin();
    let terminal = ScriptedTerminal::new(answers.iter().copied());

    create_config(roots, output_path, &registry, Some(&terminal))
        .expect("Failed to assemble config")
}

/// Check that a list of strings is non-decreasing.
fn is_sorted(values: &[String]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

#[test]
fn test_node_only_directory_yields_exactly_one_project() {
    let temp_dir = create_test_directory();
    let root = create_node_project(temp_dir.path(), "web");

    let config = run_pipeline(&[root], temp_dir.path(), &["20.0.0"]);

    let projects = &config.workspaces[0].projects;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].kind, ProjectType::NodeJs);
    assert_eq!(projects[0].version.as_deref(), Some("20.0.0"));
}

#[test]
fn test_multi_type_directory_yields_two_projects_sharing_the_directory() {
    let temp_dir = create_test_directory();
    let root = create_node_project(temp_dir.path(), "fullstack");
    create_file(&root.join("pyproject.toml"), "[project]\nname = \"api\"\n");

    let config = run_pipeline(&[root], temp_dir.path(), &["20.0.0", "3.12.0"]);

    let projects = &config.workspaces[0].projects;
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].kind, ProjectType::NodeJs);
    assert_eq!(projects[1].kind, ProjectType::Python);
    assert_eq!(projects[0].directory, projects[1].directory);
}

#[test]
fn test_no_project_is_reported_below_a_matched_directory() {
    let temp_dir = create_test_directory();
    let outer = create_node_project(temp_dir.path(), "outer");
    create_python_project(&outer, "nested");

    let config = run_pipeline(
        &[temp_dir.path().to_path_buf()],
        temp_dir.path(),
        &["20.0.0"],
    );

    let projects = &config.workspaces[0].projects;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].directory, outer);
}

#[test]
fn test_unresolved_version_aborts_the_invocation() {
    let temp_dir = create_test_directory();
    create_node_project(temp_dir.path(), "web");

    let registry = ClassifierRegistry::builtin();
    let result = create_config(
        &[temp_dir.path().to_path_buf()],
        temp_dir.path(),
        &registry,
        None,
    );

    assert!(result.is_err());
}

#[test]
fn test_two_consecutive_runs_produce_identical_dictionaries() {
    let temp_dir = create_test_directory();
    create_python_project(temp_dir.path(), "api");
    create_perl_project(temp_dir.path(), "lib");
    create_node_project(temp_dir.path(), "web");

    let registry = ClassifierRegistry::builtin();
    let roots = [temp_dir.path().to_path_buf()];
    // Discovery visits children in sorted order: api, lib, web.
    let answers = ["3.12.0", "5.38.0", "20.0.0"];

    let first_config = run_pipeline(&roots, temp_dir.path(), &answers);
    let second_config = run_pipeline(&roots, temp_dir.path(), &answers);

    let first = render_data(&first_config, &registry).expect("Failed to derive data");
    let second = render_data(&second_config, &registry).expect("Failed to derive data");

    assert_eq!(
        serde_json::to_string_pretty(&first).unwrap(),
        serde_json::to_string_pretty(&second).unwrap()
    );
}

#[test]
fn test_every_list_valued_field_is_sorted() {
    let first_dir = create_test_directory();
    let second_dir = create_test_directory();
    create_python_project(first_dir.path(), "zeta");
    create_node_project(first_dir.path(), "alpha");
    create_perl_project(second_dir.path(), "middle");

    let registry = ClassifierRegistry::builtin();
    let roots = [
        second_dir.path().to_path_buf(),
        first_dir.path().to_path_buf(),
    ];
    let terminal = ScriptedTerminal::new(["5.38.0", "20.0.0", "3.12.0"]);
    let config = create_config(&roots, first_dir.path(), &registry, Some(&terminal))
        .expect("Failed to assemble config");
    let data = render_data(&config, &registry).expect("Failed to derive data");

    let extensions: Vec<String> = data.devcontainer_json["customizations"]["vscode"]["extensions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(is_sorted(&extensions));

    let folder_names: Vec<String> = data.devcontainer_code_workspace["folders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|folder| folder["name"].as_str().unwrap().to_string())
        .collect();
    assert!(is_sorted(&folder_names));

    let volumes: Vec<String> = data.docker_compose_yaml["services"]["devcontainer"]["volumes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(is_sorted(&volumes));

    let run_lines: Vec<String> = data
        .dockerfile
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect();
    assert!(is_sorted(&run_lines));

    let script_lines: Vec<&str> = data.post_create_sh.lines().collect();
    let setup_lines: Vec<String> = script_lines[2..script_lines.len() - 1]
        .iter()
        .map(|line| (*line).to_string())
        .collect();
    assert!(is_sorted(&setup_lines));
    assert_eq!(script_lines.last(), Some(&"dc-utils-finalize"));
}

#[test]
fn test_node_only_scenario_keeps_baseline_extensions() {
    let temp_dir = create_test_directory();
    let root = create_node_project(temp_dir.path(), "web");

    let registry = ClassifierRegistry::builtin();
    let config = run_pipeline(&[root], temp_dir.path(), &["20.0.0"]);
    let data = render_data(&config, &registry).expect("Failed to derive data");

    let extensions: Vec<&str> = data.devcontainer_json["customizations"]["vscode"]["extensions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    let mut expected = vec![
        template::EXT_DEVCONTAINER_UTILS,
        template::EXT_PRETTIER,
        template::EXT_FORMAT_CODE_ACTION,
        template::EXT_ERRORLENS,
    ];
    expected.sort_unstable();
    assert_eq!(extensions, expected);

    let setup_lines: Vec<&str> = data
        .post_create_sh
        .lines()
        .filter(|line| line.starts_with("cd "))
        .collect();
    assert_eq!(setup_lines.len(), 1);
    assert!(setup_lines[0].contains("npm install ."));
}

#[test]
fn test_python_and_node_scenario_unions_extensions_and_settings() {
    let temp_dir = create_test_directory();
    let root = create_node_project(temp_dir.path(), "fullstack");
    create_file(&root.join("pyproject.toml"), "[project]\nname = \"api\"\n");

    let registry = ClassifierRegistry::builtin();
    let config = run_pipeline(&[root], temp_dir.path(), &["20.0.0", "3.12.0"]);
    let data = render_data(&config, &registry).expect("Failed to derive data");

    let vscode = &data.devcontainer_json["customizations"]["vscode"];
    let extensions: Vec<&str> = vscode["extensions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    for extension in [
        template::EXT_PRETTIER,
        template::EXT_BLACK,
        template::EXT_ISORT,
        template::EXT_PYTHON,
        template::EXT_PYLANCE,
        template::EXT_AUTODOCSTRING,
    ] {
        assert!(extensions.contains(&extension), "missing {extension}");
    }

    let settings = &vscode["settings"];
    assert_eq!(
        settings["python.defaultInterpreterPath"],
        "/devcontainer-utils/asdf/shims/python"
    );
    assert_eq!(
        settings["[python]"]["editor.defaultFormatter"],
        template::EXT_BLACK
    );
}

#[test]
fn test_two_perl_projects_scenario_sorts_include_paths() {
    let temp_dir = create_test_directory();
    create_perl_project(temp_dir.path(), "zlib");
    create_perl_project(temp_dir.path(), "alib");

    let registry = ClassifierRegistry::builtin();
    let config = run_pipeline(
        &[temp_dir.path().to_path_buf()],
        temp_dir.path(),
        &["5.38.0", "5.38.0"],
    );
    let data = render_data(&config, &registry).expect("Failed to derive data");

    let workspace_name = &config.workspaces[0].name;
    let expected = serde_json::json!([
        format!("/workspace/{workspace_name}/alib"),
        format!("/workspace/{workspace_name}/zlib"),
    ]);

    let settings = &data.devcontainer_json["customizations"]["vscode"]["settings"];
    assert_eq!(settings["pls.inc"], expected);
    assert_eq!(settings["perl.perlInc"], expected);
}

#[test]
fn test_dependency_cache_and_vcs_directories_are_not_scanned() {
    let temp_dir = create_test_directory();
    // Vendored and VCS-internal manifests must not surface as projects.
    create_node_project(&temp_dir.path().join("app").join("node_modules"), "express");
    create_node_project(&temp_dir.path().join(".git"), "hooks");
    create_node_project(temp_dir.path(), "lib");

    let config = run_pipeline(
        &[temp_dir.path().to_path_buf()],
        temp_dir.path(),
        &["20.0.0"],
    );

    let projects = &config.workspaces[0].projects;
    assert_eq!(projects.len(), 1);
    assert!(projects[0].directory.ends_with("lib"));
}

#[test]
fn test_volumes_cover_every_workspace_and_the_metadata_mount() {
    let first_dir = create_test_directory();
    let second_dir = create_test_directory();
    let output_dir = create_test_directory();

    let registry = ClassifierRegistry::builtin();
    let roots = [
        first_dir.path().to_path_buf(),
        second_dir.path().to_path_buf(),
    ];
    let config = run_pipeline(&roots, output_dir.path(), &[]);
    let data = render_data(&config, &registry).expect("Failed to derive data");

    let volumes: Vec<&str> = data.docker_compose_yaml["services"]["devcontainer"]["volumes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();

    assert_eq!(volumes.len(), 3);
    let metadata_mount = format!(
        "{}/.devcontainer:/workspace/.devcontainer:cached",
        output_dir.path().display()
    );
    assert!(volumes.contains(&metadata_mount.as_str()));

    for workspace in &config.workspaces {
        let mount = format!(
            "{}:/workspace/{}:cached",
            workspace.directory.display(),
            workspace.name
        );
        assert!(volumes.contains(&mount.as_str()));
    }
}
