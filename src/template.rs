//! Derivation of the dev-container data dictionary.
//!
//! This module is the pure-function layer that turns a [`Config`] into the
//! complete set of named artifacts handed to the external rendering
//! collaborator: the multi-root workspace descriptor, the devcontainer
//! definition, the compose file, the image build instructions, and the
//! provisioning script. Nothing here touches the filesystem or spawns
//! processes.
//!
//! Every collection is sorted before it is placed in the dictionary, and the
//! dictionary's maps are `BTreeMap`-backed, so re-running the entire
//! pipeline against an unchanged filesystem and unchanged prompt answers
//! produces a byte-identical dictionary.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};

use crate::{
    classifier::ClassifierRegistry,
    config::Config,
    project::{Project, ProjectType},
};

/// Python formatter extension.
pub const EXT_BLACK: &str = "ms-python.black-formatter";
/// Python import-sorting extension.
pub const EXT_ISORT: &str = "ms-python.isort";
/// Perl language extension.
pub const EXT_PERL: &str = "richterger.perl";
/// PLS language-server extension.
pub const EXT_PLS: &str = "fractalboy.pls";
/// Python language extension.
pub const EXT_PYTHON: &str = "ms-python.python";
/// Python language-server extension.
pub const EXT_PYLANCE: &str = "ms-python.vscode-pylance";
/// Docstring generator extension.
pub const EXT_AUTODOCSTRING: &str = "njpwerner.autodocstring";
/// Exposes formatting as a code action, so it can run after import sorting.
pub const EXT_FORMAT_CODE_ACTION: &str = "rohit-gohri.format-code-action";
/// General-purpose formatter extension.
pub const EXT_PRETTIER: &str = "esbenp.prettier-vscode";
/// Inline diagnostics extension.
pub const EXT_ERRORLENS: &str = "usernamehw.errorlens";
/// The companion extension, installed from the mounted `.vsix`.
pub const EXT_DEVCONTAINER_UTILS: &str = "/workspace/.devcontainer/devcontainer-utils.vsix";

/// Base image every generated Dockerfile builds on.
pub const BASE_IMAGE: &str = "docker.io/benfiola/devcontainer-utils:latest";

const PYTHON_INTERPRETER: &str = "/devcontainer-utils/asdf/shims/python";
const PERL_INTERPRETER: &str = "/devcontainer-utils/asdf/shims/perl";
const FINALIZE_COMMAND: &str = "dc-utils-finalize";

/// Extensions always included, regardless of what was discovered.
const BASELINE_EXTENSIONS: [&str; 4] = [
    EXT_DEVCONTAINER_UTILS,
    EXT_PRETTIER,
    EXT_FORMAT_CODE_ACTION,
    EXT_ERRORLENS,
];

/// The complete, deterministic output dictionary.
///
/// This is the stable contract consumed by the external rendering engine;
/// each field is one named artifact.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TemplateData {
    /// Multi-root workspace descriptor (folder list).
    pub devcontainer_code_workspace: Value,

    /// Container definition: service name, build context, mounted volumes,
    /// idle command, editor customization block.
    pub devcontainer_json: Value,

    /// Compose service wiring the container to its volumes.
    pub docker_compose_yaml: Value,

    /// Image build instruction list, one instruction per line.
    pub dockerfile: String,

    /// Provisioning script body run after the container is created.
    pub post_create_sh: String,
}

/// Derive the complete output dictionary from a configuration.
///
/// # Errors
///
/// Returns an error when a project's type has no registered classifier or
/// when a project's version is unresolved (which assembly rules out for any
/// finalized configuration).
pub fn render_data(config: &Config, registry: &ClassifierRegistry) -> Result<TemplateData> {
    Ok(TemplateData {
        devcontainer_code_workspace: devcontainer_code_workspace(config),
        devcontainer_json: devcontainer_json(config),
        docker_compose_yaml: docker_compose_yaml(config),
        dockerfile: dockerfile(config, registry)?,
        post_create_sh: post_create_sh(config, registry)?,
    })
}

/// Every project across every workspace, in workspace order.
fn all_projects(config: &Config) -> impl Iterator<Item = &Project> {
    config
        .workspaces
        .iter()
        .flat_map(|workspace| &workspace.projects)
}

/// Per-type editor extension additions.
const fn type_extensions(kind: ProjectType) -> &'static [&'static str] {
    match kind {
        ProjectType::NodeJs => &[],
        ProjectType::Perl => &[EXT_PERL, EXT_PLS],
        ProjectType::Python => &[
            EXT_BLACK,
            EXT_ISORT,
            EXT_PYTHON,
            EXT_PYLANCE,
            EXT_AUTODOCSTRING,
        ],
    }
}

/// The sorted, deduplicated editor extension set.
///
/// Starts from the always-on baseline and unions in the per-type list of
/// every discovered project.
#[must_use]
pub fn vscode_extensions(config: &Config) -> Vec<String> {
    let mut extensions: BTreeSet<&str> = BTreeSet::from(BASELINE_EXTENSIONS);

    for project in all_projects(config) {
        extensions.extend(type_extensions(project.kind));
    }

    extensions.into_iter().map(str::to_string).collect()
}

/// The editor settings map derived from the extension set.
#[must_use]
pub fn vscode_settings(config: &Config) -> BTreeMap<String, Value> {
    let extensions = vscode_extensions(config);
    let has = |extension: &str| extensions.iter().any(|e| e == extension);

    let mut settings = BTreeMap::new();

    let formatter_map: [(&str, &[&str]); 2] = [
        (
            EXT_PRETTIER,
            &[
                "dockercompose",
                "javascript",
                "javascriptreact",
                "json",
                "jsonc",
                "markdown",
                "typescript",
                "typescriptreact",
                "yaml",
            ],
        ),
        (EXT_BLACK, &["python"]),
    ];

    for (formatter, syntaxes) in formatter_map {
        if !has(formatter) {
            continue;
        }

        for syntax in syntaxes {
            // prettier deletes unused imports as a side effect of
            // 'source.organizeImports', so it gets the weaker sort action.
            let mut code_actions = vec![if formatter == EXT_PRETTIER {
                "source.sortImports"
            } else {
                "source.organizeImports"
            }];

            // 'source.formatDocument' only exists with the aggregator extension.
            if has(EXT_FORMAT_CODE_ACTION) {
                code_actions.push("source.formatDocument");
            }

            settings.insert(
                format!("[{syntax}]"),
                json!({
                    "editor.defaultFormatter": formatter,
                    "editor.codeActionsOnSave": code_actions,
                }),
            );
        }
    }

    if has(EXT_ISORT) && has(EXT_BLACK) {
        settings.insert("isort.args".to_string(), json!(["--profile", "black"]));
    }

    if has(EXT_PYTHON) {
        settings.insert(
            "python.defaultInterpreterPath".to_string(),
            json!(PYTHON_INTERPRETER),
        );
    }

    if has(EXT_PERL) || has(EXT_PLS) {
        let include_paths = perl_include_paths(config);

        if has(EXT_PERL) {
            settings.insert("pls.syntax.perl".to_string(), json!(PERL_INTERPRETER));
            settings.insert("pls.inc".to_string(), json!(include_paths));
        }

        if has(EXT_PLS) {
            settings.insert("perl.perlCmd".to_string(), json!(PERL_INTERPRETER));
            settings.insert("perl.perlInc".to_string(), json!(include_paths));
        }
    }

    settings
}

/// Sorted in-container directories of every Perl project.
fn perl_include_paths(config: &Config) -> Vec<String> {
    let mut paths: Vec<String> = config
        .workspaces
        .iter()
        .flat_map(|workspace| {
            workspace
                .projects
                .iter()
                .filter(|project| project.kind == ProjectType::Perl)
                .map(|project| {
                    workspace
                        .container_path(&project.directory)
                        .display()
                        .to_string()
                })
        })
        .collect();
    paths.sort();
    paths
}

/// The multi-root workspace descriptor: one folder entry per workspace plus
/// the fixed metadata entry, sorted by display name.
#[must_use]
pub fn devcontainer_code_workspace(config: &Config) -> Value {
    let mut folders: Vec<(String, String)> = vec![(
        ".devcontainer".to_string(),
        "/workspace/.devcontainer".to_string(),
    )];

    for workspace in &config.workspaces {
        folders.push((
            workspace.name.clone(),
            workspace.container_root().display().to_string(),
        ));
    }
    folders.sort();

    let folders: Vec<Value> = folders
        .into_iter()
        .map(|(name, path)| json!({ "name": name, "path": path }))
        .collect();

    json!({ "folders": folders })
}

/// The devcontainer definition, including the editor customization block.
#[must_use]
pub fn devcontainer_json(config: &Config) -> Value {
    json!({
        "name": "devcontainer",
        "dockerComposeFile": ["docker-compose.yaml"],
        "service": "devcontainer",
        "workspaceFolder": "/workspace",
        "postCreateCommand": "/workspace/.devcontainer/post-create.sh",
        "customizations": {
            "vscode": {
                "extensions": vscode_extensions(config),
                "settings": vscode_settings(config),
            }
        },
    })
}

/// The compose service: build context, sorted volume list, idle command.
#[must_use]
pub fn docker_compose_yaml(config: &Config) -> Value {
    let mut volumes = vec![format!(
        "{}/.devcontainer:/workspace/.devcontainer:cached",
        config.output_path.display()
    )];

    for workspace in &config.workspaces {
        volumes.push(format!(
            "{}:{}:cached",
            workspace.directory.display(),
            workspace.container_root().display()
        ));
    }
    volumes.sort();

    json!({
        "version": "3",
        "services": {
            "devcontainer": {
                "build": { "dockerfile": "Dockerfile", "context": "." },
                "volumes": volumes,
                "command": "/bin/sh -c 'while sleep 1000; do :; done'",
            }
        },
    })
}

/// The image build instructions: one `RUN` per distinct tool-install
/// command, deduplicated and sorted, layered on the fixed base image.
///
/// # Errors
///
/// Returns an error when a project's type has no registered classifier or
/// its version is unresolved.
pub fn dockerfile(config: &Config, registry: &ClassifierRegistry) -> Result<String> {
    let mut lines = vec![format!("FROM {BASE_IMAGE}")];

    let mut install_commands = BTreeSet::new();
    for project in all_projects(config) {
        let classifier = classifier_for(registry, project)?;
        install_commands.insert(format!("RUN {}", classifier.tool_install_command(project)?));
    }
    lines.extend(install_commands);

    Ok(lines.join("\n"))
}

/// The provisioning script: one sorted setup line per project (not
/// deduplicated), then the fixed finalize instruction last.
///
/// # Errors
///
/// Returns an error when a project's type has no registered classifier.
pub fn post_create_sh(config: &Config, registry: &ClassifierRegistry) -> Result<String> {
    let mut lines = vec!["#!/bin/sh".to_string(), "set -e".to_string()];

    let mut setup_commands = Vec::new();
    for workspace in &config.workspaces {
        for project in &workspace.projects {
            let classifier = classifier_for(registry, project)?;
            let project_path = workspace.container_path(&project.directory);
            setup_commands.push(format!(
                "cd {} && {{ {}; }}",
                project_path.display(),
                classifier.setup_command(project)
            ));
        }
    }
    setup_commands.sort();
    lines.extend(setup_commands);

    lines.push(FINALIZE_COMMAND.to_string());

    Ok(lines.join("\n"))
}

fn classifier_for<'a>(
    registry: &'a ClassifierRegistry,
    project: &Project,
) -> Result<&'a dyn crate::classifier::Classifier> {
    registry.get(project.kind).with_context(|| {
        format!(
            "no classifier registered for '{}' project at {}",
            project.kind,
            project.directory.display()
        )
    })
}
