//! Core library for `devcontainer-utils`.
//!
//! The pipeline turns a set of filesystem roots into a deterministic,
//! serializable configuration dictionary describing how to build and
//! provision an isolated development container:
//!
//! 1. **Discovery** ([`scanner`]) walks each workspace root, applying the
//!    [`classifier`] registry per directory and stopping descent below any
//!    match.
//! 2. **Assembly** ([`workspace`], [`config`]) wraps the discovered projects
//!    into workspaces and combines them with the output path into one
//!    immutable [`Config`].
//! 3. **Derivation** ([`template`]) maps the configuration to the output
//!    data dictionary consumed by the external rendering engine.
//!
//! Every run is a pure function of the current filesystem contents and user
//! input: no shell commands are executed, no network or container
//! operations are performed, and no state persists between invocations.

pub mod classifier;
pub mod config;
pub mod project;
pub mod scanner;
pub mod template;
pub mod terminal;
pub mod workspace;

pub use classifier::{Classifier, ClassifierRegistry};
pub use config::{Config, create_config};
pub use project::{Project, ProjectType, ValidationError};
pub use scanner::Scanner;
pub use template::{TemplateData, render_data};
pub use terminal::{ConsoleTerminal, ScriptedTerminal, Terminal};
pub use workspace::{Workspace, create_workspace};
