//! Perl project classification.

use std::path::Path;

use crate::project::{Project, ProjectType};

use super::Classifier;

/// Classifier for Perl projects.
///
/// A directory is a Perl project when it contains a `Makefile.PL` build
/// description. Setup installs cpanminus, a language server, and all module
/// dependencies without running their test suites.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerlClassifier;

impl Classifier for PerlClassifier {
    fn kind(&self) -> ProjectType {
        ProjectType::Perl
    }

    fn probe(&self, directory: &Path) -> Option<Project> {
        directory
            .join("Makefile.PL")
            .is_file()
            .then(|| Project::new(ProjectType::Perl, directory.to_path_buf()))
    }

    fn setup_command(&self, _project: &Project) -> String {
        "PERL_MM_USE_DEFAULT=1 cpan App:cpanminus && \
         cpanm --notest PLS Perl::LanguageServer && \
         asdf reshim && \
         cpanm --notest ."
            .to_string()
    }
}
