//! Configuration consumed by [`build_all_docs()`](crate::build_all_docs).
//!
//! The core only sees a resolved [`BuildConfig`].
//! Reading the CI inputs from the environment is done once, via [`ActionInputs::from_env()`].
use std::{env, path::PathBuf};

/// The default docs directory built when no directory is given.
pub const DEFAULT_DOCS_FOLDER: &str = "docs/";

/// The file name (in the system's temp dir) of the warnings log written by Sphinx.
pub const DEFAULT_LOG_FILE_NAME: &str = "sphinx-log";

/// The immutable settings used to build each docs directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// The command used to build the docs (eg. `make html`).
    pub build_command: String,

    /// A command used to install dependencies before each build.
    ///
    /// If [`None`], then `pip install -U Sphinx` is used instead.
    pub dependency_install_command: Option<String>,

    /// The path of the warnings log that Sphinx is told to write.
    ///
    /// Any existing file at this path is removed before each build.
    pub log_file: PathBuf,
}

impl BuildConfig {
    /// Create a config that writes its warnings log to the default location.
    pub fn new(
        build_command: impl Into<String>,
        dependency_install_command: Option<String>,
    ) -> Self {
        Self {
            build_command: build_command.into(),
            dependency_install_command,
            log_file: env::temp_dir().join(DEFAULT_LOG_FILE_NAME),
        }
    }
}

/// The inputs given to the CI step, as read from environment variables.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    /// The value of the `INPUT_BUILD-COMMAND` environment variable.
    pub build_command: Option<String>,

    /// The value of the `INPUT_DOCS-FOLDER` environment variable.
    pub docs_folder: Option<String>,

    /// The value of the `INPUT_PRE-BUILD-COMMAND` environment variable.
    pub pre_build_command: Option<String>,

    /// The value of the `INPUT_DEPENDENCY-INSTALL-COMMAND` environment variable.
    pub dependency_install_command: Option<String>,
}

impl ActionInputs {
    /// Read the step's inputs from the environment.
    ///
    /// Blank values are treated as absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the step's inputs with a custom lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            build_command: get("INPUT_BUILD-COMMAND"),
            docs_folder: get("INPUT_DOCS-FOLDER"),
            pre_build_command: get("INPUT_PRE-BUILD-COMMAND"),
            dependency_install_command: get("INPUT_DEPENDENCY-INSTALL-COMMAND"),
        }
    }

    /// The docs directories to build.
    pub fn docs_directories(&self) -> Vec<String> {
        vec![
            self.docs_folder
                .clone()
                .unwrap_or(DEFAULT_DOCS_FOLDER.to_string()),
        ]
    }

    /// Convert these inputs into a [`BuildConfig`].
    ///
    /// A missing build command is kept as an empty string so that
    /// [`build_all_docs()`](crate::build_all_docs) reports it.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::new(
            self.build_command.clone().unwrap_or_default(),
            self.dependency_install_command.clone(),
        )
    }
}
