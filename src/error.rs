//! Error types used across the sphinx-bot-feedback crate.
use thiserror::Error;

/// The possible errors emitted when validating an [`OutputVariable`](crate::OutputVariable).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OutputVariableError {
    /// The output variable's name is empty.
    #[error("The output variable's name is empty")]
    NameIsEmpty,
    /// The output variable's name starts with a number.
    #[error("The output variable's name starts with a number: '{0}'")]
    NameStartsWithNumber(String),
    /// The output variable's value spans multiple lines.
    #[error("The output variable's value spans multiple lines: '{0}'")]
    MultiLineValue(String),
}

/// The possible errors emitted while building docs and reporting feedback.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configured build command is empty or absent.
    #[error("Build command may not be empty")]
    MissingBuildCommand,

    /// No docs directory was given to build.
    #[error("Please provide at least one docs directory to build")]
    NoDocsDirectories,

    /// A command string could not be split into program and arguments.
    #[error("Failed to parse command: {command:?}")]
    InvalidCommand { command: String },

    /// The dependency install command exited with a non-zero status.
    #[error("Dependency install command {command:?} failed with exit code {status}")]
    DependencyInstall { command: Vec<String>, status: i32 },

    /// Errors related to standard I/O.
    #[error("Failed to {task}: {source}")]
    Io {
        task: String,
        #[source]
        source: std::io::Error,
    },

    /// Error emitted when failing to read environment variable
    #[error("Failed to get env var '{name}': {source}")]
    EnvVar {
        name: String,
        #[source]
        source: std::env::VarError,
    },

    /// An error emitted when encountering an invalid [`OutputVariable`](crate::OutputVariable).
    #[error("OutputVariable is malformed: {0}")]
    OutputVar(#[from] OutputVariableError),

    /// At least one docs directory failed to build.
    ///
    /// This is only emitted after all docs directories were attempted.
    #[error("Build failed with {warnings} warnings")]
    BuildFailed { warnings: usize },
}

impl BuildError {
    /// Helper function to create an [`Self::EnvVar`] error with variable name and source error.
    pub fn env_var(name: &str, source: std::env::VarError) -> Self {
        Self::EnvVar {
            name: name.to_string(),
            source,
        }
    }

    /// Helper function to create an [`Self::Io`] error with task context.
    pub fn io(task: &str, source: std::io::Error) -> Self {
        Self::Io {
            task: task.to_string(),
            source,
        }
    }

    /// Helper function to create an [`Self::InvalidCommand`] error.
    pub fn invalid_command(command: &str) -> Self {
        Self::InvalidCommand {
            command: command.to_string(),
        }
    }
}
