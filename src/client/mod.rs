//! A module to contain the trait that reports feedback to a CI platform.
use std::env;

use crate::{BuildError, FileAnnotation, OutputVariable};

#[cfg(feature = "github")]
mod github;
#[cfg(feature = "github")]
pub use github::{GithubClient, format_annotation};

mod local;
pub use local::LocalClient;

/// A custom trait that templates necessary functionality with a CI platform's output channels.
pub trait CiClient {
    /// This prints a line to indicate the beginning of a related group of log statements.
    fn start_log_group(&self, name: &str);

    /// This prints a line to indicate the ending of a related group of log statements.
    fn end_log_group(&self, name: &str);

    /// Output the given `annotations` in a format that the CI platform understands.
    fn write_file_annotations(&self, annotations: &[FileAnnotation]) -> Result<(), BuildError>;

    /// Appends a given comment to the CI workflow's summary page.
    ///
    /// Not all CI platforms natively support this type of feedback.
    /// For those platforms, this is a non-op returning [`Ok`]
    fn append_step_summary(&self, comment: &str) -> Result<(), BuildError> {
        let _ = comment;
        Ok(())
    }

    /// Sets the given `vars` as output variables.
    ///
    /// These variables are designed to be consumed by other steps in the CI workflow.
    fn write_output_variables(&self, vars: &[OutputVariable]) -> Result<(), BuildError>;
}

/// Pick a [`CiClient`] implementation based on the environment.
///
/// Returns a [`GithubClient`] when running in GitHub Actions (`GITHUB_ACTIONS=true`),
/// otherwise a [`LocalClient`].
pub fn init_client() -> Box<dyn CiClient> {
    if let Some(client) = github_client() {
        return client;
    }
    log::debug!(
        "Not running in a supported CI platform (CI={:?}); using plain log output",
        env::var("CI").ok()
    );
    Box::new(LocalClient)
}

#[cfg(feature = "github")]
fn github_client() -> Option<Box<dyn CiClient>> {
    if env::var("GITHUB_ACTIONS").is_ok_and(|val| val == "true") {
        return Some(Box::new(GithubClient));
    }
    None
}

#[cfg(not(feature = "github"))]
fn github_client() -> Option<Box<dyn CiClient>> {
    None
}
