//! This module holds functionality specific to GitHub Actions.
//!
//! Feedback is given with workflow commands printed to stdout
//! and by appending to the files that GitHub exposes via environment variables.

use std::{
    env,
    fs::OpenOptions,
    io::{self, Write},
};

use crate::{BuildError, FileAnnotation, OutputVariable, client::CiClient};

/// A structure to work with GitHub Actions' workflow commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct GithubClient;

/// Escape data for use as a workflow command's message.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape data for use as a workflow command's property value.
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Format a [`FileAnnotation`] as a workflow command.
///
/// ```
/// use sphinx_bot_feedback::{AnnotationLevel, FileAnnotation, client::format_annotation};
///
/// let annotation = FileAnnotation {
///     severity: AnnotationLevel::Warning,
///     path: "docs/index.rst".to_string(),
///     start_line: 19,
///     end_line: 19,
///     message: "Error in code-block\nmaximum 1 argument allowed.".to_string(),
/// };
/// assert_eq!(
///     format_annotation(&annotation),
///     "::warning file=docs/index.rst,line=19,endLine=19::Error in code-block%0Amaximum 1 argument allowed."
/// );
/// ```
pub fn format_annotation(annotation: &FileAnnotation) -> String {
    format!(
        "::{} file={},line={},endLine={}::{}",
        annotation.severity,
        escape_property(&annotation.path),
        annotation.start_line,
        annotation.end_line,
        escape_data(&annotation.message)
    )
}

/// Write each annotation as a workflow command on its own line.
fn write_annotations<W: Write>(out: &mut W, annotations: &[FileAnnotation]) -> io::Result<()> {
    for annotation in annotations {
        writeln!(out, "{}", format_annotation(annotation))?;
    }
    out.flush()
}

impl CiClient for GithubClient {
    /// This prints a line to indicate the beginning of a related group of [`log`] statements.
    ///
    /// For apps' [`log`] implementations, this function's [`log::info`] output needs to have
    /// no prefixed data.
    /// Such behavior can be identified by the log target `"CI_LOG_GROUPING"`.
    ///
    /// ```
    /// # struct MyAppLogger;
    /// impl log::Log for MyAppLogger {
    /// #    fn enabled(&self, metadata: &log::Metadata) -> bool {
    /// #        log::max_level() > metadata.level()
    /// #    }
    ///     fn log(&self, record: &log::Record) {
    ///         if record.target() == "CI_LOG_GROUPING" {
    ///             println!("{}", record.args());
    ///         } else {
    ///             println!(
    ///                 "[{:>5}]{}: {}",
    ///                 record.level().as_str(),
    ///                 record.module_path().unwrap_or_default(),
    ///                 record.args()
    ///             );
    ///         }
    ///     }
    /// #    fn flush(&self) {}
    /// }
    /// ```
    fn start_log_group(&self, name: &str) {
        log::info!(target: "CI_LOG_GROUPING", "::group::{name}");
    }

    /// This prints a line to indicate the ending of a related group of [`log`] statements.
    ///
    /// See also [`GithubClient::start_log_group`] about special handling of
    /// the log target `"CI_LOG_GROUPING"`.
    fn end_log_group(&self, _name: &str) {
        log::info!(target: "CI_LOG_GROUPING", "::endgroup::");
    }

    fn write_file_annotations(&self, annotations: &[FileAnnotation]) -> Result<(), BuildError> {
        if annotations.is_empty() {
            // This check is only here to prevent needlessly locking stdout.
            return Ok(());
        }
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_annotations(&mut handle, annotations)
            .map_err(|e| BuildError::io("write file annotations to stdout", e))
    }

    fn append_step_summary(&self, comment: &str) -> Result<(), BuildError> {
        let gh_out = env::var("GITHUB_STEP_SUMMARY")
            .map_err(|e| BuildError::env_var("GITHUB_STEP_SUMMARY", e))?;
        // step summary MD file can be overwritten/removed in CI runners
        match OpenOptions::new().append(true).open(gh_out) {
            Ok(mut gh_out_file) => writeln!(&mut gh_out_file, "\n{comment}\n")
                .map_err(|e| BuildError::io("write to GITHUB_STEP_SUMMARY file", e)),
            Err(e) => Err(BuildError::io("open GITHUB_STEP_SUMMARY file", e)),
        }
    }

    fn write_output_variables(&self, vars: &[OutputVariable]) -> Result<(), BuildError> {
        if vars.is_empty() {
            // This check is only here to prevent needlessly
            // fetching the env var GITHUB_OUTPUT value and opening the referenced file.
            return Ok(());
        }
        let gh_out =
            env::var("GITHUB_OUTPUT").map_err(|e| BuildError::env_var("GITHUB_OUTPUT", e))?;
        match OpenOptions::new().append(true).open(gh_out) {
            Ok(mut gh_out_file) => {
                for out_var in vars {
                    out_var.validate()?;
                    writeln!(&mut gh_out_file, "{out_var}")
                        .map_err(|e| BuildError::io("write to GITHUB_OUTPUT file", e))?;
                }
                Ok(())
            }
            Err(e) => Err(BuildError::io("open GITHUB_OUTPUT file", e)),
        }
    }
}
