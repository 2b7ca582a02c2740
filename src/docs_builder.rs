//! This module drives the docs build for each requested docs directory.
//!
//! Each build writes a warnings log that is parsed into [`FileAnnotation`]s.
//! The annotations are forwarded to a [`CiClient`] as soon as each directory is built.
use std::{
    env,
    fmt::Display,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    BuildConfig, BuildError, FileAnnotation,
    client::CiClient,
    parse_warnings_log,
    runner::{CommandRunner, CommandSpec},
};

/// The command used to install Sphinx when no dependency install command is configured.
pub const DEFAULT_INSTALL_COMMAND: &str = "pip install -U Sphinx";

/// The environment variable that Sphinx's generated makefiles pass to `sphinx-build`.
const MAKE_OPTIONS_VAR: &str = "SPHINXOPTS";

/// The outcome of building a single docs directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// The exit code of the build command.
    pub return_code: i32,

    /// The warnings parsed from the build's warnings log.
    pub annotations: Vec<FileAnnotation>,
}

/// The aggregate outcome of building all docs directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Did every docs directory build with a zero exit code?
    pub success: bool,

    /// The total number of warnings found across all docs directories.
    pub warnings: usize,
}

impl Default for BuildSummary {
    fn default() -> Self {
        Self {
            success: true,
            warnings: 0,
        }
    }
}

impl BuildSummary {
    /// Record the [`BuildResult`] of one docs directory.
    pub fn record(&mut self, result: &BuildResult) {
        if result.return_code != 0 {
            self.success = false;
        }
        self.warnings += result.annotations.len();
    }
}

impl Display for BuildSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Build {} with {} warnings",
            if self.success { "succeeded" } else { "failed" },
            self.warnings
        )
    }
}

/// The options that make `sphinx-build` continue past warnings and write them to `log_file`.
fn sphinx_options(log_file: &Path) -> Vec<String> {
    vec![
        "--keep-going".to_string(),
        "--no-color".to_string(),
        "-w".to_string(),
        log_file.to_string_lossy().to_string(),
    ]
}

/// Create the effective build invocation from the configured `build_command`.
///
/// If the command is a `make` invocation, the Sphinx options are passed via the
/// `SPHINXOPTS` environment variable and `-e` is added so that the environment
/// overrides any assignment in the makefile.
/// Otherwise, the Sphinx options are appended to the command's arguments.
pub fn build_invocation(build_command: &str, log_file: &Path) -> Result<CommandSpec, BuildError> {
    let mut command = CommandSpec::parse(build_command)?;
    let options = sphinx_options(log_file);
    if command.program == "make" {
        let make_options = shlex::try_join(options.iter().map(String::as_str))
            .map_err(|_| BuildError::invalid_command(&log_file.to_string_lossy()))?;
        command.args.push("-e".to_string());
        command.envs.push((MAKE_OPTIONS_VAR.to_string(), make_options));
    } else {
        command.args.extend(options);
    }
    Ok(command)
}

/// Run the configured dependency install command, or install Sphinx if none is configured.
///
/// A non-zero exit code is a fatal [`BuildError::DependencyInstall`].
pub async fn install_dependencies(
    config: &BuildConfig,
    runner: &dyn CommandRunner,
) -> Result<(), BuildError> {
    let command = CommandSpec::parse(
        config
            .dependency_install_command
            .as_deref()
            .unwrap_or(DEFAULT_INSTALL_COMMAND),
    )?;
    log::info!("Running: {command}");
    let status = runner.run(&command, None).await?;
    if status != 0 {
        return Err(BuildError::DependencyInstall {
            command: command.argv(),
            status,
        });
    }
    Ok(())
}

/// Remove a previous run's warnings log, if any.
async fn remove_stale_log(log_file: &Path) -> Result<(), BuildError> {
    match tokio::fs::remove_file(log_file).await {
        Ok(()) => {
            log::debug!("Removed stale warnings log {}", log_file.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BuildError::io("remove stale warnings log", e)),
    }
}

/// Read the lines of the warnings log.
///
/// A missing log is treated as empty (the build command may have failed before Sphinx ran).
async fn read_log(log_file: &Path) -> Result<Vec<String>, BuildError> {
    match tokio::fs::read(log_file).await {
        Ok(buf) => Ok(String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!(
                "No warnings log was written to {}; assuming no warnings",
                log_file.display()
            );
            Ok(vec![])
        }
        Err(e) => Err(BuildError::io("read warnings log", e)),
    }
}

/// Build the docs in `docs_directory` and parse the resulting warnings log.
///
/// Paths in the returned annotations are relative to `base_dir`.
pub async fn build_docs(
    config: &BuildConfig,
    runner: &dyn CommandRunner,
    docs_directory: &Path,
    base_dir: &Path,
) -> Result<BuildResult, BuildError> {
    if config.build_command.trim().is_empty() {
        return Err(BuildError::MissingBuildCommand);
    }

    install_dependencies(config, runner).await?;
    remove_stale_log(&config.log_file).await?;

    let command = build_invocation(&config.build_command, &config.log_file)?;
    log::info!("Running: {command}");
    let return_code = runner.run(&command, Some(docs_directory)).await?;
    log::debug!("Build in {} exited with {return_code}", docs_directory.display());

    let lines = read_log(&config.log_file).await?;
    Ok(BuildResult {
        return_code,
        annotations: parse_warnings_log(&lines, base_dir),
    })
}

/// Build each of the `docs_directories` in order.
///
/// Annotations are written to the `client` as each directory finishes building.
/// A directory that fails to build does not stop the remaining directories from being built.
///
/// Returns the [`BuildSummary`] if all builds succeeded.
/// Otherwise, [`BuildError::BuildFailed`] is returned after all directories were attempted.
pub async fn build_all_docs<P: AsRef<Path>>(
    config: &BuildConfig,
    docs_directories: &[P],
    runner: &dyn CommandRunner,
    client: &dyn CiClient,
) -> Result<BuildSummary, BuildError> {
    if config.build_command.trim().is_empty() {
        return Err(BuildError::MissingBuildCommand);
    }
    if docs_directories
        .iter()
        .all(|d| d.as_ref().as_os_str().is_empty())
    {
        return Err(BuildError::NoDocsDirectories);
    }
    let base_dir: PathBuf =
        env::current_dir().map_err(|e| BuildError::io("get current working directory", e))?;

    let mut summary = BuildSummary::default();
    for docs_dir in docs_directories {
        let docs_dir = docs_dir.as_ref();
        let group_name = format!("Building docs in {}", docs_dir.display());
        client.start_log_group(&group_name);
        let result = build_docs(config, runner, docs_dir, &base_dir).await;
        client.end_log_group(&group_name);
        let result = result?;

        summary.record(&result);
        client.write_file_annotations(&result.annotations)?;
    }

    log::info!("{summary}");
    if !summary.success {
        return Err(BuildError::BuildFailed {
            warnings: summary.warnings,
        });
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{BuildResult, BuildSummary, build_invocation};
    use crate::{BuildError, FileAnnotation};

    #[test]
    fn make_invocation() {
        let log_file = Path::new("/tmp/sphinx-log");
        let command = build_invocation("make html", log_file).unwrap();
        assert_eq!(command.argv(), vec!["make", "html", "-e"]);
        assert_eq!(command.envs.len(), 1);
        let (name, value) = &command.envs[0];
        assert_eq!(name, "SPHINXOPTS");
        assert_eq!(
            shlex::split(value).unwrap(),
            vec!["--keep-going", "--no-color", "-w", "/tmp/sphinx-log"]
        );
    }

    #[test]
    fn direct_invocation() {
        let log_file = Path::new("/tmp/sphinx-log");
        let command = build_invocation("sphinx-build -b html . _build", log_file).unwrap();
        assert!(command.envs.is_empty());
        assert_eq!(
            command.argv(),
            vec![
                "sphinx-build",
                "-b",
                "html",
                ".",
                "_build",
                "--keep-going",
                "--no-color",
                "-w",
                "/tmp/sphinx-log"
            ]
        );
    }

    #[test]
    fn invalid_invocation() {
        assert!(matches!(
            build_invocation("make 'html", Path::new("/tmp/sphinx-log")),
            Err(BuildError::InvalidCommand { .. })
        ));
    }

    #[test]
    fn summary() {
        let mut summary = BuildSummary::default();
        assert_eq!(summary.to_string(), "Build succeeded with 0 warnings");
        summary.record(&BuildResult {
            return_code: 0,
            annotations: vec![FileAnnotation::default(); 2],
        });
        assert!(summary.success);
        summary.record(&BuildResult {
            return_code: 2,
            annotations: vec![FileAnnotation::default()],
        });
        assert_eq!(
            summary,
            BuildSummary {
                success: false,
                warnings: 3
            }
        );
        assert_eq!(summary.to_string(), "Build failed with 3 warnings");
    }
}
