//! A module to abstract the execution of external commands.
use std::{fmt::Display, path::Path};

use async_trait::async_trait;
use tokio::process::Command;

use crate::BuildError;

/// A command to execute, already split into a program and its arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// The executable to run.
    pub program: String,

    /// The arguments passed to [`Self::program`].
    pub args: Vec<String>,

    /// Environment variables set (or overridden) for the child process.
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    /// Split a command string using POSIX shell rules.
    ///
    /// Fails if the string has unbalanced quotes or contains no words.
    pub fn parse(command: &str) -> Result<Self, BuildError> {
        let mut words = shlex::split(command)
            .ok_or_else(|| BuildError::invalid_command(command))?
            .into_iter();
        let program = words
            .next()
            .ok_or_else(|| BuildError::invalid_command(command))?;
        Ok(Self {
            program,
            args: words.collect(),
            envs: vec![],
        })
    }

    /// Run the given command line through the platform's shell.
    pub fn shell(command: &str) -> Self {
        let (program, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };
        Self {
            program: program.to_string(),
            args: vec![flag.to_string(), command.to_string()],
            envs: vec![],
        }
    }

    /// The program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![self.program.clone()];
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, value) in &self.envs {
            let quoted = shlex::try_quote(value).unwrap_or_else(|_| value.as_str().into());
            write!(f, "{key}={quoted} ")?;
        }
        let argv = self.argv();
        let joined = shlex::try_join(argv.iter().map(String::as_str))
            .unwrap_or_else(|_| argv.join(" "));
        f.write_str(&joined)
    }
}

/// A trait to run external commands.
///
/// The real implementation is [`ProcessRunner`].
/// Tests may provide an implementation that simulates a docs build.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the `command` to completion and return its exit code.
    ///
    /// The child process inherits stdout and stderr.
    /// If `cwd` is given, the child process runs in that directory.
    async fn run(&self, command: &CommandSpec, cwd: Option<&Path>) -> Result<i32, BuildError>;
}

/// A [`CommandRunner`] that spawns child processes.
///
/// There is no timeout; a hung command blocks until it exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandSpec, cwd: Option<&Path>) -> Result<i32, BuildError> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).envs(command.envs.iter().cloned());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }
        let status = cmd
            .status()
            .await
            .map_err(|e| BuildError::io(&format!("run `{}`", command.program), e))?;
        // a process terminated by a signal has no exit code
        Ok(status.code().unwrap_or(-1))
    }
}
