#![doc = include_str!("../README.md")]
pub mod client;
pub mod config;
pub mod error;
pub mod runner;

pub use config::{ActionInputs, BuildConfig};
pub use error::{BuildError, OutputVariableError};

mod docs_builder;
pub use docs_builder::{
    BuildResult, BuildSummary, DEFAULT_INSTALL_COMMAND, build_all_docs, build_docs,
    build_invocation, install_dependencies,
};
mod file_annotations;
pub use file_annotations::{AnnotationLevel, FileAnnotation};
mod log_parser;
pub use log_parser::{FileLocation, extract_line_information, parse_warnings_log};
mod output_variable;
pub use output_variable::OutputVariable;
