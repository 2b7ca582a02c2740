use std::fmt::Display;

/// A structure to describe the output of a file annotation.
///
/// Sphinx only reports single-point diagnostics,
/// so [`Self::start_line`] and [`Self::end_line`] are always equal
/// when produced by [`parse_warnings_log()`](crate::parse_warnings_log).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileAnnotation {
    /// The severity level of the annotation.
    pub severity: AnnotationLevel,

    /// The path to the file being annotated.
    ///
    /// This is relative to the working directory of the process
    /// that parsed the warnings log.
    pub path: String,

    /// The line number where the annotation starts (1-based).
    ///
    /// A value of `1` is used for diagnostics that concern the whole file.
    pub start_line: usize,

    /// The line number where the annotation ends (1-based).
    pub end_line: usize,

    /// The message of the annotation, which will be shown in the CI platform's UI.
    ///
    /// This may span multiple lines; it is up to the [`CiClient`](crate::client::CiClient)
    /// to escape line breaks for its output format.
    pub message: String,
}

/// The severity of a [`FileAnnotation`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Debug,
    #[default]
    Notice,
    Warning,
    Error,
}

impl AnnotationLevel {
    /// The lowercase name used by workflow commands (eg. `::warning ...`).
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationLevel::Debug => "debug",
            AnnotationLevel::Notice => "notice",
            AnnotationLevel::Warning => "warning",
            AnnotationLevel::Error => "error",
        }
    }
}

impl Display for AnnotationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
