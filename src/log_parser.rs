//! Parsing of the warnings log written by `sphinx-build -w <file>`.
//!
//! Sphinx writes warnings that look like this:
//!
//! ```text
//! /.../index.rst:19: WARNING: Error in "code-block" directive:
//! maximum 1 argument(s) allowed, 2 supplied.
//! /.../contents.rst: WARNING: document isn't included in any toctree
//! ```
//!
//! The parser is best-effort. Lines that do not fit the expected shape are
//! skipped instead of being reported as errors.
use std::path::{Component, Path, PathBuf};

use crate::{AnnotationLevel, FileAnnotation};

/// The token that marks a line as a potential warning.
const WARNING_TOKEN: &str = "WARNING";

/// The delimiter between a warning's location and its message.
const WARNING_DELIMITER: &str = "WARNING:";

/// A location within a file, as referenced by a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    /// The path, relative to the base directory given to [`extract_line_information()`].
    pub path: String,

    /// The 1-based line number.
    ///
    /// This is `1` if the warning concerns the whole file.
    pub line: usize,
}

/// Parses the location prefix of a warning line (everything before `WARNING:`).
///
/// Accepted shapes are `path:`, `path:line:` and `path:line:<anything>`.
/// A Windows drive letter (eg. `D:\docs\index.rst:22:`) is rejoined with the rest of the path.
///
/// Returns [`None`] if the prefix is not a location.
pub fn extract_line_information(prefix: &str, base_dir: &Path) -> Option<FileLocation> {
    let mut components = prefix.split(':').map(str::to_string).collect::<Vec<_>>();

    // A single letter means we split a drive letter from its path, ie `D:\`.
    if components.len() > 1 && components[0].chars().count() == 1 {
        let drive = components.remove(0);
        components[0] = format!("{drive}:{}", components[0]);
    }

    if components[0].is_empty() {
        return None;
    }

    let line = match components.len() {
        // no line number given; annotate the whole file
        2 => 1,
        3 => match components[1].trim().parse::<usize>() {
            Ok(line) if line > 0 => line,
            _ => return None,
        },
        _ => return None,
    };

    Some(FileLocation {
        path: relative_path(&components[0], base_dir),
        line,
    })
}

/// Parses the lines of a Sphinx warnings log into a list of [`FileAnnotation`]s.
///
/// Each warning line may be followed by one continuation line (any line without `WARNING`),
/// which is appended to the warning's message.
/// Lines that are not recognized as warnings are skipped.
///
/// Paths are made relative to `base_dir`, which should be the current working directory.
pub fn parse_warnings_log<S: AsRef<str>>(lines: &[S], base_dir: &Path) -> Vec<FileAnnotation> {
    let mut annotations = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let line: &str = line.as_ref();
        if !line.contains(WARNING_TOKEN) {
            continue;
        }

        // ambiguous lines (more than one delimiter) are discarded
        let Some((prefix, message)) = line.split_once(WARNING_DELIMITER) else {
            continue;
        };
        if message.contains(WARNING_DELIMITER) {
            continue;
        }

        let Some(location) = extract_line_information(prefix, base_dir) else {
            continue;
        };

        let mut message = message.to_string();
        if let Some(next) = lines.get(i + 1).map(AsRef::<str>::as_ref)
            && !next.contains(WARNING_TOKEN)
        {
            message.push('\n');
            message.push_str(next);
        }

        annotations.push(FileAnnotation {
            severity: AnnotationLevel::Warning,
            path: location.path,
            start_line: location.line,
            end_line: location.line,
            message: message.trim().to_string(),
        });
    }
    annotations
}

/// Lexically normalize a path (resolve `.` and `..` without touching the file system).
///
/// A `..` directly under the root is dropped, so `/../a` becomes `/a`.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            _ => normalized.push(component),
        }
    }
    normalized
}

/// Express `path` relative to `base_dir`.
///
/// Relative paths are assumed to be relative to `base_dir` already.
pub(crate) fn relative_path(path: &str, base_dir: &Path) -> String {
    let target = normalize(&base_dir.join(path));
    let base = normalize(base_dir);
    match pathdiff::diff_paths(&target, &base) {
        Some(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Some(relative) => relative.to_string_lossy().to_string(),
        None => target.to_string_lossy().to_string(),
    }
}
