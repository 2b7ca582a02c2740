use crate::{AnnotationLevel, BuildError, FileAnnotation, OutputVariable, client::CiClient};

/// A [`CiClient`] that only writes feedback to the [`log`].
///
/// Used when not running on a supported CI platform (eg. on a developer's machine).
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClient;

impl CiClient for LocalClient {
    fn start_log_group(&self, name: &str) {
        let separator = "=".repeat(name.len());
        log::info!(target: "CI_LOG_GROUPING", "{separator}\n{name}\n{separator}");
    }

    fn end_log_group(&self, _name: &str) {}

    fn write_file_annotations(&self, annotations: &[FileAnnotation]) -> Result<(), BuildError> {
        for annotation in annotations {
            let level = match annotation.severity {
                AnnotationLevel::Debug => log::Level::Debug,
                AnnotationLevel::Notice => log::Level::Info,
                AnnotationLevel::Warning => log::Level::Warn,
                AnnotationLevel::Error => log::Level::Error,
            };
            log::log!(
                level,
                "{}:{}: {}",
                annotation.path,
                annotation.start_line,
                annotation.message
            );
        }
        Ok(())
    }

    fn write_output_variables(&self, vars: &[OutputVariable]) -> Result<(), BuildError> {
        for out_var in vars {
            out_var.validate()?;
            log::info!("output: {out_var}");
        }
        Ok(())
    }
}
