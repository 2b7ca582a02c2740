use std::process::ExitCode;

use sphinx_bot_feedback::{
    ActionInputs, BuildError, BuildSummary, OutputVariable, build_all_docs,
    client::{CiClient, init_client},
    runner::{CommandRunner, CommandSpec, ProcessRunner},
};

struct Logger;
impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.target() == "CI_LOG_GROUPING" {
            println!("{}", record.args());
        } else {
            println!(
                "[{:>5}]{}: {}",
                record.level().as_str(),
                record.module_path().unwrap_or_default(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn logger_init() {
    let _ = log::set_logger(&Logger);
    let debug = std::env::var("ACTIONS_STEP_DEBUG").is_ok_and(|val| val == "true");
    log::set_max_level(if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
}

/// Report the final outcome through the CI platform's step summary and output variables.
fn report_summary(client: &dyn CiClient, summary: &BuildSummary) -> Result<(), BuildError> {
    if std::env::var("CI").is_ok_and(|val| val == "true") {
        client.append_step_summary(&summary.to_string())?;
    }
    client.write_output_variables(&[
        OutputVariable {
            name: "warnings".to_string(),
            value: summary.warnings.to_string(),
        },
        OutputVariable {
            name: "success".to_string(),
            value: summary.success.to_string(),
        },
    ])
}

async fn run() -> Result<(), BuildError> {
    log::info!("Starting sphinx-bot-feedback build.");
    let inputs = ActionInputs::from_env();
    let runner = ProcessRunner;

    if let Some(pre_build) = &inputs.pre_build_command {
        log::info!("Running: {pre_build}");
        match runner.run(&CommandSpec::shell(pre_build), None).await {
            Ok(0) => {}
            Ok(status) => log::warn!("Pre-build command exited with {status}"),
            Err(e) => log::warn!("{e}"),
        }
    }

    let client = init_client();
    let config = inputs.build_config();
    let result = build_all_docs(
        &config,
        &inputs.docs_directories(),
        &runner,
        client.as_ref(),
    )
    .await;
    let summary = match result {
        Ok(summary) => summary,
        Err(BuildError::BuildFailed { warnings }) => BuildSummary {
            success: false,
            warnings,
        },
        Err(e) => return Err(e),
    };
    if let Err(e) = report_summary(client.as_ref(), &summary) {
        log::warn!("Failed to report build summary: {e}");
    }
    if !summary.success {
        return Err(BuildError::BuildFailed {
            warnings: summary.warnings,
        });
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    logger_init();
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
