use sphinx_bot_feedback::{
    BuildError, BuildSummary,
    client::{CiClient, GithubClient},
};
use std::{env, io::Read, path::Path};
use tempfile::{NamedTempFile, tempdir};
mod common;
use common::{env_lock, logger_init};

#[derive(Debug, Default)]
struct TestParams {
    fail_summary: bool,
    absent: bool,
}

fn comment() -> String {
    BuildSummary {
        success: false,
        warnings: 2,
    }
    .to_string()
}

fn append_summary(test_params: TestParams) -> String {
    let _guard = env_lock();
    let tmp_dir = tempdir().unwrap();
    let mut step_summary_path = NamedTempFile::new_in(tmp_dir.path()).unwrap();
    if test_params.absent {
        unsafe {
            env::remove_var("GITHUB_STEP_SUMMARY");
        }
    } else {
        unsafe {
            env::set_var(
                "GITHUB_STEP_SUMMARY",
                if test_params.fail_summary {
                    Path::new("not-a-file.txt")
                } else {
                    step_summary_path.path()
                },
            );
        }
    }

    logger_init();
    log::set_max_level(log::LevelFilter::Debug);
    let client = GithubClient;

    let mut step_summary_content = String::new();
    match client.append_step_summary(&comment()) {
        Ok(_) => {
            step_summary_path
                .read_to_string(&mut step_summary_content)
                .unwrap();
        }
        Err(e) => {
            assert!(test_params.fail_summary || test_params.absent);
            if test_params.absent {
                assert!(matches!(e, BuildError::EnvVar { .. }));
            } else {
                assert!(matches!(e, BuildError::Io { .. }));
            }
        }
    }
    step_summary_content
}

#[test]
fn fail_gh_summary() {
    let summary = append_summary(TestParams {
        fail_summary: true,
        ..Default::default()
    });
    assert!(summary.is_empty());
}

#[test]
fn pass_gh_summary() {
    let summary = append_summary(TestParams::default());
    assert!(summary.contains("Build failed with 2 warnings"));
}

#[test]
fn absent_gh_summary() {
    let summary = append_summary(TestParams {
        absent: true,
        ..Default::default()
    });
    assert!(summary.is_empty());
}
