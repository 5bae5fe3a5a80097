//! End-to-end adjustment runs against fixture artifacts.

use align_core::{AdjustResult, ExecutionOutcome, ProcessExecutor, Result};
use align_pme::{CUSTOM_PME_PARAMETERS, PmeConfig, PmeProvider, version_from_result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

fn load_fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
}

/// Stands in for the real tool: reports a fixed exit status and optionally
/// drops the fixture artifacts into the work directory, the way the tool
/// writes them during a run.
struct FixtureExecutor {
    exit_code: i32,
    write_artifacts: bool,
    called: AtomicBool,
    seen_command: Mutex<Vec<String>>,
}

impl FixtureExecutor {
    fn new(exit_code: i32, write_artifacts: bool) -> Self {
        Self {
            exit_code,
            write_artifacts,
            called: AtomicBool::new(false),
            seen_command: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ProcessExecutor for FixtureExecutor {
    async fn execute(
        &self,
        work_dir: &Path,
        command: &[String],
        _forward_output: bool,
    ) -> Result<ExecutionOutcome> {
        self.called.store(true, Ordering::SeqCst);
        *self.seen_command.lock().unwrap() = command.to_vec();
        if self.write_artifacts {
            let target = work_dir.join("target");
            std::fs::create_dir_all(&target).unwrap();
            std::fs::write(
                target.join("pom-manip-ext-result.json"),
                load_fixture("result_versioning.json"),
            )
            .unwrap();
            std::fs::write(
                work_dir.join("removed.xml"),
                load_fixture("removed_central.xml"),
            )
            .unwrap();
        }
        Ok(ExecutionOutcome {
            exit_code: self.exit_code,
            success: self.exit_code == 0,
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

fn config(parameters: &[&str]) -> PmeConfig {
    PmeConfig {
        execution_name: "integration-build".to_string(),
        jar_path: "/opt/tools/manipulation.jar".to_string(),
        parameters: parameters.iter().map(ToString::to_string).collect(),
        output_to_logs: false,
        repository_group: None,
        timestamp: None,
    }
}

#[tokio::test]
async fn test_adjust_merges_result_and_removed_repositories() {
    let dir = tempfile::tempdir().unwrap();
    let provider = PmeProvider::new(
        config(&["-DrepoRemovalBackup=removed.xml"]),
        Arc::new(FixtureExecutor::new(0, true)),
    );

    let mut adjust_result = AdjustResult::default();
    let outcome = provider
        .adjust(dir.path(), &HashMap::new(), &mut adjust_result)
        .await
        .unwrap();

    assert!(outcome.passed());
    assert_eq!(
        adjust_result.result_data,
        json!({
            "VersioningState": {
                "executionRootModified": {
                    "groupId": "org.example",
                    "artifactId": "app",
                    "version": "1.0.0.redhat-1"
                }
            },
            "RemovedRepositories": [{
                "id": "central",
                "name": "Central",
                "url": "http://example/repo",
                "releases": true,
                "snapshots": false,
            }]
        })
    );
    assert_eq!(
        version_from_result(&adjust_result.result_data),
        Some("1.0.0.redhat-1".to_string())
    );
}

#[tokio::test]
async fn test_adjust_passes_extra_parameters_through() {
    let dir = tempfile::tempdir().unwrap();
    let executor = Arc::new(FixtureExecutor::new(0, false));
    let provider = PmeProvider::new(
        config(&["-DrepoRemovalBackup=removed.xml"]),
        executor.clone(),
    );

    let extra = HashMap::from([(
        CUSTOM_PME_PARAMETERS.to_string(),
        "-Dfoo=bar -Dbaz=qux".to_string(),
    )]);
    let mut adjust_result = AdjustResult::default();
    let outcome = provider
        .adjust(dir.path(), &extra, &mut adjust_result)
        .await
        .unwrap();

    assert!(outcome.passed());
    let seen = executor.seen_command.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            "java",
            "-jar",
            "/opt/tools/manipulation.jar",
            "-DrepoRemovalBackup=removed.xml",
            "-Dfoo=bar",
            "-Dbaz=qux",
        ]
    );
    // No artifacts written: the merge degrades to the empty defaults.
    assert_eq!(
        adjust_result.result_data,
        json!({"RemovedRepositories": []})
    );
    assert_eq!(version_from_result(&adjust_result.result_data), None);
}

#[tokio::test]
async fn test_adjust_rejects_dashless_extra_parameter_before_execution() {
    let dir = tempfile::tempdir().unwrap();
    let executor = Arc::new(FixtureExecutor::new(0, false));
    let provider = PmeProvider::new(config(&[]), executor.clone());

    let extra = HashMap::from([(CUSTOM_PME_PARAMETERS.to_string(), "bad".to_string())]);
    let mut adjust_result = AdjustResult::default();
    let err = provider
        .adjust(dir.path(), &extra, &mut adjust_result)
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), Some(10));
    assert!(!executor.called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_adjust_merges_artifacts_after_failed_run() {
    let dir = tempfile::tempdir().unwrap();
    let provider = PmeProvider::new(
        config(&["-DrepoRemovalBackup=removed.xml"]),
        Arc::new(FixtureExecutor::new(2, true)),
    );

    let mut adjust_result = AdjustResult::default();
    let outcome = provider
        .adjust(dir.path(), &HashMap::new(), &mut adjust_result)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code, 2);
    assert!(!outcome.passed());
    // Partial manipulation results stay inspectable after a failed run.
    assert_eq!(
        version_from_result(&adjust_result.result_data),
        Some("1.0.0.redhat-1".to_string())
    );
    assert_eq!(
        adjust_result.result_data["RemovedRepositories"][0]["id"],
        json!("central")
    );
}
