//! Adjust orchestration for the manipulation tool.

use crate::parameters::compose_arguments;
use crate::repositories::removed_repositories;
use crate::result::read_result_data;
use align_core::{AdjustError, AdjustResult, ExecutionOutcome, ProcessExecutor, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Configuration of one manipulation tool installation.
///
/// Constructed once (usually from the YAML configuration) and shared by
/// every adjustment the provider runs.
#[derive(Debug, Clone, Deserialize)]
pub struct PmeConfig {
    /// Label used to attribute log output to this execution.
    pub execution_name: String,

    /// Path to the tool's executable jar.
    pub jar_path: String,

    /// Base parameters passed on every invocation.
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Forward the tool's captured output into the log.
    #[serde(default)]
    pub output_to_logs: bool,

    /// Repository group the tool should resolve against, if any.
    #[serde(default)]
    pub repository_group: Option<String>,

    /// Timestamp the version increment suffix is derived from, if any.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Invokes the manipulation tool against a work directory and collects its
/// structured effects into the caller's [`AdjustResult`].
pub struct PmeProvider {
    config: PmeConfig,
    executor: Arc<dyn ProcessExecutor>,
}

impl PmeProvider {
    pub fn new(config: PmeConfig, executor: Arc<dyn ProcessExecutor>) -> Self {
        Self { config, executor }
    }

    /// Runs one adjustment against `work_dir`.
    ///
    /// Argument validation failures abort before any process is spawned.
    /// Once the tool has run, the result artifacts are read and merged into
    /// `adjust_result` whether the run passed or failed, so partial
    /// manipulation results remain inspectable afterwards.
    pub async fn adjust(
        &self,
        work_dir: &Path,
        extra_parameters: &HashMap<String, String>,
        adjust_result: &mut AdjustResult,
    ) -> Result<ExecutionOutcome> {
        let args = compose_arguments(
            &self.config.parameters,
            self.config.timestamp.as_deref(),
            self.config.repository_group.as_deref(),
            extra_parameters,
        )?;

        let mut command = vec![
            "java".to_string(),
            "-jar".to_string(),
            self.config.jar_path.clone(),
        ];
        command.extend(args.iter().cloned());
        info!(
            execution = %self.config.execution_name,
            "Executing the manipulation tool. Command is {command:?}."
        );

        let outcome = self
            .executor
            .execute(work_dir, &command, self.config.output_to_logs)
            .await?;

        adjust_result.result_data = self.collect_result_data(work_dir, &args).await?;
        Ok(outcome)
    }

    /// Re-reads the result artifacts from `work_dir` and merges them.
    ///
    /// The recovered repository list (possibly empty) lands under the
    /// `RemovedRepositories` key. A backup file that vanished between the
    /// argument scan and the read is tolerated with an error log and the
    /// key is simply omitted.
    async fn collect_result_data(&self, work_dir: &Path, args: &[String]) -> Result<Value> {
        let mut result_data = read_result_data(work_dir).await?;

        match removed_repositories(work_dir, args).await {
            Ok(repositories) => {
                if let Some(object) = result_data.as_object_mut() {
                    object.insert(
                        "RemovedRepositories".to_string(),
                        serde_json::to_value(repositories)?,
                    );
                } else {
                    error!("Result data is not a mapping, cannot record removed repositories");
                }
            }
            Err(AdjustError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                error!("File for removed repositories could not be found");
                error!("{e}");
            }
            Err(e) => return Err(e),
        }

        Ok(result_data)
    }
}
