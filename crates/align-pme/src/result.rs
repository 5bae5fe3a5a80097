//! Result artifact reading and version extraction.

use align_core::Result;
use serde_json::Value;
use std::path::Path;
use tracing::{error, info};

/// Location of the manipulation tool's result artifact, relative to the
/// work directory.
pub const RESULT_FILE: &str = "target/pom-manip-ext-result.json";

/// Reads and parses the result artifact from `work_dir`.
///
/// A run that produced no artifact yields an empty mapping. An artifact
/// that exists but fails to parse is an error: a corrupt result from the
/// tool points at a deeper problem than a run that wrote none.
pub async fn read_result_data(work_dir: &Path) -> Result<Value> {
    let path = work_dir.join(RESULT_FILE);
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::from("{}"),
        Err(e) => return Err(e.into()),
    };
    info!("Got result data \"{raw}\".");
    Ok(serde_json::from_str(&raw)?)
}

/// Extracts the rewritten root version from a merged result mapping.
///
/// Expected shape:
///
/// ```json
/// {
///   "VersioningState": {
///     "executionRootModified": {
///       "groupId": "<group-id>",
///       "artifactId": "<artifact-id>",
///       "version": "<rewritten version>"
///     }
///   }
/// }
/// ```
///
/// Total over any input: a missing segment or a wrong-shaped value is
/// logged at error level and yields `None`, never a failure.
pub fn version_from_result(result: &Value) -> Option<String> {
    match result.pointer("/VersioningState/executionRootModified/version") {
        Some(Value::String(version)) => Some(version.clone()),
        _ => {
            error!("Couldn't extract the rewritten version from the result data");
            None
        }
    }
}
