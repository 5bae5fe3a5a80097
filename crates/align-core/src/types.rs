//! Caller-owned record for one adjustment invocation.

use serde::Serialize;
use serde_json::Value;

/// Result record owned by the caller and augmented in place by an
/// adjustment run. Lives for exactly one invocation.
#[derive(Debug, Default, Serialize)]
pub struct AdjustResult {
    /// Merged output of the external tool: the parsed result artifact plus
    /// the recovered `RemovedRepositories` list.
    #[serde(rename = "resultData")]
    pub result_data: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_with_result_data_key() {
        let result = AdjustResult {
            result_data: json!({"VersioningState": {}}),
        };
        let rendered = serde_json::to_value(&result).unwrap();
        assert_eq!(rendered["resultData"]["VersioningState"], json!({}));
    }

    #[test]
    fn test_default_is_null() {
        let result = AdjustResult::default();
        assert!(result.result_data.is_null());
    }
}
