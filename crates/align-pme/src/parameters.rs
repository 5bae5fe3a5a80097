//! Command-line argument composition for the manipulation tool.

use align_core::{AdjustError, Result};
use std::collections::HashMap;

/// Key in the per-invocation parameter map holding user-supplied extra
/// flags as one shell-tokenized string.
pub const CUSTOM_PME_PARAMETERS: &str = "CUSTOM_PME_PARAMETERS";

/// Tokenizes the user-supplied extra parameters, if any.
///
/// The string is split with shell-word semantics, so quoting and escaping
/// survive. Every token must start with a dash; a token that does not fails
/// the whole composition before any process is spawned.
pub fn extra_parameters(extra: &HashMap<String, String>) -> Result<Vec<String>> {
    let Some(raw) = extra.get(CUSTOM_PME_PARAMETERS) else {
        return Ok(Vec::new());
    };
    let params = shlex::split(raw)
        .ok_or_else(|| AdjustError::command(format!("Unable to tokenize parameters \"{raw}\".")))?;
    for param in &params {
        if !param.starts_with('-') {
            return Err(AdjustError::command(format!(
                "Parameters that do not start with dash \"-\" are not allowed. \
                 Found \"{param}\" in \"{params:?}\"."
            )));
        }
    }
    Ok(params)
}

/// Builds the full ordered argument list for one tool invocation.
///
/// Order is: configured base parameters, derived temporary parameters
/// (version increment suffix from `timestamp`, then repository group), then
/// tokenized extra parameters. The tool lets later parameters override
/// earlier ones of the same key, so precedence is extra > derived > base.
pub fn compose_arguments(
    base: &[String],
    timestamp: Option<&str>,
    repository_group: Option<&str>,
    extra: &HashMap<String, String>,
) -> Result<Vec<String>> {
    let mut args = base.to_vec();
    if let Some(timestamp) = timestamp {
        args.push(format!("-DversionIncrementalSuffix={timestamp}-redhat"));
    }
    if let Some(group) = repository_group {
        args.push(format!("-DrestRepositoryGroup={group}"));
    }
    args.extend(extra_parameters(extra)?);
    Ok(args)
}
