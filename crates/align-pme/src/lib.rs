//! POM-manipulation adjust provider.
//!
//! The external manipulation tool rewrites the build descriptors of a
//! checked-out Maven source tree (version suffixes, dependency alignment,
//! repository removal). This crate composes the tool's command line from
//! layered parameter sources, delegates execution to a process provider,
//! and afterwards recovers the tool's structured effects: the JSON result
//! artifact and the backed-up repository declarations it removed.

pub mod parameters;
pub mod provider;
pub mod repositories;
pub mod result;

pub use parameters::{CUSTOM_PME_PARAMETERS, compose_arguments, extra_parameters};
pub use provider::{PmeConfig, PmeProvider};
pub use repositories::{RemovedRepository, backup_file_argument, removed_repositories};
pub use result::{RESULT_FILE, read_result_data, version_from_result};
