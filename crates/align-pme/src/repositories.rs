//! Recovery of repository declarations removed by the manipulation tool.
//!
//! The tool backs up every `<repository>` declaration it deletes into a
//! side file named by a `-DrepoRemovalBackup` argument. This module finds
//! that argument on the composed command line and parses the backup with a
//! quick-xml SAX reader.

use align_core::{AdjustError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Matches: -DrepoRemovalBackup=<path> or -DrepoRemovalBackup <path>
static RE_BACKUP_ARG: OnceLock<Regex> = OnceLock::new();

fn re_backup_arg() -> &'static Regex {
    RE_BACKUP_ARG.get_or_init(|| Regex::new(r"^-DrepoRemovalBackup[ =](.+)$").unwrap())
}

/// Repository declaration recovered from the tool's removal backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedRepository {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "enabled_default")]
    pub releases: bool,
    #[serde(default = "enabled_default")]
    pub snapshots: bool,
}

fn enabled_default() -> bool {
    true
}

impl Default for RemovedRepository {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            url: String::new(),
            releases: true,
            snapshots: true,
        }
    }
}

/// Finds the removal-backup file path in a composed argument list.
///
/// Only the first matching argument is honored; scanning stops there, so a
/// command carrying several backup flags silently uses the first.
pub fn backup_file_argument(args: &[String]) -> Option<&str> {
    args.iter()
        .find_map(|arg| re_backup_arg().captures(arg))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Extracts the repositories the tool removed during the given invocation.
///
/// The backup file is named by an argument on the composed command line.
/// No such argument, or a backup the tool never wrote, yields an empty
/// list; an unreadable or malformed backup is an error.
pub async fn removed_repositories(
    work_dir: &Path,
    args: &[String],
) -> Result<Vec<RemovedRepository>> {
    let Some(relative) = backup_file_argument(args) else {
        return Ok(Vec::new());
    };
    let path = work_dir.join(relative);

    if let Ok(mut entries) = tokio::fs::read_dir(work_dir).await {
        let mut names = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        debug!("Files and folders in the work directory: {names:?}");
    }

    if !path.exists() {
        info!(
            "File {} does not exist. It seems no repositories were removed by the tool.",
            path.display()
        );
        return Ok(Vec::new());
    }

    let content = tokio::fs::read_to_string(&path).await?;
    parse_backup(&content)
}

/// Parses a removal-backup document into its repository records.
///
/// Per `<repository>` element: `releases` and `snapshots` default to true
/// and follow the text of an `<enabled>` child nested under the matching
/// wrapper element; `id`, `name` and `url` take the first text found in a
/// direct child of that name.
pub fn parse_backup(content: &str) -> Result<Vec<RemovedRepository>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut repositories = Vec::new();
    let mut current: Option<RemovedRepository> = None;
    // Element names enclosing the cursor, relative to the repository element.
    let mut stack: Vec<String> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| AdjustError::Xml {
            message: e.to_string(),
        })?;

        match event {
            Event::Start(ref e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if current.is_some() {
                    stack.push(tag);
                } else if tag == "repository" {
                    current = Some(RemovedRepository::default());
                    stack.clear();
                }
            }
            Event::Empty(ref e) => {
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if current.is_none() && tag == "repository" {
                    repositories.push(RemovedRepository::default());
                }
            }
            Event::Text(ref e) => {
                let Some(repo) = current.as_mut() else {
                    continue;
                };
                let text = match e.decode() {
                    Ok(cow) => {
                        let s = cow.trim().to_string();
                        // Unescape XML entities
                        quick_xml::escape::unescape(&s)
                            .map(|c| c.into_owned())
                            .unwrap_or(s)
                    }
                    Err(_) => String::from_utf8_lossy(e.as_ref()).trim().to_string(),
                };

                match stack.as_slice() {
                    [field] => match field.as_str() {
                        "id" if repo.id.is_empty() => repo.id = text,
                        "name" if repo.name.is_empty() => repo.name = text,
                        "url" if repo.url.is_empty() => repo.url = text,
                        _ => {}
                    },
                    [.., parent, leaf] if leaf == "enabled" => match parent.as_str() {
                        "releases" => repo.releases = text == "true",
                        "snapshots" => repo.snapshots = text == "true",
                        _ => {}
                    },
                    _ => {}
                }
            }
            Event::End(_) => {
                if current.is_some() && stack.pop().is_none() {
                    // Closing the repository element itself.
                    if let Some(repo) = current.take() {
                        repositories.push(repo);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(repositories)
}
