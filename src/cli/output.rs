//! Text and JSON rendering of command results

use crate::core::{
    error::TimefsError,
    types::{FileInfo, HistoryEntry, RankLimit, RecentFile, Timestamp, TreeSize, VersionState, VersionSummary},
};
use chrono::Local;
use colored::Colorize;
use serde_json::json;

/// Render a timestamp in local time, e.g. `Tue Mar  5 14:02:11 2024`
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.with_timezone(&Local)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

/// Output settings for a session
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    pub color: bool,
    pub json: bool,
    /// Suppress success confirmations (results and errors still print)
    pub quiet: bool,
}

impl Renderer {
    pub fn plain() -> Self {
        Self::default()
    }

    fn ok(&self, text: String) -> Option<String> {
        if self.quiet {
            None
        } else if self.color {
            Some(text.green().to_string())
        } else {
            Some(text)
        }
    }

    fn header(&self, text: String) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text
        }
    }

    /// Success confirmation for a mutating command
    pub fn confirmation(&self, command: &str, name: &str, message: String) -> Option<String> {
        if self.json {
            return Some(json!({ "command": command, "ok": true, "file": name }).to_string());
        }
        self.ok(message)
    }

    pub fn created(&self, name: &str) -> Option<String> {
        self.confirmation("create", name, format!("File '{}' created.", name))
    }

    pub fn inserted(&self, name: &str) -> Option<String> {
        self.confirmation("insert", name, format!("Content inserted into '{}'.", name))
    }

    pub fn updated(&self, name: &str) -> Option<String> {
        self.confirmation("update", name, format!("Content updated in '{}'.", name))
    }

    pub fn snapshotted(&self, name: &str) -> Option<String> {
        self.confirmation("snapshot", name, format!("Snapshot created for '{}'.", name))
    }

    pub fn rolled_back(&self, name: &str) -> Option<String> {
        self.confirmation("rollback", name, format!("Rollback successful for '{}'.", name))
    }

    pub fn content(&self, name: &str, content: &str) -> String {
        if self.json {
            return json!({ "command": "read", "file": name, "content": content }).to_string();
        }
        content.to_string()
    }

    pub fn history(&self, name: &str, entries: &[HistoryEntry]) -> String {
        if self.json {
            return json!({ "command": "history", "file": name, "entries": entries }).to_string();
        }
        entries
            .iter()
            .map(|entry| {
                format!(
                    "Version: {}, Timestamp: {}, Message: {}",
                    entry.id,
                    format_timestamp(entry.timestamp),
                    entry.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn recent_files(&self, limit: RankLimit, files: &[RecentFile]) -> String {
        if self.json {
            return json!({ "command": "recent_files", "files": files }).to_string();
        }
        let mut lines = vec![self.header(format!(
            "--- Top {} Recently Modified Files ---",
            limit
        ))];
        lines.extend(
            files
                .iter()
                .map(|f| format!("{} (Modified: {})", f.name, format_timestamp(f.modified))),
        );
        lines.join("\n")
    }

    pub fn biggest_trees(&self, limit: RankLimit, trees: &[TreeSize]) -> String {
        if self.json {
            return json!({ "command": "biggest_trees", "files": trees }).to_string();
        }
        let mut lines = vec![self.header(format!(
            "--- Top {} Files by Version Count ---",
            limit
        ))];
        lines.extend(
            trees
                .iter()
                .map(|t| format!("{} ({} versions)", t.name, t.versions)),
        );
        lines.join("\n")
    }

    pub fn info(&self, info: &FileInfo) -> String {
        if self.json {
            return json!({ "command": "info", "file": info }).to_string();
        }
        [
            self.header(format!("File: {}", info.name)),
            format!("  Active version: {} ({})", info.active, info.active_state),
            format!("  Versions: {}", info.versions),
            format!("  Depth: {}", info.depth),
            format!("  Last modified: {}", format_timestamp(info.last_modified)),
        ]
        .join("\n")
    }

    /// One line per version, indented by depth, children in branch order
    pub fn tree(&self, name: &str, versions: &[VersionSummary]) -> String {
        if self.json {
            return json!({ "command": "tree", "file": name, "versions": versions }).to_string();
        }
        let mut lines = Vec::with_capacity(versions.len());
        let mut stack = vec![(0usize, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            let Some(node) = versions.get(index) else {
                continue;
            };
            let marker = if node.active { "*" } else { " " };
            let label = match (&node.state, &node.message) {
                (VersionState::Snapshot, Some(message)) => format!("snapshot \"{}\"", message),
                (state, _) => state.to_string(),
            };
            lines.push(format!("{}{} {} {}", "  ".repeat(depth), marker, node.id, label));
            for child in node.children.iter().rev() {
                stack.push((child.get() as usize, depth + 1));
            }
        }
        lines.join("\n")
    }

    pub fn warning(&self, message: &str) -> String {
        if self.json {
            return json!({ "warning": message }).to_string();
        }
        let line = format!("Error: {}", message);
        if self.color {
            line.yellow().to_string()
        } else {
            line
        }
    }

    pub fn error(&self, error: &TimefsError) -> String {
        if self.json {
            return json!({ "ok": false, "error": error.to_string() }).to_string();
        }
        let line = format!("Error: {}", error_message(error));
        if self.color {
            line.red().to_string()
        } else {
            line
        }
    }
}

/// Shell wording for an error
pub fn error_message(error: &TimefsError) -> String {
    match error {
        TimefsError::FileNotFound { .. } => "File not found.".to_string(),
        TimefsError::FileAlreadyExists { name } => format!("File '{}' already exists.", name),
        TimefsError::AlreadySnapshotted { .. } => "A snapshot already exists for the current version. \
             Modify the file to create a new version before snapshotting."
            .to_string(),
        TimefsError::SameVersion { .. } => {
            "Cannot rollback to the version that is already active.".to_string()
        },
        TimefsError::NoParent { .. } | TimefsError::VersionNotFound { .. } => {
            "Rollback failed. Invalid version or already at root.".to_string()
        },
        TimefsError::InvalidVersionId { .. } => "Invalid version ID for ROLLBACK.".to_string(),
        other => other.to_string(),
    }
}
