//! A named file and its version history

use crate::core::{
    error::Result,
    types::{EditOutcome, FileInfo, HistoryEntry, Timestamp, VersionId, VersionSummary},
};
use crate::storage::version_tree::VersionTree;

/// A versioned file: its name, version tree and modification time
#[derive(Debug, Clone)]
pub struct File {
    name: String,
    tree: VersionTree,
    last_modified: Timestamp,
}

impl File {
    /// Create a file whose only version is the root snapshot
    pub fn new(name: impl Into<String>, now: Timestamp, index_buckets: usize) -> Self {
        Self {
            name: name.into(),
            tree: VersionTree::new(now, index_buckets),
            last_modified: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tree(&self) -> &VersionTree {
        &self.tree
    }

    pub fn last_modified(&self) -> Timestamp {
        self.last_modified
    }

    /// Number of versions ever created for this file
    pub fn version_count(&self) -> usize {
        self.tree.len()
    }

    pub fn active_id(&self) -> VersionId {
        self.tree.active_id()
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn read(&self) -> &str {
        self.tree.read()
    }

    pub fn insert(&mut self, text: &str, now: Timestamp) -> EditOutcome {
        let outcome = self.tree.insert(text, now);
        self.last_modified = now;
        outcome
    }

    pub fn update(&mut self, text: &str, now: Timestamp) -> EditOutcome {
        let outcome = self.tree.update(text, now);
        self.last_modified = now;
        outcome
    }

    /// Snapshot the active draft; a successful snapshot counts as a modification
    pub fn snapshot(&mut self, message: &str, now: Timestamp) -> Result<VersionId> {
        let id = self.tree.snapshot(&self.name, message, now)?;
        self.last_modified = now;
        Ok(id)
    }

    /// Move the active version; leaves the modification time alone
    pub fn rollback(&mut self, target: Option<VersionId>) -> Result<VersionId> {
        self.tree.rollback(&self.name, target)
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.tree.history()
    }

    pub fn versions(&self) -> Vec<VersionSummary> {
        self.tree.summaries()
    }

    pub fn info(&self) -> FileInfo {
        FileInfo {
            name: self.name.clone(),
            active: self.tree.active_id(),
            active_state: self.tree.active().state(),
            versions: self.version_count(),
            depth: self.depth(),
            last_modified: self.last_modified,
        }
    }
}
