//! Registry of versioned files
//!
//! [`FileSystem`] owns every [`File`] by name and keeps the ranking
//! analytics in step with them: each mutating call finishes by rebuilding
//! the analytics from the files, so rankings can never drift from file
//! state.

use crate::config::EngineConfig;
use crate::core::{
    clock::{Clock, SystemClock},
    error::{Result, TimefsError},
    types::{
        EditOutcome, FileInfo, HistoryEntry, RankLimit, RecentFile, TreeSize, VersionId,
        VersionSummary,
    },
};
use crate::storage::{analytics::Analytics, file::File, hash_table::HashTable};

/// In-memory time-travelling file system
pub struct FileSystem {
    files: HashTable<String, File>,
    analytics: Analytics,
    clock: Box<dyn Clock>,
    version_buckets: usize,
}

impl FileSystem {
    /// Create an empty file system with default settings and the system clock
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    /// Create an empty file system reading time from `clock`
    pub fn with_clock(config: &EngineConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            files: HashTable::with_buckets(config.registry_buckets),
            analytics: Analytics::new(),
            clock,
            version_buckets: config.version_buckets,
        }
    }

    /// Number of registered files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    /// Registered file names, sorted
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.iter().map(|(name, _)| name.clone()).collect();
        names.sort();
        names
    }

    fn file(&self, name: &str) -> Result<&File> {
        self.files
            .get(name)
            .map_err(|_| TimefsError::file_not_found(name))
    }

    fn file_mut(&mut self, name: &str) -> Result<&mut File> {
        self.files
            .get_mut(name)
            .map_err(|_| TimefsError::file_not_found(name))
    }

    fn rebuild_analytics(&mut self) {
        self.analytics.rebuild(self.files.values());
    }

    /// Register a new file holding only its root snapshot
    pub fn create(&mut self, name: &str) -> Result<()> {
        if self.files.contains_key(name) {
            return Err(TimefsError::file_already_exists(name));
        }
        let file = File::new(name, self.clock.now(), self.version_buckets);
        self.files.put(name.to_string(), file);
        self.rebuild_analytics();
        tracing::debug!(file = name, "created file");
        Ok(())
    }

    /// Content of the file's active version
    pub fn read(&self, name: &str) -> Result<&str> {
        Ok(self.file(name)?.read())
    }

    pub fn insert(&mut self, name: &str, text: &str) -> Result<EditOutcome> {
        let now = self.clock.now();
        let outcome = self.file_mut(name)?.insert(text, now);
        self.rebuild_analytics();
        Ok(outcome)
    }

    pub fn update(&mut self, name: &str, text: &str) -> Result<EditOutcome> {
        let now = self.clock.now();
        let outcome = self.file_mut(name)?.update(text, now);
        self.rebuild_analytics();
        Ok(outcome)
    }

    pub fn snapshot(&mut self, name: &str, message: &str) -> Result<VersionId> {
        let now = self.clock.now();
        let id = self.file_mut(name)?.snapshot(message, now)?;
        self.rebuild_analytics();
        Ok(id)
    }

    /// Move the file's active version to its parent, or to `target` by id
    pub fn rollback(&mut self, name: &str, target: Option<VersionId>) -> Result<VersionId> {
        let id = self.file_mut(name)?.rollback(target)?;
        self.rebuild_analytics();
        Ok(id)
    }

    /// Snapshots on the root-to-active path, oldest first
    pub fn history(&self, name: &str) -> Result<Vec<HistoryEntry>> {
        Ok(self.file(name)?.history())
    }

    pub fn info(&self, name: &str) -> Result<FileInfo> {
        Ok(self.file(name)?.info())
    }

    /// Every version of the file in id order
    pub fn versions(&self, name: &str) -> Result<Vec<VersionSummary>> {
        Ok(self.file(name)?.versions())
    }

    pub fn recent_files(&self, limit: RankLimit) -> Vec<RecentFile> {
        self.analytics.recent_files(limit)
    }

    pub fn biggest_trees(&self, limit: RankLimit) -> Vec<TreeSize> {
        self.analytics.biggest_trees(limit)
    }
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}
