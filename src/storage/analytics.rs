//! Ranking indices derived from file metadata

use crate::core::types::{FileMetric, RankLimit, RecentFile, Timestamp, TreeSize};
use crate::storage::{file::File, max_heap::MaxHeap};

/// Heaps ranking files by modification time and by version count
///
/// These are a cache over the registry. They are rebuilt wholesale from the
/// files after every mutation and never patched incrementally; queries
/// drain a clone so the heaps themselves stay intact.
#[derive(Debug, Clone, Default)]
pub struct Analytics {
    recent: MaxHeap<FileMetric<Timestamp>>,
    biggest: MaxHeap<FileMetric<usize>>,
}

impl Analytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard both heaps and rebuild them from `files`
    pub fn rebuild<'a>(&mut self, files: impl Iterator<Item = &'a File>) {
        let (lower, _) = files.size_hint();
        let mut recent = MaxHeap::with_capacity(lower);
        let mut biggest = MaxHeap::with_capacity(lower);

        for file in files {
            recent.insert(FileMetric::new(file.name(), file.last_modified()));
            biggest.insert(FileMetric::new(file.name(), file.version_count()));
        }

        tracing::trace!(files = recent.len(), "rebuilt analytics");
        self.recent = recent;
        self.biggest = biggest;
    }

    /// Number of files currently ranked
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Most recently modified files, newest first
    pub fn recent_files(&self, limit: RankLimit) -> Vec<RecentFile> {
        let take = limit.take(self.recent.len());
        self.recent
            .clone()
            .drain_top(take)
            .into_iter()
            .map(|metric| RecentFile {
                name: metric.name,
                modified: metric.value,
            })
            .collect()
    }

    /// Files with the most versions, largest first
    pub fn biggest_trees(&self, limit: RankLimit) -> Vec<TreeSize> {
        let take = limit.take(self.biggest.len());
        self.biggest
            .clone()
            .drain_top(take)
            .into_iter()
            .map(|metric| TreeSize {
                name: metric.name,
                versions: metric.value,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{Clock, ManualClock};

    #[test]
    fn test_rebuild_and_query() {
        let clock = ManualClock::default();
        let mut old = File::new("old", clock.now(), 4);
        let mut new = File::new("new", clock.now(), 4);
        old.insert("a", clock.now());
        old.snapshot("s", clock.now()).unwrap();
        old.insert("b", clock.now());
        new.insert("c", clock.now());

        let mut analytics = Analytics::new();
        analytics.rebuild([&old, &new].into_iter());

        let recent = analytics.recent_files(RankLimit::All);
        assert_eq!(recent[0].name, "new");
        assert_eq!(recent[1].name, "old");

        let biggest = analytics.biggest_trees(RankLimit::top(1).unwrap());
        assert_eq!(biggest.len(), 1);
        assert_eq!(biggest[0].name, "old");
        assert_eq!(biggest[0].versions, 3);

        // Queries leave the heaps intact.
        assert_eq!(analytics.len(), 2);
        assert_eq!(analytics.recent_files(RankLimit::All).len(), 2);
    }

    #[test]
    fn test_rebuild_replaces_previous_state() {
        let clock = ManualClock::default();
        let a = File::new("a", clock.now(), 4);
        let b = File::new("b", clock.now(), 4);

        let mut analytics = Analytics::new();
        analytics.rebuild([&a, &b].into_iter());
        analytics.rebuild([&a].into_iter());

        assert_eq!(analytics.len(), 1);
        assert_eq!(analytics.biggest_trees(RankLimit::All)[0].name, "a");
    }
}
