//! timefs - An in-memory time-travelling file system
//!
//! Every file carries a branching tree of versions. Snapshots are immutable
//! checkpoints; edits made after a snapshot fork a new draft, and edits made
//! to a draft overwrite it in place. Any version can be made active again by
//! rolling back, and the file system ranks files by recency and history size.
//!
//! # Core Features
//!
//! - **Version trees**: per-file arena of versions with parent/child links
//! - **Draft coalescing**: repeated edits between snapshots collapse into one version
//! - **Rollback**: to the parent or to any version by id
//! - **Rankings**: most recently modified files and largest version trees
//!
//! # Example Usage
//!
//! ```rust
//! use timefs::{FileSystem, RankLimit};
//!
//! let mut fs = FileSystem::new();
//! fs.create("notes")?;
//! fs.insert("notes", "hello")?;
//! fs.snapshot("notes", "first draft")?;
//! fs.insert("notes", " world")?;
//!
//! assert_eq!(fs.read("notes")?, "hello world");
//! assert_eq!(fs.history("notes")?.len(), 2);
//!
//! fs.rollback("notes", None)?;
//! assert_eq!(fs.read("notes")?, "hello");
//!
//! let top = fs.biggest_trees(RankLimit::All);
//! assert_eq!(top[0].name, "notes");
//! # Ok::<(), timefs::TimefsError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod storage;

// Re-export commonly used types
pub use core::{
    clock::{Clock, ManualClock, SystemClock},
    error::{Result, TimefsError},
    types::{
        EditOutcome, FileInfo, HistoryEntry, RankLimit, RecentFile, Timestamp, TreeSize,
        VersionId, VersionState, VersionSummary,
    },
};

pub use storage::{FileSystem, HashTable, MaxHeap, VersionTree};

/// Current version of timefs
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
