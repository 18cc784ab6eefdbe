//! In-memory storage engine for timefs
//!
//! This module holds the containers (chained hash table, max-heap), the
//! per-file version tree and the registry that ties them together.

pub mod analytics;
pub mod file;
pub mod filesystem;
pub mod hash_table;
pub mod max_heap;
pub mod version_tree;

// Re-export commonly used items
pub use analytics::Analytics;
pub use file::File;
pub use filesystem::FileSystem;
pub use hash_table::HashTable;
pub use max_heap::MaxHeap;
pub use version_tree::{VersionNode, VersionTree, INITIAL_MESSAGE};
