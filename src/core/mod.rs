//! Core types and utilities for timefs
//!
//! This module contains the fundamental data types, error handling,
//! key hashing and time sources used throughout the system.

pub mod clock;
pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, TimefsError};
pub use hash::{fnv1a_64, hash_string, TableKey};
pub use types::{
    EditOutcome, FileInfo, FileMetric, HistoryEntry, RankLimit, RecentFile, Timestamp, TreeSize,
    VersionId, VersionState, VersionSummary,
};
