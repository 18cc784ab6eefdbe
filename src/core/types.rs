//! Core data types for timefs

use crate::core::error::TimefsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Wall-clock point attached to versions and files
pub type Timestamp = DateTime<Utc>;

/// Identifier of a version node, unique within its file
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(u32);

impl VersionId {
    /// The root version every file starts with
    pub const ROOT: VersionId = VersionId(0);

    pub fn new(id: u32) -> Self {
        VersionId(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The id assigned after this one
    pub fn next(self) -> Self {
        VersionId(self.0 + 1)
    }

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<u32> for VersionId {
    fn from(id: u32) -> Self {
        VersionId(id)
    }
}

impl FromStr for VersionId {
    type Err = TimefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(VersionId)
            .map_err(|_| TimefsError::invalid_version_id(s))
    }
}

/// Lifecycle state of a version node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionState {
    /// Open for in-place edits
    Draft,
    /// Frozen, named checkpoint
    Snapshot,
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionState::Draft => write!(f, "draft"),
            VersionState::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// One snapshot on the root-to-active path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: VersionId,
    pub timestamp: Timestamp,
    pub message: String,
}

/// Result of an insert or update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOutcome {
    /// Active version after the edit
    pub version: VersionId,
    /// Whether a new draft was forked from a snapshot
    pub forked: bool,
}

/// Entry of the recently-modified ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFile {
    pub name: String,
    pub modified: Timestamp,
}

/// Entry of the version-count ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSize {
    pub name: String,
    pub versions: usize,
}

/// Summary of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub active: VersionId,
    pub active_state: VersionState,
    pub versions: usize,
    pub depth: usize,
    pub last_modified: Timestamp,
}

/// Summary of one node in a version tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSummary {
    pub id: VersionId,
    pub parent: Option<VersionId>,
    pub children: Vec<VersionId>,
    pub state: VersionState,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub snapshot_at: Option<Timestamp>,
    pub active: bool,
}

/// How many entries a ranking query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankLimit {
    /// Every registered file
    #[default]
    All,
    /// At most this many files
    Top(NonZeroUsize),
}

impl RankLimit {
    /// `Top(n)` for positive `n`, `None` for zero
    pub fn top(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(RankLimit::Top)
    }

    /// Maximum number of entries given `available` candidates
    pub fn take(self, available: usize) -> usize {
        match self {
            RankLimit::All => available,
            RankLimit::Top(n) => n.get().min(available),
        }
    }
}

impl fmt::Display for RankLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankLimit::All => write!(f, "All"),
            RankLimit::Top(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for RankLimit {
    type Err = TimefsError;

    /// Accepts `all`, `-1` (the legacy "all" sentinel) or a positive count
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed == "-1" {
            return Ok(RankLimit::All);
        }
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(RankLimit::top)
            .ok_or_else(|| TimefsError::invalid_rank_limit(s))
    }
}

/// Transient (name, value) pair ranked by the analytics heaps
///
/// Equality and ordering look at `value` only, so two files with the same
/// metric compare equal regardless of name.
#[derive(Debug, Clone)]
pub struct FileMetric<V> {
    pub name: String,
    pub value: V,
}

impl<V> FileMetric<V> {
    pub fn new(name: impl Into<String>, value: V) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl<V: Ord> PartialEq for FileMetric<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V: Ord> Eq for FileMetric<V> {}

impl<V: Ord> PartialOrd for FileMetric<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V: Ord> Ord for FileMetric<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}
