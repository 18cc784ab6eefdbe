//! Branching version tree with draft/snapshot states
//!
//! Nodes live in an arena owned by the tree. Parent and child links are
//! arena indices, and an id→index [`HashTable`] is the only lookup used for
//! jumping to a version by id. Dropping the tree drops every node at once.
//!
//! # State machine
//!
//! A node is a *draft* until it is snapshotted, after which its content and
//! message are frozen. Editing a snapshot forks a new draft child and moves
//! the active pointer onto it; editing a draft changes it in place, so the
//! edits between two checkpoints collapse into a single node.

use crate::core::{
    error::{Result, TimefsError},
    types::{EditOutcome, HistoryEntry, Timestamp, VersionId, VersionState, VersionSummary},
};
use crate::storage::hash_table::HashTable;

/// Message attached to the root snapshot of every tree
pub const INITIAL_MESSAGE: &str = "Initial version";

/// A single version of a file
#[derive(Debug, Clone)]
pub struct VersionNode {
    pub id: VersionId,
    pub content: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
    /// Set exactly when the node is a snapshot
    pub snapshot_at: Option<Timestamp>,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl VersionNode {
    fn new(id: VersionId, content: String, parent: Option<usize>, created_at: Timestamp) -> Self {
        Self {
            id,
            content,
            message: None,
            created_at,
            snapshot_at: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_snapshot(&self) -> bool {
        self.snapshot_at.is_some()
    }

    pub fn state(&self) -> VersionState {
        if self.is_snapshot() {
            VersionState::Snapshot
        } else {
            VersionState::Draft
        }
    }
}

/// How an edit combines with the active content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditMode {
    Append,
    Replace,
}

/// Arena-backed version tree with an active pointer
#[derive(Debug, Clone)]
pub struct VersionTree {
    nodes: Vec<VersionNode>,
    index: HashTable<VersionId, usize>,
    active: usize,
    next_id: VersionId,
}

impl VersionTree {
    /// Create a tree holding only the root snapshot
    pub fn new(now: Timestamp, index_buckets: usize) -> Self {
        let mut root = VersionNode::new(VersionId::ROOT, String::new(), None, now);
        root.message = Some(INITIAL_MESSAGE.to_string());
        root.snapshot_at = Some(now);

        let mut index = HashTable::with_buckets(index_buckets);
        index.put(VersionId::ROOT, 0);

        Self {
            nodes: vec![root],
            index,
            active: 0,
            next_id: VersionId::ROOT.next(),
        }
    }

    /// Currently active node
    pub fn active(&self) -> &VersionNode {
        &self.nodes[self.active]
    }

    pub fn active_id(&self) -> VersionId {
        self.active().id
    }

    pub fn root(&self) -> &VersionNode {
        &self.nodes[0]
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root exists from construction
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by id through the index
    pub fn node(&self, id: VersionId) -> Option<&VersionNode> {
        let slot = *self.index.get(&id).ok()?;
        Some(self.node_at(slot))
    }

    fn node_at(&self, slot: usize) -> &VersionNode {
        assert!(
            slot < self.nodes.len(),
            "version index points outside the arena: slot {} of {}",
            slot,
            self.nodes.len()
        );
        &self.nodes[slot]
    }

    pub fn parent_of(&self, id: VersionId) -> Option<&VersionNode> {
        let node = self.node(id)?;
        node.parent.map(|slot| self.node_at(slot))
    }

    /// Children of a node in branch-creation order
    pub fn children_of(&self, id: VersionId) -> Vec<VersionId> {
        self.node(id)
            .map(|node| node.children.iter().map(|&slot| self.node_at(slot).id).collect())
            .unwrap_or_default()
    }

    /// Number of nodes on the root-to-active path
    pub fn depth(&self) -> usize {
        self.ancestry(self.active).count()
    }

    /// Content of the active version
    pub fn read(&self) -> &str {
        &self.active().content
    }

    /// Append to the active content, forking if the active node is a snapshot
    pub fn insert(&mut self, text: &str, now: Timestamp) -> EditOutcome {
        self.edit(text, EditMode::Append, now)
    }

    /// Replace the active content, forking if the active node is a snapshot
    pub fn update(&mut self, text: &str, now: Timestamp) -> EditOutcome {
        self.edit(text, EditMode::Replace, now)
    }

    fn edit(&mut self, text: &str, mode: EditMode, now: Timestamp) -> EditOutcome {
        if self.active().is_snapshot() {
            let content = match mode {
                EditMode::Append => {
                    let mut content = self.active().content.clone();
                    content.push_str(text);
                    content
                }
                EditMode::Replace => text.to_string(),
            };
            let id = self.fork(content, now);
            return EditOutcome {
                version: id,
                forked: true,
            };
        }

        let active = &mut self.nodes[self.active];
        match mode {
            EditMode::Append => active.content.push_str(text),
            EditMode::Replace => text.clone_into(&mut active.content),
        }
        tracing::debug!(version = %active.id, ?mode, "edited draft in place");
        EditOutcome {
            version: active.id,
            forked: false,
        }
    }

    /// Create a draft child of the active node and make it active
    fn fork(&mut self, content: String, now: Timestamp) -> VersionId {
        let id = self.next_id;
        let parent = self.active;
        let slot = self.nodes.len();

        self.nodes
            .push(VersionNode::new(id, content, Some(parent), now));
        self.nodes[parent].children.push(slot);
        self.index.put(id, slot);
        self.active = slot;
        self.next_id = id.next();

        tracing::debug!(version = %id, parent = %self.nodes[parent].id, "forked draft from snapshot");
        id
    }

    /// Freeze the active draft as a named snapshot
    ///
    /// `name` is only used to label the error.
    pub fn snapshot(&mut self, name: &str, message: &str, now: Timestamp) -> Result<VersionId> {
        let active = &mut self.nodes[self.active];
        if active.is_snapshot() {
            tracing::warn!(file = name, version = %active.id, "rejected snapshot of a snapshot");
            return Err(TimefsError::already_snapshotted(name, active.id));
        }
        active.message = Some(message.to_string());
        active.snapshot_at = Some(now);
        tracing::debug!(file = name, version = %active.id, "created snapshot");
        Ok(active.id)
    }

    /// Move the active pointer
    ///
    /// With no id, moves to the parent of the active node. With an id, jumps
    /// to that node wherever it sits in the tree, including descendants and
    /// other branches.
    pub fn rollback(&mut self, name: &str, target: Option<VersionId>) -> Result<VersionId> {
        let current = self.active_id();
        let slot = match target {
            None => self.nodes[self.active]
                .parent
                .ok_or_else(|| TimefsError::no_parent(name, current))?,
            Some(id) if id == current => return Err(TimefsError::same_version(name, id)),
            Some(id) => *self
                .index
                .get(&id)
                .map_err(|_| TimefsError::version_not_found(name, id))?,
        };

        let id = self.node_at(slot).id;
        self.active = slot;
        tracing::debug!(file = name, from = %current, to = %id, "rolled back");
        Ok(id)
    }

    /// Snapshots on the root-to-active path, root first
    pub fn history(&self) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = self
            .ancestry(self.active)
            .filter_map(|node| {
                node.snapshot_at.map(|timestamp| HistoryEntry {
                    id: node.id,
                    timestamp,
                    message: node.message.clone().unwrap_or_default(),
                })
            })
            .collect();
        entries.reverse();
        entries
    }

    /// Every node in id order
    pub fn summaries(&self) -> Vec<VersionSummary> {
        self.nodes
            .iter()
            .map(|node| VersionSummary {
                id: node.id,
                parent: node.parent.map(|slot| self.node_at(slot).id),
                children: node
                    .children
                    .iter()
                    .map(|&slot| self.node_at(slot).id)
                    .collect(),
                state: node.state(),
                message: node.message.clone(),
                created_at: node.created_at,
                snapshot_at: node.snapshot_at,
                active: node.id == self.active_id(),
            })
            .collect()
    }

    /// Walk from `slot` up to the root
    fn ancestry(&self, slot: usize) -> Ancestry<'_> {
        Ancestry {
            tree: self,
            next: Some(slot),
        }
    }
}

struct Ancestry<'a> {
    tree: &'a VersionTree,
    next: Option<usize>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a VersionNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node_at(self.next?);
        self.next = node.parent;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{Clock, ManualClock};

    fn tree(clock: &ManualClock) -> VersionTree {
        VersionTree::new(clock.now(), 16)
    }

    #[test]
    fn test_root_is_initial_snapshot() {
        let clock = ManualClock::default();
        let tree = tree(&clock);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.active_id(), VersionId::ROOT);
        assert_eq!(tree.read(), "");
        assert!(tree.root().is_snapshot());
        assert_eq!(tree.root().message.as_deref(), Some(INITIAL_MESSAGE));
        assert!(tree.parent_of(VersionId::ROOT).is_none());
    }

    #[test]
    fn test_edits_coalesce_into_one_draft() {
        let clock = ManualClock::default();
        let mut tree = tree(&clock);

        let first = tree.insert("a", clock.now());
        assert!(first.forked);
        assert_eq!(first.version, VersionId::new(1));

        let second = tree.insert("b", clock.now());
        let third = tree.update("xyz", clock.now());
        assert!(!second.forked && !third.forked);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.read(), "xyz");
    }

    #[test]
    fn test_snapshot_freezes_content() {
        let clock = ManualClock::default();
        let mut tree = tree(&clock);

        tree.insert("hello", clock.now());
        let snap = tree.snapshot("f", "v1", clock.now()).unwrap();
        let edit = tree.insert(" world", clock.now());

        assert!(edit.forked);
        assert_eq!(tree.node(snap).unwrap().content, "hello");
        assert_eq!(tree.read(), "hello world");
        assert_eq!(tree.children_of(snap), vec![edit.version]);
    }

    #[test]
    fn test_snapshot_of_snapshot_rejected() {
        let clock = ManualClock::default();
        let mut tree = tree(&clock);

        let err = tree.snapshot("f", "again", clock.now()).unwrap_err();
        assert!(matches!(err, TimefsError::AlreadySnapshotted { id, .. } if id == VersionId::ROOT));
        assert_eq!(tree.root().message.as_deref(), Some(INITIAL_MESSAGE));
    }

    #[test]
    fn test_rollback_to_parent_and_root() {
        let clock = ManualClock::default();
        let mut tree = tree(&clock);

        assert!(matches!(
            tree.rollback("f", None),
            Err(TimefsError::NoParent { .. })
        ));

        tree.insert("x", clock.now());
        assert_eq!(tree.rollback("f", None).unwrap(), VersionId::ROOT);
        assert_eq!(tree.read(), "");
    }

    #[test]
    fn test_rollback_by_id_errors() {
        let clock = ManualClock::default();
        let mut tree = tree(&clock);

        assert!(matches!(
            tree.rollback("f", Some(VersionId::ROOT)),
            Err(TimefsError::SameVersion { .. })
        ));
        assert!(matches!(
            tree.rollback("f", Some(VersionId::new(5))),
            Err(TimefsError::VersionNotFound { .. })
        ));
    }

    #[test]
    fn test_sibling_branches_and_jump() {
        let clock = ManualClock::default();
        let mut tree = tree(&clock);

        // Two drafts forked from the root.
        let left = tree.update("left", clock.now()).version;
        tree.rollback("f", None).unwrap();
        let right = tree.update("right", clock.now()).version;

        assert_eq!(tree.children_of(VersionId::ROOT), vec![left, right]);

        tree.rollback("f", Some(left)).unwrap();
        assert_eq!(tree.read(), "left");
        tree.rollback("f", Some(right)).unwrap();
        assert_eq!(tree.read(), "right");
    }

    #[test]
    fn test_history_skips_drafts_and_other_branches() {
        let clock = ManualClock::default();
        let mut tree = tree(&clock);

        tree.insert("a", clock.now());
        let v1 = tree.snapshot("f", "one", clock.now()).unwrap();
        tree.insert("b", clock.now());
        let v2 = tree.snapshot("f", "two", clock.now()).unwrap();

        // Branch off v1 into a draft.
        tree.rollback("f", Some(v1)).unwrap();
        tree.insert("c", clock.now());

        let ids: Vec<VersionId> = tree.history().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![VersionId::ROOT, v1]);
        assert!(!ids.contains(&v2));
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_summaries_mark_active() {
        let clock = ManualClock::default();
        let mut tree = tree(&clock);
        tree.insert("a", clock.now());

        let summaries = tree.summaries();
        assert_eq!(summaries.len(), 2);
        assert!(!summaries[0].active);
        assert!(summaries[1].active);
        assert_eq!(summaries[1].parent, Some(VersionId::ROOT));
        assert_eq!(summaries[1].state, VersionState::Draft);
    }
}
