//! Path-segment index over a collection.
//!
//! The index is a small trie keyed by path segment, rebuilt whenever the
//! collection is replaced. It makes folder existence a property of the data
//! model: a folder exists when an explicit folder entry terminates at its
//! node, or when any entry lives beneath it.

use std::collections::BTreeMap;

use protocol::records::{Entry, SEPARATOR};

#[derive(Debug, Default)]
struct IndexNode {
    children: BTreeMap<String, IndexNode>,
    /// A file record terminates at this node.
    file: bool,
    /// An explicit folder entry terminates at this node.
    folder: bool,
}

/// Segment trie over the paths of a collection.
#[derive(Debug, Default)]
pub struct PathIndex {
    root: IndexNode,
}

impl PathIndex {
    /// Build the index for a set of entries.
    pub fn build(entries: &[Entry]) -> Self {
        let mut index = Self::default();
        for entry in entries {
            let node = index.insert_path(entry.path());
            match entry {
                Entry::File(_) => node.file = true,
                Entry::Folder(_) => node.folder = true,
            }
        }
        index
    }

    fn insert_path(&mut self, path: &str) -> &mut IndexNode {
        let mut node = &mut self.root;
        for segment in segments(path) {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node
    }

    fn node(&self, path: &str) -> Option<&IndexNode> {
        let mut node = &self.root;
        for segment in segments(path) {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    /// Whether a folder with this path exists.
    ///
    /// True when an explicit folder entry terminates here or when any entry
    /// lives beneath this node. A file sharing the same segments does not
    /// make a folder.
    pub fn folder_exists(&self, path: &str) -> bool {
        match self.node(path) {
            Some(node) => node.folder || !node.children.is_empty(),
            None => false,
        }
    }

    /// Whether a file record terminates at this exact path.
    pub fn file_exists(&self, path: &str) -> bool {
        self.node(path).is_some_and(|node| node.file)
    }

    /// Whether a folder exists but has no members.
    ///
    /// Only representable through an explicit folder entry; derived folders
    /// always have at least one member.
    pub fn folder_is_empty(&self, path: &str) -> bool {
        self.node(path)
            .is_some_and(|node| node.folder && node.children.is_empty())
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|segment| !segment.is_empty())
}
