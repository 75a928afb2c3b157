//! Path-keyed file collection with copy-on-write replacement.
//!
//! The collection exclusively owns its backing entry vector. Every mutation
//! computes a fresh vector from the old one and swaps it in wholesale, so a
//! snapshot taken before a write never observes a partially-updated
//! collection. No entry is ever mutated in place.
//!
//! Folder-prefix filtering is a plain string prefix test over canonical
//! slash-delimited paths; no `.`/`..` resolution is performed. Folder
//! existence, by contrast, goes through the segment index.

use std::collections::HashSet;
use std::sync::Arc;

use protocol::records::{Entry, FileRecord, FolderRef};
use tracing::warn;

use super::index::PathIndex;

/// Ordered, path-keyed collection of file and folder entries.
#[derive(Debug, Default)]
pub struct FileCollection {
    entries: Arc<Vec<Entry>>,
    index: PathIndex,
}

impl FileCollection {
    /// Create a collection from host-supplied file records.
    pub fn new(files: Vec<FileRecord>) -> Self {
        Self::from_entries(files.into_iter().map(Entry::from).collect())
    }

    /// Create a collection from mixed entries.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let mut collection = Self::default();
        collection.replace(entries);
        collection
    }

    /// Replace the whole collection.
    ///
    /// Enforces the uniqueness invariant on ingest: a duplicate path keeps
    /// the first entry and drops the rest.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut deduped = Vec::with_capacity(entries.len());
        for entry in entries {
            if seen.insert(entry.path().to_string()) {
                deduped.push(entry);
            } else {
                warn!(path = entry.path(), "dropping duplicate collection entry");
            }
        }
        self.index = PathIndex::build(&deduped);
        self.entries = Arc::new(deduped);
    }

    /// Replace the collection with host-supplied file records.
    pub fn replace_files(&mut self, files: Vec<FileRecord>) {
        self.replace(files.into_iter().map(Entry::from).collect());
    }

    /// Look up a file record by its exact path.
    pub fn find(&self, path: &str) -> Option<&FileRecord> {
        self.entries
            .iter()
            .filter_map(Entry::as_file)
            .find(|record| record.path == path)
    }

    /// The file records whose paths appear in `keys`, in collection order.
    pub fn filter_by_paths(&self, keys: &[String]) -> Vec<FileRecord> {
        self.entries
            .iter()
            .filter_map(Entry::as_file)
            .filter(|record| keys.iter().any(|key| *key == record.path))
            .cloned()
            .collect()
    }

    /// The file records strictly inside a folder, in collection order.
    pub fn filter_by_folder_prefix(&self, folder_path: &str) -> Vec<FileRecord> {
        let folder = FolderRef::new(folder_path);
        self.entries
            .iter()
            .filter_map(Entry::as_file)
            .filter(|record| folder.contains(&record.path))
            .cloned()
            .collect()
    }

    /// Remove every file record whose path appears in `keys`.
    ///
    /// Computes the retained set from the current one and replaces the
    /// collection wholesale. The removal set is exactly the returned
    /// records, so callers emitting them mutate and notify in one step.
    /// Keys matching nothing, folder entries included, leave the collection
    /// untouched.
    pub fn remove_paths(&mut self, keys: &[String]) -> Vec<FileRecord> {
        let removed = self.filter_by_paths(keys);
        if removed.is_empty() {
            return removed;
        }
        let retained: Vec<Entry> = self
            .entries
            .iter()
            .filter(|entry| !removed.iter().any(|record| record.path == entry.path()))
            .cloned()
            .collect();
        self.replace(retained);
        removed
    }

    /// Whether a folder with this path exists, explicitly or derived.
    pub fn folder_exists(&self, path: &str) -> bool {
        self.index.folder_exists(path)
    }

    /// A cheap snapshot of the current entries.
    ///
    /// The snapshot stays valid across later mutations because writes swap
    /// the backing vector instead of editing it.
    pub fn snapshot(&self) -> Arc<Vec<Entry>> {
        Arc::clone(&self.entries)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(paths: &[&str]) -> FileCollection {
        FileCollection::new(paths.iter().map(|p| FileRecord::new(*p)).collect())
    }

    #[test]
    fn test_find_by_exact_path() {
        let collection = collection(&["a/b.txt", "a/c.txt"]);
        assert_eq!(collection.find("a/b.txt").unwrap().path, "a/b.txt");
        assert!(collection.find("a/missing.txt").is_none());
    }

    #[test]
    fn test_filter_by_paths_preserves_collection_order() {
        let collection = collection(&["a.txt", "b.txt", "c.txt"]);
        let keys = vec!["c.txt".to_string(), "a.txt".to_string()];
        let matched = collection.filter_by_paths(&keys);
        let paths: Vec<&str> = matched.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn test_filter_by_folder_prefix_excludes_the_folder_itself() {
        let collection = collection(&["a/x.txt", "a/b/y.txt", "z.txt"]);
        let matched = collection.filter_by_folder_prefix("a/");
        let paths: Vec<&str> = matched.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["a/x.txt", "a/b/y.txt"]);
    }

    #[test]
    fn test_remove_paths_replaces_wholesale() {
        let mut collection = collection(&["a.txt", "b.txt"]);
        let before = collection.snapshot();

        let removed = collection.remove_paths(&["a.txt".to_string()]);
        assert_eq!(removed.len(), 1);
        assert_eq!(collection.len(), 1);
        // The pre-write snapshot is untouched.
        assert_eq!(before.len(), 2);
    }

    #[test]
    fn test_remove_absent_key_is_a_no_op() {
        let mut collection = collection(&["a.txt"]);
        let before = collection.snapshot();

        let removed = collection.remove_paths(&["missing.txt".to_string()]);
        assert!(removed.is_empty());
        assert!(Arc::ptr_eq(&before, &collection.snapshot()));
    }

    #[test]
    fn test_duplicate_paths_keep_first_record() {
        let collection = FileCollection::new(vec![
            FileRecord::new("a.txt").with_size(1),
            FileRecord::new("a.txt").with_size(2),
        ]);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.find("a.txt").unwrap().size, Some(1));
    }

    #[test]
    fn test_uniqueness_holds_after_mutation_sequences() {
        let mut collection = collection(&["a.txt", "b.txt", "c.txt"]);
        collection.remove_paths(&["b.txt".to_string()]);
        collection.replace_files(vec![
            FileRecord::new("a.txt"),
            FileRecord::new("c.txt"),
            FileRecord::new("a.txt"),
        ]);

        let snapshot = collection.snapshot();
        let mut paths: Vec<&str> = snapshot.iter().map(|e| e.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), snapshot.len());
    }

    #[test]
    fn test_folder_existence_is_derived_from_members() {
        let collection = collection(&["a/x.txt", "a/b/y.txt"]);
        assert!(collection.folder_exists("a/"));
        assert!(collection.folder_exists("a/b/"));
        assert!(!collection.folder_exists("missing/"));
    }

    #[test]
    fn test_remove_paths_never_touches_folder_entries() {
        let mut collection = FileCollection::from_entries(vec![
            Entry::Folder(FolderRef::new("reports/")),
            Entry::File(FileRecord::new("notes.txt")),
        ]);
        let before = collection.snapshot();

        // A folder-only key set matches no file records, so nothing is
        // removed and nothing is emitted by callers.
        let removed = collection.remove_paths(&["reports/".to_string()]);
        assert!(removed.is_empty());
        assert!(Arc::ptr_eq(&before, &collection.snapshot()));
        assert!(collection.folder_exists("reports/"));

        // A mixed key set removes the matching file but leaves the folder
        // entry in place.
        let removed =
            collection.remove_paths(&["reports/".to_string(), "notes.txt".to_string()]);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].path, "notes.txt");
        assert!(collection.folder_exists("reports/"));
        assert_eq!(collection.len(), 1);
    }
}
