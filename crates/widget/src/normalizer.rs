//! Event normalization.
//!
//! The normalizer turns raw UI interactions into the closed outbound event
//! contract. Every method produces at most one payload; a mixed-kind choose
//! is the single case that synthesizes an ordered two-event emission, folder
//! kind first. Failures never escape: a lookup miss, an empty key set or an
//! unresolvable download link degrade to "no event" with a log line, and the
//! collection is left untouched unless the interaction semantically mutates
//! it.

use std::sync::Arc;

use protocol::{
    is_folder_key, EventKind, FileRecord, FolderRef, OutboundEvent, OutboundPayload,
};
use tracing::debug;

use crate::collection::FileCollection;
use crate::download::DownloadResolver;
use crate::host::DownloadDelegate;

/// Normalizes raw interactions into outbound events.
pub struct EventNormalizer {
    collection: FileCollection,
    ignore_file_select: bool,
    ignore_folder_select: bool,
    resolver: Option<DownloadResolver>,
    downloads: Arc<dyn DownloadDelegate>,
}

impl EventNormalizer {
    /// Create a normalizer over a collection.
    pub fn new(
        collection: FileCollection,
        ignore_file_select: bool,
        ignore_folder_select: bool,
        resolver: Option<DownloadResolver>,
        downloads: Arc<dyn DownloadDelegate>,
    ) -> Self {
        Self {
            collection,
            ignore_file_select,
            ignore_folder_select,
            resolver,
            downloads,
        }
    }

    /// The collection this normalizer reads and mutates.
    pub fn collection(&self) -> &FileCollection {
        &self.collection
    }

    /// Replace the collection with fresh host data.
    pub fn update_files(&mut self, files: Vec<FileRecord>) {
        self.collection.replace_files(files);
    }

    /// A single file was highlighted.
    ///
    /// Swallowed when the suppression flag is set; a key not present in the
    /// collection produces no event.
    pub fn select_file(&self, key: &str) -> Option<OutboundPayload> {
        if self.ignore_file_select {
            debug!(key, "file select suppressed by configuration");
            return None;
        }
        let record = self.collection.find(key)?.clone();
        Some(OutboundPayload::Event(OutboundEvent::single(
            EventKind::SelectFile,
            record,
        )))
    }

    /// A folder was highlighted or navigated into.
    ///
    /// The event fires once per interaction regardless of how many records
    /// live under the folder; an unknown folder produces no event.
    pub fn select_folder(&self, key: &str) -> Option<OutboundPayload> {
        if self.ignore_folder_select {
            debug!(key, "folder select suppressed by configuration");
            return None;
        }
        let folder = FolderRef::new(key);
        if !self.collection.folder_exists(&folder.path) {
            debug!(key, "folder select ignored: no such folder");
            return None;
        }
        Some(OutboundPayload::Event(OutboundEvent::single(
            EventKind::SelectFolder,
            folder,
        )))
    }

    /// A file was renamed.
    ///
    /// The emitted target carries the new path and the old record's name.
    /// The local collection keeps the old path; the host is expected to push
    /// a refreshed file list.
    pub fn rename_file(&self, old_key: &str, new_key: &str) -> Option<OutboundPayload> {
        let record = match self.collection.find(old_key) {
            Some(record) => record,
            None => {
                debug!(old_key, "rename ignored: no such file");
                return None;
            }
        };
        let target = FileRecord {
            path: new_key.to_string(),
            name: record.name.clone(),
            ..FileRecord::default()
        };
        Some(OutboundPayload::Event(OutboundEvent::single(
            EventKind::RenameFile,
            target,
        )))
    }

    /// A folder was renamed.
    ///
    /// Folder identity is resolved through the index; renaming a folder the
    /// collection knows nothing about produces no event.
    pub fn rename_folder(&self, old_key: &str, new_key: &str) -> Option<OutboundPayload> {
        self.folder_edit(old_key, new_key, EventKind::RenameFolder)
    }

    /// A file was moved. Same resolution rules as a rename.
    pub fn move_file(&self, old_key: &str, new_key: &str) -> Option<OutboundPayload> {
        let record = match self.collection.find(old_key) {
            Some(record) => record,
            None => {
                debug!(old_key, "move ignored: no such file");
                return None;
            }
        };
        let target = FileRecord {
            path: new_key.to_string(),
            name: record.name.clone(),
            ..FileRecord::default()
        };
        Some(OutboundPayload::Event(OutboundEvent::single(
            EventKind::MoveFile,
            target,
        )))
    }

    /// A folder was moved. Same resolution rules as a folder rename.
    pub fn move_folder(&self, old_key: &str, new_key: &str) -> Option<OutboundPayload> {
        self.folder_edit(old_key, new_key, EventKind::MoveFolder)
    }

    fn folder_edit(
        &self,
        old_key: &str,
        new_key: &str,
        kind: EventKind,
    ) -> Option<OutboundPayload> {
        let old = FolderRef::new(old_key);
        if !self.collection.folder_exists(&old.path) {
            debug!(old_key, ?kind, "folder edit ignored: no such folder");
            return None;
        }
        Some(OutboundPayload::Event(OutboundEvent::single(
            kind,
            FolderRef::new(new_key),
        )))
    }

    /// One or more entries were deleted.
    ///
    /// Emission and local mutation happen together: the event carries every
    /// matched record and exactly those records leave the collection in the
    /// same step. Keys matching no file record, folder keys included, leave
    /// the collection unchanged and emit nothing.
    pub fn delete(&mut self, keys: &[String]) -> Option<OutboundPayload> {
        let removed = self.collection.remove_paths(keys);
        if removed.is_empty() {
            debug!(?keys, "delete ignored: no matching records");
            return None;
        }
        Some(OutboundPayload::Event(OutboundEvent::many(
            EventKind::DeleteFile,
            removed,
        )))
    }

    /// A folder was created.
    ///
    /// No synthetic record is inserted locally; an empty folder has no
    /// representation until the host reports one.
    pub fn create_folder(&self, key: &str) -> Option<OutboundPayload> {
        Some(OutboundPayload::Event(OutboundEvent::single(
            EventKind::CreateFolder,
            FolderRef::new(key),
        )))
    }

    /// One or more entries were chosen.
    ///
    /// Keys partition by trailing separator. A mixed selection emits a
    /// two-event sequence with the folder event first; a single-kind
    /// selection emits one event; an empty selection emits nothing. File
    /// keys resolve to collection records where present and degrade to
    /// path-only records otherwise, so the emission shape depends only on
    /// the keys.
    pub fn choose(&self, keys: &[String]) -> Option<OutboundPayload> {
        let (folder_keys, file_keys): (Vec<&String>, Vec<&String>) =
            keys.iter().partition(|key| is_folder_key(key));

        let mut events = Vec::new();
        if !folder_keys.is_empty() {
            events.push(OutboundEvent::many(
                EventKind::ChooseFolder,
                folder_keys.into_iter().map(|key| FolderRef::new(key.as_str())),
            ));
        }
        if !file_keys.is_empty() {
            let records: Vec<FileRecord> = file_keys
                .into_iter()
                .map(|key| match self.collection.find(key) {
                    Some(record) => record.clone(),
                    None => FileRecord::new(key.as_str()),
                })
                .collect();
            events.push(OutboundEvent::many(EventKind::ChooseFile, records));
        }
        OutboundPayload::from_events(events)
    }

    /// One or more files were downloaded.
    ///
    /// Both sides fire independently: each matched record is handed to the
    /// download delegate as a resolved retrieval request, and a single
    /// DOWNLOAD event carrying all matches goes to the host. A missing
    /// origin or an unresolvable path skips that fetch without suppressing
    /// the event.
    pub fn download(&self, keys: &[String]) -> Option<OutboundPayload> {
        let matched = self.collection.filter_by_paths(keys);
        if matched.is_empty() {
            debug!(?keys, "download ignored: no matching records");
            return None;
        }

        match self.resolver.as_ref() {
            Some(resolver) => {
                for record in &matched {
                    match resolver.resolve(record) {
                        Ok(request) => self.downloads.fetch(request),
                        Err(err) => debug!(path = %record.path, %err, "skipping download fetch"),
                    }
                }
            }
            None => debug!("no download origin configured; skipping fetches"),
        }

        Some(OutboundPayload::Event(OutboundEvent::many(
            EventKind::Download,
            matched,
        )))
    }
}
