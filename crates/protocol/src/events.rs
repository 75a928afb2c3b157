//! Outbound event contract.
//!
//! Every user-triggered action reaches the host as an [`OutboundEvent`] with
//! a kind from a closed enumeration and one or more target entries. A single
//! interaction may synthesize an ordered multi-event emission (folder-kind
//! before file-kind), which is why the host-facing payload is either one
//! event or a sequence.

use serde::{Deserialize, Serialize};

use crate::records::Entry;

/// The closed set of event kinds understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// A single file was highlighted.
    SelectFile,
    /// A folder was highlighted or navigated into.
    SelectFolder,
    /// One or more files were downloaded.
    Download,
    /// One or more files were deleted.
    DeleteFile,
    /// A folder was deleted.
    DeleteFolder,
    /// A folder was renamed.
    RenameFolder,
    /// A file was renamed.
    RenameFile,
    /// A file was created.
    CreateFile,
    /// A folder was created.
    CreateFolder,
    /// A file was moved.
    MoveFile,
    /// A folder was moved.
    MoveFolder,
    /// One or more files were chosen.
    ChooseFile,
    /// One or more folders were chosen.
    ChooseFolder,
}

/// The target of an event: one entry or an ordered sequence of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTarget {
    /// A single file or folder.
    One(Entry),
    /// An ordered sequence of files or folders.
    Many(Vec<Entry>),
}

impl EventTarget {
    /// The targeted entries as a slice, regardless of arity.
    pub fn entries(&self) -> &[Entry] {
        match self {
            EventTarget::One(entry) => std::slice::from_ref(entry),
            EventTarget::Many(entries) => entries,
        }
    }
}

/// A normalized event record delivered to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEvent {
    /// What happened.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// What it happened to.
    pub target: EventTarget,
}

impl OutboundEvent {
    /// An event targeting a single entry.
    pub fn single(kind: EventKind, entry: impl Into<Entry>) -> Self {
        Self {
            kind,
            target: EventTarget::One(entry.into()),
        }
    }

    /// An event targeting an ordered sequence of entries.
    pub fn many<I, E>(kind: EventKind, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        Self {
            kind,
            target: EventTarget::Many(entries.into_iter().map(Into::into).collect()),
        }
    }
}

/// One emission toward the host: a single event or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutboundPayload {
    /// Exactly one event.
    Event(OutboundEvent),
    /// An ordered sequence of events from one interaction.
    Sequence(Vec<OutboundEvent>),
}

impl OutboundPayload {
    /// Build a payload from an event list.
    ///
    /// An empty list yields `None`, a one-element list collapses to
    /// [`OutboundPayload::Event`].
    pub fn from_events(mut events: Vec<OutboundEvent>) -> Option<Self> {
        match events.len() {
            0 => None,
            1 => Some(OutboundPayload::Event(events.remove(0))),
            _ => Some(OutboundPayload::Sequence(events)),
        }
    }

    /// The contained events in delivery order.
    pub fn events(&self) -> &[OutboundEvent] {
        match self {
            OutboundPayload::Event(event) => std::slice::from_ref(event),
            OutboundPayload::Sequence(events) => events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{FileRecord, FolderRef};

    #[test]
    fn test_event_kind_wire_names() {
        assert_eq!(
            serde_json::to_value(EventKind::SelectFile).unwrap(),
            "SELECT_FILE"
        );
        assert_eq!(
            serde_json::to_value(EventKind::ChooseFolder).unwrap(),
            "CHOOSE_FOLDER"
        );
        assert_eq!(
            serde_json::to_value(EventKind::RenameFile).unwrap(),
            "RENAME_FILE"
        );
    }

    #[test]
    fn test_single_event_wire_shape() {
        let event = OutboundEvent::single(EventKind::SelectFile, FileRecord::new("a/b.txt"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "SELECT_FILE", "target": { "path": "a/b.txt" } })
        );
    }

    #[test]
    fn test_many_event_wire_shape() {
        let event = OutboundEvent::many(
            EventKind::Download,
            vec![FileRecord::new("a.txt"), FileRecord::new("b.txt")],
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["target"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_payload_from_empty_list() {
        assert_eq!(OutboundPayload::from_events(Vec::new()), None);
    }

    #[test]
    fn test_payload_collapses_single_event() {
        let event = OutboundEvent::single(EventKind::CreateFolder, FolderRef::new("new/"));
        let payload = OutboundPayload::from_events(vec![event.clone()]).unwrap();
        assert_eq!(payload, OutboundPayload::Event(event));
    }

    #[test]
    fn test_payload_preserves_sequence_order() {
        let folder = OutboundEvent::single(EventKind::ChooseFolder, FolderRef::new("a/"));
        let file = OutboundEvent::single(EventKind::ChooseFile, FileRecord::new("b.txt"));
        let payload = OutboundPayload::from_events(vec![folder.clone(), file.clone()]).unwrap();
        assert_eq!(payload.events(), &[folder, file]);
    }

    #[test]
    fn test_payload_sequence_serializes_as_array() {
        let payload = OutboundPayload::Sequence(vec![
            OutboundEvent::single(EventKind::ChooseFolder, FolderRef::new("a/")),
            OutboundEvent::single(EventKind::ChooseFile, FileRecord::new("b.txt")),
        ]);
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["type"], "CHOOSE_FOLDER");
        assert_eq!(json[1]["type"], "CHOOSE_FILE");
    }
}
