//! Cross-frame message protocol.
//!
//! The externally hosted file-browsing service posts plain data objects onto
//! the embedding page's message channel. Each message carries an `event` tag
//! from a fixed set and an optional `data.file` payload of partial file
//! attributes. Missing optional fields stay absent rather than being
//! defaulted, so a consumer can tell "not reported" from zero.
//!
//! Unrecognized tags and malformed shapes are parse errors the transport is
//! expected to swallow: new message kinds from the remote service degrade to
//! no-ops, never failures.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::records::FileRecord;

/// Recognized event tags posted by the remote file-browsing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameEventTag {
    /// A file was selected.
    #[serde(rename = "filebrowser_file_selected")]
    FileSelected,
    /// A directory was selected.
    #[serde(rename = "filebrowser_dir_selected")]
    DirSelected,
    /// A file was double-selected (chosen).
    #[serde(rename = "filebrowser_file_double_selected")]
    FileDoubleSelected,
    /// The browsed path changed.
    #[serde(rename = "filebrowser_path_changed")]
    PathChanged,
    /// A file was chosen.
    #[serde(rename = "filebrowser_file_choose")]
    FileChoose,
    /// A folder was chosen.
    #[serde(rename = "filebrowser_folder_choose")]
    FolderChoose,
}

/// Partial file attributes reported by the remote service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FramePayload {
    /// Path of the subject entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<f64>,
    /// Last-modified timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<f64>,
    /// Last-access timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_time: Option<f64>,
}

/// The `data` envelope of a frame message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameData {
    /// The file payload, when the event concerns an entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FramePayload>,
}

/// One inbound message from the remote file-browsing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMessage {
    /// Recognized event tag.
    pub event: FrameEventTag,
    /// Optional payload envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<FrameData>,
}

impl FrameMessage {
    /// Parse a raw channel value.
    ///
    /// Messages with an unknown `event` tag or a shape that does not match
    /// the protocol fail to parse; callers treat that as "not for us".
    pub fn parse(value: &serde_json::Value) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Extract the subject entry as a partial [`FileRecord`].
    ///
    /// Returns `None` when the payload is absent or carries no path; every
    /// other field is passed through as reported, absent fields staying
    /// absent.
    pub fn file_record(&self) -> Option<FileRecord> {
        let payload = self.data.as_ref()?.file.as_ref()?;
        let path = payload.path.clone()?;
        Some(FileRecord {
            path,
            name: payload.name.clone(),
            size: payload.size,
            create_time: payload.create_time,
            update_time: payload.update_time,
            access_time: payload.access_time,
        })
    }
}
