//! File and folder records.
//!
//! A [`FileRecord`] describes a single file by its slash-delimited path; the
//! path is the sole identity key within a collection. A [`FolderRef`] is a
//! derived folder identity whose path always ends in the separator. [`Entry`]
//! is the tagged union of the two, so folder existence is explicit in the data
//! model instead of being inferred from string prefixes at every call site.

use serde::{Deserialize, Deserializer, Serialize};

/// Path separator used by every key in the contract.
pub const SEPARATOR: char = '/';

/// Returns true when a key denotes a folder (trailing separator).
#[inline]
pub fn is_folder_key(key: &str) -> bool {
    key.ends_with(SEPARATOR)
}

/// A path-identified description of a single file.
///
/// Every attribute besides `path` is optional and is omitted from the wire
/// form when absent, so a consumer can distinguish "not reported" from an
/// actual zero. Timestamps are seconds since the Unix epoch; hosts commonly
/// supply fractional stat times, hence `f64`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FileRecord {
    /// Slash-delimited path, unique within a collection.
    pub path: String,
    /// Display name. Derivable from the path when absent.
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

impl FileRecord {
    /// Create a record carrying only a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// The name to display: the explicit name when present, otherwise the
    /// final path segment.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) => name,
            None => self
                .path
                .rsplit(SEPARATOR)
                .next()
                .unwrap_or(self.path.as_str()),
        }
    }
}

/// A derived folder identity.
///
/// Folder paths always carry a trailing separator; [`FolderRef::new`]
/// normalizes the key so the invariant holds regardless of what the caller
/// supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FolderRef {
    /// Folder path, separator-terminated.
    pub path: String,
}

impl FolderRef {
    /// Create a folder reference, appending the separator when missing.
    pub fn new(path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.ends_with(SEPARATOR) {
            path.push(SEPARATOR);
        }
        Self { path }
    }

    /// The final path segment, without separators.
    pub fn name(&self) -> &str {
        self.path
            .trim_end_matches(SEPARATOR)
            .rsplit(SEPARATOR)
            .next()
            .unwrap_or("")
    }

    /// Whether a key lies strictly inside this folder.
    ///
    /// The folder's own path does not count as a member.
    pub fn contains(&self, key: &str) -> bool {
        key.starts_with(self.path.as_str()) && key != self.path
    }
}

impl<'de> Deserialize<'de> for FolderRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            path: String,
        }
        Ok(FolderRef::new(Raw::deserialize(deserializer)?.path))
    }
}

/// A collection entry: a file record or an explicit folder reference.
///
/// The wire form of both variants is an object with a `path` key; the
/// trailing separator disambiguates on the way back in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    /// An explicit folder.
    Folder(FolderRef),
    /// A file.
    File(FileRecord),
}

impl Entry {
    /// The entry's path key.
    pub fn path(&self) -> &str {
        match self {
            Entry::Folder(folder) => &folder.path,
            Entry::File(file) => &file.path,
        }
    }

    /// Whether this entry is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Entry::Folder(_))
    }

    /// The file record, when this entry is a file.
    pub fn as_file(&self) -> Option<&FileRecord> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Folder(_) => None,
        }
    }

    /// The folder reference, when this entry is a folder.
    pub fn as_folder(&self) -> Option<&FolderRef> {
        match self {
            Entry::Folder(folder) => Some(folder),
            Entry::File(_) => None,
        }
    }
}

impl From<FileRecord> for Entry {
    fn from(record: FileRecord) -> Self {
        Entry::File(record)
    }
}

impl From<FolderRef> for Entry {
    fn from(folder: FolderRef) -> Self {
        Entry::Folder(folder)
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = FileRecord::deserialize(deserializer)?;
        if is_folder_key(&record.path) {
            Ok(Entry::Folder(FolderRef { path: record.path }))
        } else {
            Ok(Entry::File(record))
        }
    }
}
