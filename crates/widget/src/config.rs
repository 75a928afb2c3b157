//! Widget configuration.
//!
//! The host passes a single argument object at mount time. Field defaults
//! match the host-side wrapper's signature, so a minimal configuration is a
//! file list and a display path. Validation catches the mistakes that would
//! otherwise surface as silently dead features (a malformed download origin,
//! records without identity).

use protocol::{CapabilityFlags, FileRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::actions::ActionCapabilities;
use crate::transport::TransportMode;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A file record without a path can never be addressed.
    #[error("file record at position {0} has an empty path")]
    EmptyFilePath(usize),

    /// The download origin must be an absolute URL.
    #[error("artifacts_download_site is not an absolute URL: {0}")]
    InvalidDownloadSite(String),
}

/// The argument object the host supplies at mount time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// The file collection to browse.
    pub files: Vec<FileRecord>,

    /// Display path of the browsed root.
    pub path: String,

    /// Base URL download links are resolved against.
    pub artifacts_download_site: Option<String>,

    /// Offer file download.
    pub show_download_file: bool,

    /// Offer file deletion.
    pub show_delete_file: bool,

    /// Offer choosing files.
    pub show_choose_file: bool,

    /// Offer choosing folders.
    pub show_choose_folder: bool,

    /// Offer folder creation.
    pub show_new_folder: bool,

    /// Offer file upload (advisory; encoded for the remote service only).
    pub show_upload_file: bool,

    /// Offer file rename.
    pub show_rename_file: bool,

    /// Offer folder rename.
    pub show_rename_folder: bool,

    /// Swallow file-selection interactions instead of emitting events.
    pub ignore_file_select_event: bool,

    /// Swallow folder-selection interactions instead of emitting events.
    pub ignore_folder_select_event: bool,

    /// URL of an externally hosted file-browsing service. A non-empty value
    /// selects the external frame transport for the life of the mount.
    pub static_file_server_path: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            path: String::new(),
            artifacts_download_site: None,
            show_download_file: true,
            show_delete_file: false,
            show_choose_file: false,
            show_choose_folder: false,
            show_new_folder: false,
            show_upload_file: false,
            show_rename_file: false,
            show_rename_folder: false,
            ignore_file_select_event: false,
            ignore_folder_select_event: false,
            static_file_server_path: None,
        }
    }
}

impl BrowserConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (position, record) in self.files.iter().enumerate() {
            if record.path.is_empty() {
                return Err(ConfigError::EmptyFilePath(position));
            }
        }
        if let Some(site) = self.artifacts_download_site.as_deref() {
            Url::parse(site).map_err(|err| ConfigError::InvalidDownloadSite(err.to_string()))?;
        }
        Ok(())
    }

    /// The transport the configuration selects.
    pub fn transport_mode(&self) -> TransportMode {
        match self.static_file_server_path.as_deref() {
            Some(path) if !path.is_empty() => TransportMode::ExternalFrame,
            _ => TransportMode::EmbeddedTree,
        }
    }

    /// The flags folded into the advisory capability mask.
    pub fn capability_flags(&self) -> CapabilityFlags {
        CapabilityFlags {
            can_upload: self.show_upload_file,
            can_delete: self.show_delete_file,
            can_create_folder: self.show_new_folder,
            can_download: self.show_download_file,
        }
    }

    /// The per-kind capabilities the action gate decides against.
    ///
    /// File download additionally requires a configured origin; folder
    /// download is not exposed by this configuration surface.
    pub fn action_capabilities(&self) -> ActionCapabilities {
        ActionCapabilities {
            create_folder: self.show_new_folder,
            rename_file: self.show_rename_file,
            rename_folder: self.show_rename_folder,
            delete_file: self.show_delete_file,
            download_file: self.show_download_file && self.artifacts_download_site.is_some(),
            download_folder: false,
            choose_file: self.show_choose_file,
            choose_folder: self.show_choose_folder,
        }
    }
}
