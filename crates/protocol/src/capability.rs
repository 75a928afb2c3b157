//! Capability bitmask.
//!
//! Four independent feature flags are folded into a single byte that rides
//! along on the delegated service's URL (`access=<mask>`). The mask is a hint
//! for the remote UI, not an enforced permission: nothing in this crate
//! restricts what the remote service may report back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The independent feature flags a host can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilityFlags {
    /// Uploading new files is offered.
    pub can_upload: bool,
    /// Deleting files is offered.
    pub can_delete: bool,
    /// Creating folders is offered.
    pub can_create_folder: bool,
    /// Downloading files is offered.
    pub can_download: bool,
}

/// OR-combined encoding of [`CapabilityFlags`].
///
/// Computed once at mount from static configuration and never mutated
/// afterward. Bit values are fixed by the wire contract with the remote
/// service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityMask(u8);

impl CapabilityMask {
    /// Bit granting file upload.
    pub const UPLOAD: u8 = 0b1000_0000;
    /// Bit granting file deletion.
    pub const DELETE: u8 = 0b0100_0000;
    /// Bit granting folder creation.
    pub const CREATE_FOLDER: u8 = 0b0010_0000;
    /// Bit granting file download.
    pub const DOWNLOAD: u8 = 0b0001_0000;

    /// Fold a set of flags into a mask.
    pub fn resolve(flags: &CapabilityFlags) -> Self {
        let mut bits = 0;
        if flags.can_upload {
            bits |= Self::UPLOAD;
        }
        if flags.can_delete {
            bits |= Self::DELETE;
        }
        if flags.can_create_folder {
            bits |= Self::CREATE_FOLDER;
        }
        if flags.can_download {
            bits |= Self::DOWNLOAD;
        }
        Self(bits)
    }

    /// Create a mask from a raw byte value.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw byte value.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Check the upload bit.
    #[inline]
    pub fn allows_upload(self) -> bool {
        self.0 & Self::UPLOAD != 0
    }

    /// Check the delete bit.
    #[inline]
    pub fn allows_delete(self) -> bool {
        self.0 & Self::DELETE != 0
    }

    /// Check the create-folder bit.
    #[inline]
    pub fn allows_create_folder(self) -> bool {
        self.0 & Self::CREATE_FOLDER != 0
    }

    /// Check the download bit.
    #[inline]
    pub fn allows_download(self) -> bool {
        self.0 & Self::DOWNLOAD != 0
    }

    /// Decode the mask back into independent flags.
    pub fn flags(self) -> CapabilityFlags {
        CapabilityFlags {
            can_upload: self.allows_upload(),
            can_delete: self.allows_delete(),
            can_create_folder: self.allows_create_folder(),
            can_download: self.allows_download(),
        }
    }
}

impl fmt::Display for CapabilityMask {
    /// Decimal form, as it appears in the `access` query parameter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
