//! # FilePane Protocol Library
//!
//! This crate defines the data contract between the FilePane widget core and
//! its two collaborators: the host application embedding the widget, and the
//! optional remote file-browsing service rendered in an isolated frame.
//!
//! ## Overview
//!
//! The protocol crate is pure data, no state and no I/O:
//!
//! - **Records**: path-identified file and folder entries
//! - **Events**: the closed set of outbound event kinds and the payload
//!   shapes delivered to the host
//! - **Capability Mask**: the advisory bitmask appended to the delegated
//!   service's URL
//! - **Frame Protocol**: the message shapes posted across the frame boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use protocol::{CapabilityFlags, CapabilityMask, EventKind, FileRecord, OutboundEvent};
//!
//! // Encode the feature flags for the remote service
//! let mask = CapabilityMask::resolve(&CapabilityFlags {
//!     can_download: true,
//!     ..CapabilityFlags::default()
//! });
//! assert_eq!(mask.bits(), CapabilityMask::DOWNLOAD);
//!
//! // Build a host-facing event
//! let event = OutboundEvent::single(EventKind::SelectFile, FileRecord::new("a/b.txt"));
//! let json = serde_json::to_string(&event).unwrap();
//! assert!(json.contains("SELECT_FILE"));
//! ```
//!
//! ## Modules
//!
//! - [`records`]: file records, folder references, collection entries
//! - [`events`]: outbound event kinds, targets and payloads
//! - [`capability`]: capability flags and their bitmask encoding
//! - [`frame`]: cross-frame message protocol
//! - [`error`]: error types

pub mod capability;
pub mod error;
pub mod events;
pub mod frame;
pub mod records;

pub use capability::{CapabilityFlags, CapabilityMask};
pub use error::{ProtocolError, Result};
pub use events::{EventKind, EventTarget, OutboundEvent, OutboundPayload};
pub use frame::{FrameData, FrameEventTag, FrameMessage, FramePayload};
pub use records::{is_folder_key, Entry, FileRecord, FolderRef, SEPARATOR};
