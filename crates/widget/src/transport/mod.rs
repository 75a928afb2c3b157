//! Event transports.
//!
//! A mounted widget sources raw interactions from exactly one of two
//! strategies: the embedded tree (in-process callbacks driving the local
//! collection) or the external frame (messages crossing a frame boundary
//! from a remote file-browsing service). The strategy is chosen once at
//! construction and never switches for the life of the mount.
//!
//! Both strategies implement [`EventTransport`], which carries the shared
//! lifecycle; capability resolution and height reporting are shared modules
//! rather than per-strategy copies.

pub mod channel;
pub mod embedded;
pub mod frame;

use std::fmt;

use thiserror::Error;

pub use channel::{MessageChannel, Subscription};
pub use embedded::EmbeddedTreeTransport;
pub use frame::ExternalFrameTransport;

/// The two mutually exclusive delivery strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// In-process tree view over the local collection.
    EmbeddedTree,
    /// Externally hosted service in an isolated frame.
    ExternalFrame,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::EmbeddedTree => write!(f, "embedded-tree"),
            TransportMode::ExternalFrame => write!(f, "external-frame"),
        }
    }
}

/// Errors that can occur in transport lifecycle handling.
#[derive(Debug, Error, PartialEq)]
pub enum TransportError {
    /// Mount was called on an already mounted transport.
    #[error("transport is already mounted")]
    AlreadyMounted,
}

/// Shared lifecycle of both delivery strategies.
pub trait EventTransport {
    /// Which strategy this is.
    fn mode(&self) -> TransportMode;

    /// Whether the transport is currently mounted.
    fn is_mounted(&self) -> bool;

    /// Acquire resources and perform the initial height report.
    fn mount(&mut self) -> Result<(), TransportError>;

    /// Release resources. Idempotent.
    fn unmount(&mut self);

    /// The rendered surface resized.
    fn notify_resized(&mut self);
}
