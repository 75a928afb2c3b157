//! # FilePane Widget Library
//!
//! This crate is the behavioral core of FilePane, an embeddable file-browser
//! widget. It bridges a host application with either an in-process tree view
//! over a local file collection, or an externally hosted file-browsing
//! service rendered in an isolated frame, and translates both into one
//! stable, host-consumable event contract.
//!
//! ## Overview
//!
//! - **Collection Model**: ordered, path-keyed entries with copy-on-write
//!   replacement and an explicit folder index
//! - **Event Normalizer**: raw interactions in, closed outbound events out
//! - **Transports**: embedded tree vs. external frame, selected once at
//!   mount behind a shared lifecycle trait
//! - **Action Gate**: the exact action list a renderer may offer, including
//!   the busy state while a host mutation is in flight
//! - **Height Reconciler**: keeps the hosting surface sized to the content
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      FileBrowser                          │
//! ├───────────────────────────────────────────────────────────┤
//! │                                                           │
//! │  ┌──────────────────────┐   ┌──────────────────────────┐  │
//! │  │ EmbeddedTreeTransport│   │  ExternalFrameTransport  │  │
//! │  │  collection + gate   │   │  channel subscription    │  │
//! │  └──────────┬───────────┘   └───────────┬──────────────┘  │
//! │             │      EventNormalizer      │                 │
//! │             └────────────┬──────────────┘                 │
//! │                          │                                │
//! │                 HostSink.set_value                        │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use widget::{BrowserConfig, FileBrowser, MountError, WidgetHost};
//!
//! fn mount(host: WidgetHost, config: BrowserConfig) -> Result<(), MountError> {
//!     let mut browser = FileBrowser::mount(config, host)?;
//!
//!     if let Some(tree) = browser.embedded() {
//!         tree.on_select_file("a/b.txt");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: the host-supplied argument object
//! - [`collection`]: file collection model and path index
//! - [`normalizer`]: interaction-to-event normalization
//! - [`transport`]: transport strategies and the message channel
//! - [`actions`]: action capability gate
//! - [`height`]: frame-height reconciliation
//! - [`download`]: download link resolution
//! - [`host`]: collaborator traits the embedding layer implements
//! - [`browser`]: the mount facade

pub mod actions;
pub mod browser;
pub mod collection;
pub mod config;
pub mod download;
pub mod height;
pub mod host;
pub mod normalizer;
pub mod transport;

// Re-export protocol for convenience
pub use protocol;

// Re-export the mount surface for convenience
pub use actions::{
    Action, ActionCapabilities, ActionContext, ActionGate, ActionList, PendingOperation,
    SelectedItem,
};
pub use browser::{FileBrowser, MountError};
pub use collection::FileCollection;
pub use config::{BrowserConfig, ConfigError};
pub use download::{DownloadError, DownloadResolver};
pub use height::HeightReconciler;
pub use host::{
    DownloadDelegate, DownloadRequest, HostSink, RenderSurface, Scheduler, WidgetHost,
};
pub use normalizer::EventNormalizer;
pub use transport::{
    EmbeddedTreeTransport, EventTransport, ExternalFrameTransport, MessageChannel, Subscription,
    TransportError, TransportMode,
};
