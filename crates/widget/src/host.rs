//! Host collaborator seams.
//!
//! The embedding layer supplies these collaborators at mount time. All of
//! them are fire-and-forget from the widget's point of view: nothing returns
//! a value, nothing acknowledges delivery, and the widget never blocks on
//! them.

use std::sync::Arc;

use protocol::OutboundPayload;
use url::Url;

use crate::transport::channel::MessageChannel;

/// Opaque "set value" sink toward the host application.
pub trait HostSink: Send + Sync {
    /// Deliver a normalized event payload.
    fn set_value(&self, payload: OutboundPayload);

    /// Report the rendered height.
    ///
    /// `None` asks the host to measure on its own (the post-paint follow-up
    /// report and the external frame's resize forwarding both use this).
    fn set_frame_height(&self, height: Option<u32>);
}

/// Zero-delay deferral onto the host's event loop.
pub trait Scheduler: Send + Sync {
    /// Run `task` after the current event-loop turn.
    fn defer(&self, task: Box<dyn FnOnce() + Send>);
}

/// Measurements of the rendered root element.
pub trait RenderSurface: Send + Sync {
    /// Visible height.
    fn client_height(&self) -> u32;
    /// Full content height.
    fn scroll_height(&self) -> u32;
    /// Layout height.
    fn offset_height(&self) -> u32;
}

/// A file retrieval the embedding layer performs on the widget's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Fully resolved download URL.
    pub url: Url,
    /// Suggested file name, taken from the last URL path segment.
    pub filename: String,
}

/// Side-effect executor for downloads (a transient link per target).
pub trait DownloadDelegate: Send + Sync {
    /// Trigger one file retrieval. Fire-and-forget.
    fn fetch(&self, request: DownloadRequest);
}

/// The bundle of collaborators a host hands to [`FileBrowser::mount`].
///
/// [`FileBrowser::mount`]: crate::browser::FileBrowser::mount
#[derive(Clone)]
pub struct WidgetHost {
    /// Outbound sink for events and heights.
    pub sink: Arc<dyn HostSink>,
    /// Deferral onto the host event loop.
    pub scheduler: Arc<dyn Scheduler>,
    /// The rendered root to measure.
    pub surface: Arc<dyn RenderSurface>,
    /// Download side-effect executor.
    pub downloads: Arc<dyn DownloadDelegate>,
    /// The page-wide message channel frames post onto.
    pub channel: MessageChannel,
}
