//! Frame-height reconciliation.
//!
//! After mount, after every update and after folder open/close the widget
//! measures the rendered root and tells the host how tall the hosting
//! surface should be, so content is neither clipped nor scrolled. The
//! measurement takes the minimum of the client, scroll and offset heights,
//! which guards against transient overflow during transition animations.
//!
//! The height is reported twice per reconciliation: once synchronously and
//! once after a zero-delay deferral, the second report catching any
//! post-paint reflow. The external frame transport does not use this module;
//! it forwards the frame's own auto-resize signal instead.

use std::sync::Arc;

use tracing::debug;

use crate::host::{HostSink, RenderSurface, Scheduler};

/// Reports the rendered height to the host.
pub struct HeightReconciler {
    sink: Arc<dyn HostSink>,
    scheduler: Arc<dyn Scheduler>,
    surface: Arc<dyn RenderSurface>,
}

impl HeightReconciler {
    /// Create a reconciler over the given surface.
    pub fn new(
        sink: Arc<dyn HostSink>,
        scheduler: Arc<dyn Scheduler>,
        surface: Arc<dyn RenderSurface>,
    ) -> Self {
        Self {
            sink,
            scheduler,
            surface,
        }
    }

    /// The minimum of the three height measurements.
    pub fn measure(&self) -> u32 {
        min_height(
            self.surface.client_height(),
            self.surface.scroll_height(),
            self.surface.offset_height(),
        )
    }

    /// Reconcile with no revocation delta.
    pub fn reconcile(&self) {
        self.reconcile_revoked(0);
    }

    /// Reconcile, subtracting a caller-supplied revocation delta.
    pub fn reconcile_revoked(&self, revoke_delta: u32) {
        let height = self.measure().saturating_sub(revoke_delta);
        debug!(height, revoke_delta, "reconciling frame height");
        self.sink.set_frame_height(Some(height));

        let sink = Arc::clone(&self.sink);
        self.scheduler
            .defer(Box::new(move || sink.set_frame_height(None)));
    }
}

/// Minimum of the client, scroll and offset heights.
pub fn min_height(client: u32, scroll: u32, offset: u32) -> u32 {
    client.min(scroll).min(offset)
}
