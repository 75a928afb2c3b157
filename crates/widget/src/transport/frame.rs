//! External frame transport.
//!
//! Renders the configured remote file-browsing service in an isolated,
//! auto-resizing frame and re-emits its messages as outbound events. The
//! frame URL carries the advisory capability mask as its sole protocol
//! parameter. Messages are filtered by shape, not by sender origin; origin
//! checking is deliberately disabled in this embedding model.

use std::sync::Arc;

use protocol::{
    CapabilityMask, EventKind, FolderRef, FrameEventTag, FrameMessage, OutboundEvent,
    OutboundPayload,
};
use serde_json::Value;
use tracing::debug;

use crate::config::BrowserConfig;
use crate::host::HostSink;
use crate::transport::channel::{MessageChannel, Subscription};
use crate::transport::{EventTransport, TransportError, TransportMode};

/// Message-side state shared with the channel handler.
struct FrameBridge {
    sink: Arc<dyn HostSink>,
    show_choose_file: bool,
    show_choose_folder: bool,
    ignore_file_select: bool,
    ignore_folder_select: bool,
}

impl FrameBridge {
    fn handle(&self, value: &Value) {
        let message = match FrameMessage::parse(value) {
            Ok(message) => message,
            Err(err) => {
                // Unrecognized or malformed traffic degrades to a no-op.
                debug!(%err, "ignoring channel message");
                return;
            }
        };
        if let Some(payload) = self.normalize(&message) {
            self.sink.set_value(payload);
        }
    }

    fn normalize(&self, message: &FrameMessage) -> Option<OutboundPayload> {
        let record = message.file_record()?;
        let event = match message.event {
            FrameEventTag::FileSelected => {
                if self.ignore_file_select {
                    debug!("file select suppressed by configuration");
                    return None;
                }
                OutboundEvent::single(EventKind::SelectFile, record)
            }
            FrameEventTag::DirSelected | FrameEventTag::PathChanged => {
                if self.ignore_folder_select {
                    debug!("folder select suppressed by configuration");
                    return None;
                }
                OutboundEvent::single(EventKind::SelectFolder, FolderRef::new(record.path))
            }
            FrameEventTag::FileDoubleSelected | FrameEventTag::FileChoose => {
                if !self.show_choose_file {
                    return None;
                }
                OutboundEvent::single(EventKind::ChooseFile, record)
            }
            FrameEventTag::FolderChoose => {
                if !self.show_choose_folder {
                    return None;
                }
                OutboundEvent::single(EventKind::ChooseFolder, FolderRef::new(record.path))
            }
        };
        Some(OutboundPayload::Event(event))
    }
}

/// Delivery strategy backed by an externally hosted service.
pub struct ExternalFrameTransport {
    server_path: String,
    mask: CapabilityMask,
    bridge: Arc<FrameBridge>,
    channel: MessageChannel,
    subscription: Option<Subscription>,
}

impl ExternalFrameTransport {
    /// Build the transport from configuration.
    pub fn new(
        config: &BrowserConfig,
        mask: CapabilityMask,
        sink: Arc<dyn HostSink>,
        channel: MessageChannel,
    ) -> Self {
        let server_path = config
            .static_file_server_path
            .clone()
            .unwrap_or_default();
        let bridge = Arc::new(FrameBridge {
            sink,
            show_choose_file: config.show_choose_file,
            show_choose_folder: config.show_choose_folder,
            ignore_file_select: config.ignore_file_select_event,
            ignore_folder_select: config.ignore_folder_select_event,
        });
        Self {
            server_path,
            mask,
            bridge,
            channel,
            subscription: None,
        }
    }

    /// The URL the frame should point at, capability mask appended.
    pub fn frame_url(&self) -> String {
        let separator = if self.server_path.contains('?') { '&' } else { '?' };
        format!("{}{}access={}", self.server_path, separator, self.mask)
    }

    /// The advisory mask encoded into the frame URL.
    pub fn capability_mask(&self) -> CapabilityMask {
        self.mask
    }
}

impl EventTransport for ExternalFrameTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::ExternalFrame
    }

    fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    fn mount(&mut self) -> Result<(), TransportError> {
        if self.subscription.is_some() {
            return Err(TransportError::AlreadyMounted);
        }
        let bridge = Arc::clone(&self.bridge);
        self.subscription = Some(self.channel.subscribe(move |value| bridge.handle(value)));
        debug!(url = %self.frame_url(), "mounted external frame transport");
        Ok(())
    }

    fn unmount(&mut self) {
        // Dropping the guard removes the channel listener.
        self.subscription = None;
    }

    fn notify_resized(&mut self) {
        // Height is owned by the frame's auto-resize; just forward the
        // signal so the host re-measures.
        self.bridge.sink.set_frame_height(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingSink {
        payloads: Mutex<Vec<OutboundPayload>>,
        heights: Mutex<Vec<Option<u32>>>,
    }

    impl HostSink for RecordingSink {
        fn set_value(&self, payload: OutboundPayload) {
            self.payloads.lock().push(payload);
        }

        fn set_frame_height(&self, height: Option<u32>) {
            self.heights.lock().push(height);
        }
    }

    fn transport(config: BrowserConfig) -> (ExternalFrameTransport, Arc<RecordingSink>, MessageChannel) {
        let sink = Arc::new(RecordingSink::default());
        let channel = MessageChannel::new();
        let mask = CapabilityMask::resolve(&config.capability_flags());
        let transport = ExternalFrameTransport::new(
            &config,
            mask,
            Arc::clone(&sink) as Arc<dyn HostSink>,
            channel.clone(),
        );
        (transport, sink, channel)
    }

    fn frame_config() -> BrowserConfig {
        BrowserConfig {
            static_file_server_path: Some("https://files.example.com/browse".to_string()),
            show_choose_file: true,
            show_choose_folder: true,
            ..BrowserConfig::default()
        }
    }

    #[test]
    fn test_frame_url_appends_access_mask() {
        let (transport, _, _) = transport(frame_config());
        // Default config grants download only.
        assert_eq!(
            transport.frame_url(),
            "https://files.example.com/browse?access=16"
        );
    }

    #[test]
    fn test_frame_url_respects_existing_query_string() {
        let mut config = frame_config();
        config.static_file_server_path =
            Some("https://files.example.com/browse?root=data".to_string());
        let (transport, _, _) = transport(config);
        assert_eq!(
            transport.frame_url(),
            "https://files.example.com/browse?root=data&access=16"
        );
    }

    #[test]
    fn test_file_selected_message_re_emits() {
        let (mut transport, sink, channel) = transport(frame_config());
        transport.mount().unwrap();

        channel.post(&json!({
            "event": "filebrowser_file_selected",
            "data": { "file": { "path": "a/b.txt", "size": 3 } }
        }));

        let payloads = sink.payloads.lock();
        assert_eq!(payloads.len(), 1);
        let event = &payloads[0].events()[0];
        assert_eq!(event.kind, EventKind::SelectFile);
        let record = event.target.entries()[0].as_file().unwrap();
        assert_eq!(record.path, "a/b.txt");
        assert_eq!(record.size, Some(3));
        assert_eq!(record.update_time, None);
    }

    #[test]
    fn test_dir_selected_and_path_changed_map_to_select_folder() {
        let (mut transport, sink, channel) = transport(frame_config());
        transport.mount().unwrap();

        for tag in ["filebrowser_dir_selected", "filebrowser_path_changed"] {
            channel.post(&json!({
                "event": tag,
                "data": { "file": { "path": "docs" } }
            }));
        }

        let payloads = sink.payloads.lock();
        assert_eq!(payloads.len(), 2);
        for payload in payloads.iter() {
            let event = &payload.events()[0];
            assert_eq!(event.kind, EventKind::SelectFolder);
            assert_eq!(event.target.entries()[0].path(), "docs/");
        }
    }

    #[test]
    fn test_choose_messages_gated_by_flags() {
        let mut config = frame_config();
        config.show_choose_file = false;
        let (mut transport, sink, channel) = transport(config);
        transport.mount().unwrap();

        channel.post(&json!({
            "event": "filebrowser_file_double_selected",
            "data": { "file": { "path": "a.txt" } }
        }));
        assert!(sink.payloads.lock().is_empty());

        channel.post(&json!({
            "event": "filebrowser_folder_choose",
            "data": { "file": { "path": "docs/" } }
        }));
        let payloads = sink.payloads.lock();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].events()[0].kind, EventKind::ChooseFolder);
    }

    #[test]
    fn test_select_suppression_flags_apply() {
        let mut config = frame_config();
        config.ignore_file_select_event = true;
        config.ignore_folder_select_event = true;
        let (mut transport, sink, channel) = transport(config);
        transport.mount().unwrap();

        channel.post(&json!({
            "event": "filebrowser_file_selected",
            "data": { "file": { "path": "a.txt" } }
        }));
        channel.post(&json!({
            "event": "filebrowser_dir_selected",
            "data": { "file": { "path": "docs/" } }
        }));
        assert!(sink.payloads.lock().is_empty());
    }

    #[test]
    fn test_unrecognized_message_is_a_no_op() {
        let (mut transport, sink, channel) = transport(frame_config());
        transport.mount().unwrap();

        channel.post(&json!({ "event": "something_else" }));
        channel.post(&json!("not even an object"));
        assert!(sink.payloads.lock().is_empty());
        assert!(transport.is_mounted());
    }

    #[test]
    fn test_message_without_path_is_ignored() {
        let (mut transport, sink, channel) = transport(frame_config());
        transport.mount().unwrap();

        channel.post(&json!({
            "event": "filebrowser_file_selected",
            "data": { "file": { "name": "nameless" } }
        }));
        assert!(sink.payloads.lock().is_empty());
    }

    #[test]
    fn test_unmount_releases_the_subscription() {
        let (mut transport, sink, channel) = transport(frame_config());
        transport.mount().unwrap();
        assert_eq!(channel.subscriber_count(), 1);

        transport.unmount();
        assert_eq!(channel.subscriber_count(), 0);
        assert!(!transport.is_mounted());

        channel.post(&json!({
            "event": "filebrowser_file_selected",
            "data": { "file": { "path": "a.txt" } }
        }));
        assert!(sink.payloads.lock().is_empty());
    }

    #[test]
    fn test_double_mount_is_rejected() {
        let (mut transport, _, _) = transport(frame_config());
        transport.mount().unwrap();
        assert_eq!(transport.mount(), Err(TransportError::AlreadyMounted));
    }

    #[test]
    fn test_notify_resized_forwards_auto_height() {
        let (mut transport, sink, _) = transport(frame_config());
        transport.notify_resized();
        assert_eq!(sink.heights.lock().as_slice(), &[None]);
    }
}
