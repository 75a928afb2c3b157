//! Widget facade.
//!
//! [`FileBrowser::mount`] is the single entry point a host uses: it
//! validates the configuration, resolves the capability mask, selects the
//! transport strategy and mounts it. The strategy is fixed for the life of
//! the instance; there is no runtime switching.

use protocol::{CapabilityMask, FileRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::actions::{ActionContext, ActionList};
use crate::config::{BrowserConfig, ConfigError};
use crate::host::WidgetHost;
use crate::transport::{
    EmbeddedTreeTransport, EventTransport, ExternalFrameTransport, TransportError, TransportMode,
};

/// Errors that can occur while mounting the widget.
#[derive(Debug, Error)]
pub enum MountError {
    /// The host-supplied configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The selected transport failed to mount.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

enum Strategy {
    Embedded(EmbeddedTreeTransport),
    Frame(ExternalFrameTransport),
}

impl Strategy {
    fn as_transport(&mut self) -> &mut dyn EventTransport {
        match self {
            Strategy::Embedded(transport) => transport,
            Strategy::Frame(transport) => transport,
        }
    }
}

/// One mounted file-browser instance.
pub struct FileBrowser {
    display_path: String,
    mask: CapabilityMask,
    strategy: Strategy,
}

impl FileBrowser {
    /// Validate the configuration, select a transport and mount it.
    pub fn mount(config: BrowserConfig, host: WidgetHost) -> Result<Self, MountError> {
        config.validate()?;
        let mask = CapabilityMask::resolve(&config.capability_flags());
        let mode = config.transport_mode();

        let mut strategy = match mode {
            TransportMode::EmbeddedTree => {
                Strategy::Embedded(EmbeddedTreeTransport::new(&config, &host))
            }
            TransportMode::ExternalFrame => Strategy::Frame(ExternalFrameTransport::new(
                &config,
                mask,
                host.sink,
                host.channel,
            )),
        };
        strategy.as_transport().mount()?;

        info!(%mode, access = %mask, "mounted file browser");
        Ok(Self {
            display_path: config.path,
            mask,
            strategy,
        })
    }

    /// The display path of the browsed root, as configured by the host.
    pub fn display_path(&self) -> &str {
        &self.display_path
    }

    /// The active transport strategy.
    pub fn mode(&self) -> TransportMode {
        match &self.strategy {
            Strategy::Embedded(_) => TransportMode::EmbeddedTree,
            Strategy::Frame(_) => TransportMode::ExternalFrame,
        }
    }

    /// The advisory capability mask resolved at mount.
    pub fn capability_mask(&self) -> CapabilityMask {
        self.mask
    }

    /// The embedded transport, when that strategy is active.
    ///
    /// UI callbacks (select, rename, delete, download, choose, folder
    /// open/close) are driven directly on the returned transport.
    pub fn embedded(&mut self) -> Option<&mut EmbeddedTreeTransport> {
        match &mut self.strategy {
            Strategy::Embedded(transport) => Some(transport),
            Strategy::Frame(_) => None,
        }
    }

    /// The frame transport, when that strategy is active.
    pub fn frame(&self) -> Option<&ExternalFrameTransport> {
        match &self.strategy {
            Strategy::Embedded(_) => None,
            Strategy::Frame(transport) => Some(transport),
        }
    }

    /// Fresh file data arrived from the host.
    ///
    /// The external frame keeps its own collection remotely, so the push
    /// only applies to the embedded tree.
    pub fn update_files(&mut self, files: Vec<FileRecord>) {
        match &mut self.strategy {
            Strategy::Embedded(transport) => transport.update_files(files),
            Strategy::Frame(_) => {
                debug!("ignoring file update: collection is owned by the remote service");
            }
        }
    }

    /// The exact action list for the current render (embedded tree only).
    pub fn actions(&self, ctx: &ActionContext) -> Option<ActionList> {
        match &self.strategy {
            Strategy::Embedded(transport) => Some(transport.actions(ctx)),
            Strategy::Frame(_) => None,
        }
    }

    /// The rendered surface resized.
    pub fn notify_resized(&mut self) {
        self.strategy.as_transport().notify_resized();
    }

    /// Release transport resources. Idempotent.
    pub fn unmount(&mut self) {
        self.strategy.as_transport().unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use protocol::OutboundPayload;

    use crate::host::{
        DownloadDelegate, DownloadRequest, HostSink, RenderSurface, Scheduler,
    };
    use crate::transport::MessageChannel;

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

    struct ImmediateScheduler;
    impl Scheduler for ImmediateScheduler {
        fn defer(&self, task: Box<dyn FnOnce() + Send>) {
            task();
        }
    }

    struct FixedSurface;
    impl RenderSurface for FixedSurface {
        fn client_height(&self) -> u32 {
            200
        }
        fn scroll_height(&self) -> u32 {
            200
        }
        fn offset_height(&self) -> u32 {
            200
        }
    }

    struct NullDownloads;
    impl DownloadDelegate for NullDownloads {
        fn fetch(&self, _request: DownloadRequest) {}
    }

    fn host() -> (WidgetHost, Arc<RecordingSink>, MessageChannel) {
        let sink = Arc::new(RecordingSink::default());
        let channel = MessageChannel::new();
        let host = WidgetHost {
            sink: Arc::clone(&sink) as Arc<dyn HostSink>,
            scheduler: Arc::new(ImmediateScheduler),
            surface: Arc::new(FixedSurface),
            downloads: Arc::new(NullDownloads),
            channel: channel.clone(),
        };
        (host, sink, channel)
    }

    #[test]
    fn test_mount_selects_embedded_by_default() {
        let (host, _, _) = host();
        let browser = FileBrowser::mount(BrowserConfig::default(), host).unwrap();
        assert_eq!(browser.mode(), TransportMode::EmbeddedTree);
    }

    #[test]
    fn test_mount_selects_frame_when_server_path_present() {
        let (host, _, channel) = host();
        let config = BrowserConfig {
            static_file_server_path: Some("https://files.example.com/".to_string()),
            ..BrowserConfig::default()
        };
        let mut browser = FileBrowser::mount(config, host).unwrap();
        assert_eq!(browser.mode(), TransportMode::ExternalFrame);
        assert!(browser.embedded().is_none());
        assert!(browser.frame().is_some());
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[test]
    fn test_mount_rejects_invalid_config() {
        let (host, _, _) = host();
        let config = BrowserConfig {
            artifacts_download_site: Some("not a url".to_string()),
            ..BrowserConfig::default()
        };
        assert!(matches!(
            FileBrowser::mount(config, host),
            Err(MountError::Config(_))
        ));
    }

    #[test]
    fn test_capability_mask_is_fixed_at_mount() {
        let (host, _, _) = host();
        let config = BrowserConfig {
            show_new_folder: true,
            ..BrowserConfig::default()
        };
        let browser = FileBrowser::mount(config, host).unwrap();
        assert!(browser.capability_mask().allows_create_folder());
        assert!(browser.capability_mask().allows_download());
        assert!(!browser.capability_mask().allows_delete());
    }

    #[test]
    fn test_unmount_frame_releases_channel() {
        let (host, _, channel) = host();
        let config = BrowserConfig {
            static_file_server_path: Some("https://files.example.com/".to_string()),
            ..BrowserConfig::default()
        };
        let mut browser = FileBrowser::mount(config, host).unwrap();
        browser.unmount();
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn test_update_files_reaches_embedded_collection() {
        let (host, _, _) = host();
        let mut browser = FileBrowser::mount(BrowserConfig::default(), host).unwrap();
        browser.update_files(vec![protocol::FileRecord::new("a.txt")]);
        assert_eq!(browser.embedded().unwrap().collection().len(), 1);
    }

    #[test]
    fn test_actions_only_exist_for_embedded() {
        let (host, _, _) = host();
        let config = BrowserConfig {
            static_file_server_path: Some("https://files.example.com/".to_string()),
            ..BrowserConfig::default()
        };
        let browser = FileBrowser::mount(config, host).unwrap();
        assert!(browser.actions(&ActionContext::default()).is_none());
    }
}
