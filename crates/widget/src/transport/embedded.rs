//! Embedded tree transport.
//!
//! Drives the local file collection directly from synchronous UI callbacks
//! and exposes the per-render action list. Every render-affecting callback
//! also reconciles the frame height with the host.

use std::sync::Arc;

use protocol::{FileRecord, OutboundPayload};
use tracing::debug;

use crate::actions::{ActionContext, ActionGate, ActionList};
use crate::collection::FileCollection;
use crate::config::BrowserConfig;
use crate::download::DownloadResolver;
use crate::height::HeightReconciler;
use crate::host::{HostSink, WidgetHost};
use crate::normalizer::EventNormalizer;
use crate::transport::{EventTransport, TransportError, TransportMode};

/// Delivery strategy backed by the in-process tree view.
pub struct EmbeddedTreeTransport {
    normalizer: EventNormalizer,
    gate: ActionGate,
    sink: Arc<dyn HostSink>,
    height: HeightReconciler,
    mounted: bool,
}

impl EmbeddedTreeTransport {
    /// Build the transport from configuration.
    ///
    /// Configuration is validated before construction, so a present download
    /// origin is known to parse.
    pub fn new(config: &BrowserConfig, host: &WidgetHost) -> Self {
        let resolver = config
            .artifacts_download_site
            .as_deref()
            .and_then(|origin| match DownloadResolver::new(origin) {
                Ok(resolver) => Some(resolver),
                Err(err) => {
                    debug!(%err, "download origin rejected; downloads disabled");
                    None
                }
            });

        let normalizer = EventNormalizer::new(
            FileCollection::new(config.files.clone()),
            config.ignore_file_select_event,
            config.ignore_folder_select_event,
            resolver,
            Arc::clone(&host.downloads),
        );

        Self {
            normalizer,
            gate: ActionGate::new(config.action_capabilities()),
            sink: Arc::clone(&host.sink),
            height: HeightReconciler::new(
                Arc::clone(&host.sink),
                Arc::clone(&host.scheduler),
                Arc::clone(&host.surface),
            ),
            mounted: false,
        }
    }

    fn emit(&self, payload: Option<OutboundPayload>) {
        if let Some(payload) = payload {
            self.sink.set_value(payload);
        }
    }

    /// The collection backing this transport.
    pub fn collection(&self) -> &FileCollection {
        self.normalizer.collection()
    }

    /// Fresh file data arrived from the host.
    pub fn update_files(&mut self, files: Vec<FileRecord>) {
        self.normalizer.update_files(files);
        self.height.reconcile();
    }

    /// The exact action list for the current render.
    pub fn actions(&self, ctx: &ActionContext) -> ActionList {
        self.gate.compute(ctx)
    }

    /// A folder was opened in the tree.
    pub fn on_folder_open(&self) {
        self.height.reconcile();
    }

    /// A folder was closed in the tree.
    pub fn on_folder_close(&self) {
        self.height.reconcile();
    }

    /// A file row was selected.
    pub fn on_select_file(&self, key: &str) {
        self.emit(self.normalizer.select_file(key));
    }

    /// A folder row was selected.
    pub fn on_select_folder(&self, key: &str) {
        self.emit(self.normalizer.select_folder(key));
    }

    /// A file was renamed in the tree.
    pub fn on_rename_file(&self, old_key: &str, new_key: &str) {
        self.emit(self.normalizer.rename_file(old_key, new_key));
    }

    /// A folder was renamed in the tree.
    pub fn on_rename_folder(&self, old_key: &str, new_key: &str) {
        self.emit(self.normalizer.rename_folder(old_key, new_key));
    }

    /// A file was moved in the tree.
    pub fn on_move_file(&self, old_key: &str, new_key: &str) {
        self.emit(self.normalizer.move_file(old_key, new_key));
    }

    /// A folder was moved in the tree.
    pub fn on_move_folder(&self, old_key: &str, new_key: &str) {
        self.emit(self.normalizer.move_folder(old_key, new_key));
    }

    /// Entries were deleted. Mutates the collection and re-renders.
    pub fn on_delete(&mut self, keys: &[String]) {
        let payload = self.normalizer.delete(keys);
        self.emit(payload);
        self.height.reconcile();
    }

    /// A folder was created.
    pub fn on_create_folder(&self, key: &str) {
        self.emit(self.normalizer.create_folder(key));
    }

    /// Entries were downloaded.
    pub fn on_download(&self, keys: &[String]) {
        self.emit(self.normalizer.download(keys));
    }

    /// Entries were chosen.
    pub fn on_choose(&self, keys: &[String]) {
        self.emit(self.normalizer.choose(keys));
    }
}

impl EventTransport for EmbeddedTreeTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::EmbeddedTree
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn mount(&mut self) -> Result<(), TransportError> {
        if self.mounted {
            return Err(TransportError::AlreadyMounted);
        }
        self.mounted = true;
        self.height.reconcile();
        Ok(())
    }

    fn unmount(&mut self) {
        self.mounted = false;
    }

    fn notify_resized(&mut self) {
        self.height.reconcile();
    }
}
