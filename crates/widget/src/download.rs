//! Download link resolution.
//!
//! Record paths are resolved against the host-configured download origin to
//! produce one retrieval request per record. Only the reference travels; the
//! widget never touches file content.

use protocol::FileRecord;
use thiserror::Error;
use url::Url;

use crate::host::DownloadRequest;

/// Errors that can occur while resolving download links.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The configured download origin is not an absolute URL.
    #[error("invalid download origin: {0}")]
    InvalidOrigin(url::ParseError),

    /// A record path cannot be joined onto the origin.
    #[error("cannot resolve {path} against the download origin: {source}")]
    Unresolvable {
        /// The offending record path.
        path: String,
        /// Underlying parse failure.
        source: url::ParseError,
    },
}

/// Resolves record paths against a fixed download origin.
///
/// The origin should end with a slash so relative joins land beneath it,
/// matching how the host publishes its artifacts.
#[derive(Debug, Clone)]
pub struct DownloadResolver {
    base: Url,
}

impl DownloadResolver {
    /// Create a resolver for the given origin.
    pub fn new(origin: &str) -> Result<Self, DownloadError> {
        let base = Url::parse(origin).map_err(DownloadError::InvalidOrigin)?;
        Ok(Self { base })
    }

    /// The configured origin.
    pub fn origin(&self) -> &Url {
        &self.base
    }

    /// Resolve one record into a retrieval request.
    pub fn resolve(&self, record: &FileRecord) -> Result<DownloadRequest, DownloadError> {
        let url = self
            .base
            .join(&record.path)
            .map_err(|source| DownloadError::Unresolvable {
                path: record.path.clone(),
                source,
            })?;
        let filename = url
            .path()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Ok(DownloadRequest { url, filename })
    }
}
