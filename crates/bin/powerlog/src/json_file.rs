//! JSON file adapter for the [`ProfileSource`] port.

use std::future::Future;
use std::path::PathBuf;

use powerlog_app::ports::ProfileSource;
use powerlog_domain::error::PowerLogError;
use powerlog_domain::profile::Profile;

/// Reads and validates a profile document from disk on every load.
#[derive(Debug, Clone)]
pub struct JsonFileProfileSource {
    path: PathBuf,
}

impl JsonFileProfileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProfileSource for JsonFileProfileSource {
    fn load(&self) -> impl Future<Output = Result<Profile, PowerLogError>> + Send {
        let path = self.path.clone();
        async move {
            tracing::debug!(path = %path.display(), "reading profile");
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|err| PowerLogError::Source(Box::new(err)))?;
            Profile::from_json(&content)
        }
    }
}
