use std::sync::Arc;

use crate::data::PreparedTable;

/// The parsed upload the session is currently showing.
/// Replaced wholesale when a file with different content arrives.
#[derive(Debug, Clone)]
pub struct LoadedUpload {
    pub fingerprint: u64,
    pub prepared: Arc<PreparedTable>,
}

impl LoadedUpload {
    pub fn new(fingerprint: u64, prepared: PreparedTable) -> Self {
        Self {
            fingerprint,
            prepared: Arc::new(prepared),
        }
    }

    pub fn matches(&self, fingerprint: u64) -> bool {
        self.fingerprint == fingerprint
    }
}
