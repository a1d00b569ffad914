//! Provider that never resolves anything, for air-gapped use

use crate::lookup::{RegistryError, VersionLookup};

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRegistry;

#[async_trait::async_trait]
impl VersionLookup for OfflineRegistry {
    async fn latest_version(&self, _package: &str) -> Result<Option<String>, RegistryError> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "offline"
    }
}
