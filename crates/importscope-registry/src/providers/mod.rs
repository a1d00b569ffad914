//! Registry provider implementations

pub mod pypi;
pub mod offline;

use crate::lookup::{RegistryError, VersionLookup};

/// Factory for the configured provider (`pypi` or `offline`).
pub fn create_registry(
    provider: &str,
    base_url: Option<String>,
) -> Result<Box<dyn VersionLookup>, RegistryError> {
    match provider {
        "pypi" => Ok(Box::new(pypi::PypiRegistry::new(base_url))),
        "offline" => Ok(Box::new(offline::OfflineRegistry)),
        other => Err(RegistryError::UnknownProvider(other.to_string())),
    }
}
