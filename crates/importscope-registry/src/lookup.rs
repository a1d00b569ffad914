//! Version lookup trait shared by registry providers

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("request for {package} failed: {source}")]
    Http {
        package: String,
        source: reqwest::Error,
    },

    #[error("registry answered {status} for {package}")]
    Status { package: String, status: u16 },

    #[error("unknown registry provider: {0}")]
    UnknownProvider(String),
}

/// Resolves a distribution name to its latest published version.
#[async_trait::async_trait]
pub trait VersionLookup: Send + Sync {
    /// `Ok(None)` when the registry does not know the package.
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError>;

    /// Provider name for logs.
    fn name(&self) -> &str;
}
