//! PyPI JSON API provider

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::lookup::{RegistryError, VersionLookup};

pub const DEFAULT_PYPI_URL: &str = "https://pypi.org/pypi";

pub struct PypiRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl PypiRegistry {
    pub fn new(base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("importscope/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Using default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self {
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_PYPI_URL.to_string()),
        }
    }

    /// `<base>/<package>/json`
    pub fn package_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.base_url.trim_end_matches('/'), package)
    }
}

#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
}

#[derive(Debug, Deserialize)]
struct PypiInfo {
    version: String,
}

#[async_trait::async_trait]
impl VersionLookup for PypiRegistry {
    async fn latest_version(&self, package: &str) -> Result<Option<String>, RegistryError> {
        let http = |source| RegistryError::Http {
            package: package.to_string(),
            source,
        };

        let response = self
            .client
            .get(self.package_url(package))
            .send()
            .await
            .map_err(http)?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => {
                return Err(RegistryError::Status {
                    package: package.to_string(),
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let body: PypiResponse = response.json().await.map_err(http)?;
        tracing::debug!("{} resolved to {}", package, body.info.version);
        Ok(Some(body.info.version).filter(|v| !v.trim().is_empty()))
    }

    fn name(&self) -> &str {
        "pypi"
    }
}
