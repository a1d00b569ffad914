//! Scan configuration: `importscope.toml` plus environment overrides

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Config file looked up at the scan root.
pub const CONFIG_FILE: &str = "importscope.toml";

const ENV_THREADS: &str = "IMPORTSCOPE_THREADS";
const ENV_MAX_FILE_SIZE: &str = "IMPORTSCOPE_MAX_FILE_SIZE";
const ENV_REGISTRY: &str = "IMPORTSCOPE_REGISTRY";
const ENV_REGISTRY_URL: &str = "IMPORTSCOPE_REGISTRY_URL";

/// Settings for discovery, scanning and manifest resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to scan, without the dot.
    pub extensions: Vec<String>,
    /// Glob patterns (relative to the root) of files to leave out.
    pub exclude: Vec<String>,
    /// Files larger than this many bytes are skipped.
    pub max_file_size: u64,
    /// Worker threads; `None` uses available parallelism.
    pub threads: Option<usize>,
    pub registry: RegistryConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["py".to_string(), "pyi".to_string()],
            exclude: vec![
                "**/.git/**".to_string(),
                "**/__pycache__/**".to_string(),
                "**/.venv/**".to_string(),
                "**/venv/**".to_string(),
                "**/node_modules/**".to_string(),
            ],
            max_file_size: 2 * 1024 * 1024,
            threads: None,
            registry: RegistryConfig::default(),
        }
    }
}

/// Package registry used when resolving manifest versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// `pypi` or `offline`.
    pub provider: String,
    pub base_url: Option<String>,
    /// Concurrent lookups.
    pub concurrency: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            provider: "pypi".to_string(),
            base_url: None,
            concurrency: 8,
        }
    }
}

impl ScanConfig {
    /// Load `importscope.toml` from `root` if present, then apply `.env` and
    /// process environment overrides.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        let mut config = if path.is_file() {
            let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let config = Self::from_toml_str(&text)
                .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
            tracing::debug!("Loaded config from {}", path.display());
            config
        } else {
            Self::default()
        };

        let dotenv = root.join(".env");
        if dotenv.is_file() {
            if let Err(e) = dotenvy::from_path(&dotenv) {
                tracing::warn!("Ignoring {}: {}", dotenv.display(), e);
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_THREADS) {
            let threads = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or(ConfigError::Env { name: ENV_THREADS, value })?;
            self.threads = Some(threads);
        }
        if let Some(value) = lookup(ENV_MAX_FILE_SIZE) {
            self.max_file_size = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Env { name: ENV_MAX_FILE_SIZE, value })?;
        }
        if let Some(value) = lookup(ENV_REGISTRY) {
            self.registry.provider = value;
        }
        if let Some(value) = lookup(ENV_REGISTRY_URL) {
            self.registry.base_url = Some(value);
        }
        Ok(())
    }

    /// Effective worker count, at least 1.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
        .max(1)
    }

    /// Whether `path` has one of the configured extensions.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|want| want == ext))
    }
}
