//! Import scanning: text sanitizer, import extractor, multi-file aggregator
//! and file discovery

pub mod sanitize;
pub mod extractor;
pub mod aggregator;
pub mod events;
pub mod discovery;
pub mod config;
pub mod error;


pub use sanitize::sanitize;
pub use extractor::{ImportExtractor, PythonImportExtractor, extract_imports, extract_occurrences};
pub use aggregator::{Aggregator, CancelToken, ScanResult, ScanSummary};
pub use events::{ScanEvent, ScanObserver, TracingObserver, RecordingObserver};
pub use discovery::{discover, read_source};
pub use config::{ScanConfig, RegistryConfig, CONFIG_FILE};
pub use error::{ScanError, ConfigError};
