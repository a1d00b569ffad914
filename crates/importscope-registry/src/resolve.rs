//! Manifest resolution: module names to pinned distributions

use futures_util::stream::{self, StreamExt};
use importscope_core::ManifestEntry;

use crate::lookup::VersionLookup;

/// Top-level modules whose distribution is published under another name.
const DISTRIBUTION_ALIASES: &[(&str, &str)] = &[
    ("Crypto", "pycryptodome"),
    ("OpenSSL", "pyOpenSSL"),
    ("PIL", "Pillow"),
    ("attr", "attrs"),
    ("bs4", "beautifulsoup4"),
    ("cv2", "opencv-python"),
    ("dateutil", "python-dateutil"),
    ("docx", "python-docx"),
    ("dotenv", "python-dotenv"),
    ("fitz", "PyMuPDF"),
    ("git", "GitPython"),
    ("jwt", "PyJWT"),
    ("magic", "python-magic"),
    ("serial", "pyserial"),
    ("skimage", "scikit-image"),
    ("sklearn", "scikit-learn"),
    ("usb", "pyusb"),
    ("yaml", "PyYAML"),
    ("zmq", "pyzmq"),
];

/// Distribution name to install for an imported module.
pub fn distribution_name(module: &str) -> &str {
    DISTRIBUTION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == module)
        .map_or(module, |(_, dist)| dist)
}

/// Look up every module with at most `concurrency` requests in flight.
///
/// Entries come back sorted by distribution name. A failed lookup is logged
/// and yields an unpinned entry rather than an error.
pub async fn resolve_manifest(
    lookup: &dyn VersionLookup,
    modules: &[String],
    concurrency: usize,
) -> Vec<ManifestEntry> {
    tracing::info!(
        "Resolving {} packages via {} ({} concurrent)",
        modules.len(),
        lookup.name(),
        concurrency.max(1)
    );

    let mut entries: Vec<ManifestEntry> = stream::iter(modules.iter().map(|module| async move {
        let package = distribution_name(module);
        match lookup.latest_version(package).await {
            Ok(Some(version)) => ManifestEntry::new(package).with_version(version),
            Ok(None) => {
                tracing::debug!("{} not found in registry", package);
                ManifestEntry::new(package)
            }
            Err(e) => {
                tracing::warn!("Version lookup for {} failed: {}", package, e);
                ManifestEntry::new(package)
            }
        }
    }))
    .boxed()
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Manifest without a registry round trip.
pub fn unpinned_manifest(modules: &[String]) -> Vec<ManifestEntry> {
    let mut entries: Vec<ManifestEntry> = modules
        .iter()
        .map(|module| ManifestEntry::new(distribution_name(module)))
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
