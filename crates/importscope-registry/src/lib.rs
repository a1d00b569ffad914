//! Package-registry version lookup for dependency manifests
//!
//! The scanner never needs this crate; it is consulted only when a manifest
//! of third-party modules should carry pinned versions.

pub mod lookup;
pub mod providers;
pub mod cache;
pub mod resolve;


pub use lookup::{VersionLookup, RegistryError};
pub use providers::create_registry;
pub use cache::{CachedLookup, LookupCache};
pub use resolve::{distribution_name, resolve_manifest, unpinned_manifest};
