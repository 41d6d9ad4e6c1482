//! Bootkube Manifests - the common cluster manifests asset
//!
//! # Guarantees
//! 1. Parents are resolved before generate, never by the asset itself
//! 2. Output is a named, pathed set of files, cluster config first
//! 3. Generation is deterministic
//! 4. Load is all-or-nothing: the cluster config must parse or nothing is kept
//! 5. Template/data mismatches surface as defects, not runtime errors

pub mod asset;
pub mod bootkube;
pub mod config_object;
pub mod error;
pub mod hashing;
pub mod installconfig;
pub mod manifests;
pub mod network;
pub mod parents;
pub mod store;
pub mod template_data;
pub mod templates;
pub mod tls;

pub use asset::{Asset, AssetId, File, WritableAsset};
pub use config_object::{ClusterConfigData, ConfigurationObject};
pub use error::{ManifestError, Result};
pub use hashing::{files_digest, sha256_hex};
pub use installconfig::{InstallConfig, InstallConfigAsset};
pub use manifests::Manifests;
pub use network::NetworkOperatorConfig;
pub use parents::{Parents, Resolved, Resolver, StaticResolver};
pub use store::{DiskStore, FileFetcher, FileWriter};
pub use template_data::BootkubeTemplateData;
pub use templates::TemplateCatalog;
pub use tls::CertKey;
