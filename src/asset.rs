//! Asset contract - declared dependencies, generate, load.
//!
//! An asset either generates its files from already-resolved parents or
//! reloads them from storage. Both paths end in the same state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parents::Parents;
use crate::store::FileFetcher;

/// Stable identifier for every asset kind in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetId {
    InstallConfig,
    NetworkOperator,
    RootCa,
    EtcdCa,
    IngressCertKey,
    KubeCa,
    ServiceServingCa,
    EtcdClientCertKey,
    McsCertKey,
    KubeletCertKey,
    Manifests,
}

impl AssetId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetId::InstallConfig => "install-config",
            AssetId::NetworkOperator => "network-operator",
            AssetId::RootCa => "root-ca",
            AssetId::EtcdCa => "etcd-ca",
            AssetId::IngressCertKey => "ingress-cert-key",
            AssetId::KubeCa => "kube-ca",
            AssetId::ServiceServingCa => "service-serving-ca",
            AssetId::EtcdClientCertKey => "etcd-client-cert-key",
            AssetId::McsCertKey => "mcs-cert-key",
            AssetId::KubeletCertKey => "kubelet-cert-key",
            AssetId::Manifests => "manifests",
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pathed byte blob. Identity is the relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub filename: String,
    pub data: Vec<u8>,
}

impl File {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// A node in the asset graph.
pub trait Asset {
    /// Human friendly name
    fn name(&self) -> &'static str;

    /// Assets that must be resolved before `generate` runs. Static and
    /// side-effect free.
    fn dependencies(&self) -> &'static [AssetId];

    /// Build this asset from its resolved parents.
    fn generate(&mut self, parents: &Parents) -> Result<()>;
}

/// An asset whose output is a set of files that can be persisted and reloaded.
pub trait WritableAsset: Asset {
    fn files(&self) -> &[File];

    /// Rebuild state from storage. `Ok(false)` means nothing usable was found
    /// and the caller should generate instead.
    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_display_matches_serde() {
        let id = AssetId::EtcdClientCertKey;
        let yaml = serde_yaml::to_string(&id).unwrap();
        assert_eq!(yaml.trim(), id.to_string());
    }
}
