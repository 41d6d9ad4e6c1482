//! Typed registry of resolved parent assets.
//!
//! Resolution order belongs to the caller. An asset only reads from
//! `Parents`, it never resolves anything itself.

use std::collections::BTreeMap;

use crate::asset::AssetId;
use crate::error::{ManifestError, Result};
use crate::installconfig::InstallConfigAsset;
use crate::network::NetworkOperatorConfig;
use crate::tls::CertKey;

/// Output of an already materialized upstream asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    InstallConfig(InstallConfigAsset),
    NetworkOperator(NetworkOperatorConfig),
    CertKey(CertKey),
}

impl Resolved {
    fn kind(&self) -> &'static str {
        match self {
            Resolved::InstallConfig(_) => "install config",
            Resolved::NetworkOperator(_) => "network operator config",
            Resolved::CertKey(_) => "cert/key pair",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Parents {
    assets: BTreeMap<AssetId, Resolved>,
}

impl Parents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AssetId, asset: Resolved) {
        self.assets.insert(id, asset);
    }

    pub fn contains(&self, id: AssetId) -> bool {
        self.assets.contains_key(&id)
    }

    fn get(&self, id: AssetId) -> Result<&Resolved> {
        self.assets.get(&id).ok_or(ManifestError::MissingDependency(id))
    }

    pub fn install_config(&self) -> Result<&InstallConfigAsset> {
        match self.get(AssetId::InstallConfig)? {
            Resolved::InstallConfig(asset) => Ok(asset),
            _ => Err(ManifestError::DependencyMismatch {
                id: AssetId::InstallConfig,
                expected: "install config",
            }),
        }
    }

    pub fn network_operator(&self) -> Result<&NetworkOperatorConfig> {
        match self.get(AssetId::NetworkOperator)? {
            Resolved::NetworkOperator(config) => Ok(config),
            _ => Err(ManifestError::DependencyMismatch {
                id: AssetId::NetworkOperator,
                expected: "network operator config",
            }),
        }
    }

    pub fn cert_key(&self, id: AssetId) -> Result<&CertKey> {
        match self.get(id)? {
            Resolved::CertKey(pair) => Ok(pair),
            other => {
                tracing::debug!("{} resolved to {}, expected cert/key", id, other.kind());
                Err(ManifestError::DependencyMismatch {
                    id,
                    expected: "cert/key pair",
                })
            }
        }
    }
}

/// Supplies every requested dependency already materialized, or fails.
pub trait Resolver {
    fn resolve(&self, ids: &[AssetId]) -> Result<Parents>;
}

/// Resolver over a fixed set of upstream outputs.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    available: Parents,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: AssetId, asset: Resolved) -> Self {
        self.available.insert(id, asset);
        self
    }
}

impl Resolver for StaticResolver {
    fn resolve(&self, ids: &[AssetId]) -> Result<Parents> {
        let mut parents = Parents::new();
        for &id in ids {
            let asset = self.available.get(id)?;
            parents.insert(id, asset.clone());
        }
        tracing::debug!("Resolved {} dependencies", ids.len());
        Ok(parents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kube_ca() -> Resolved {
        Resolved::CertKey(CertKey::new("kube-ca-cert", "kube-ca-key"))
    }

    #[test]
    fn test_resolve_returns_only_requested() {
        let resolver = StaticResolver::new()
            .with(AssetId::KubeCa, kube_ca())
            .with(AssetId::EtcdCa, Resolved::CertKey(CertKey::cert_only("etcd")));

        let parents = resolver.resolve(&[AssetId::KubeCa]).unwrap();
        assert!(parents.contains(AssetId::KubeCa));
        assert!(!parents.contains(AssetId::EtcdCa));
        assert_eq!(parents.cert_key(AssetId::KubeCa).unwrap().key(), b"kube-ca-key");
    }

    #[test]
    fn test_resolve_fails_entirely_on_missing() {
        let resolver = StaticResolver::new().with(AssetId::KubeCa, kube_ca());
        let err = resolver
            .resolve(&[AssetId::KubeCa, AssetId::RootCa])
            .unwrap_err();
        assert!(matches!(err, ManifestError::MissingDependency(AssetId::RootCa)));
    }

    #[test]
    fn test_wrong_kind_is_mismatch() {
        let mut parents = Parents::new();
        parents.insert(AssetId::NetworkOperator, kube_ca());
        let err = parents.network_operator().unwrap_err();
        assert!(matches!(
            err,
            ManifestError::DependencyMismatch { id: AssetId::NetworkOperator, .. }
        ));
    }
}
