//! Install configuration as seen by downstream assets.
//!
//! Schema validation lives with the install-config asset itself; this is the
//! narrow slice the manifests need plus the serialized text they embed.

use serde::{Deserialize, Serialize};

use crate::asset::File;
use crate::error::{ManifestError, Result};

pub const INSTALL_CONFIG_FILENAME: &str = "install-config.yml";

const MASTER_POOL: &str = "master";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallConfig {
    pub metadata: ObjectMeta,
    #[serde(rename = "clusterID")]
    pub cluster_id: String,
    pub base_domain: String,
    pub pull_secret: String,
    #[serde(default)]
    pub machines: Vec<MachinePool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachinePool {
    pub name: String,
    #[serde(default)]
    pub replicas: Option<u32>,
}

impl InstallConfig {
    /// Replicas of the master pool. An unset count means a single master.
    pub fn master_count(&self) -> u32 {
        self.machines
            .iter()
            .find(|m| m.name == MASTER_POOL)
            .and_then(|m| m.replicas)
            .unwrap_or(1)
    }
}

/// Resolved install-config asset: parsed config plus the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfigAsset {
    pub config: InstallConfig,
    file: File,
}

impl InstallConfigAsset {
    pub fn from_config(config: InstallConfig) -> Result<Self> {
        let data = serde_yaml::to_string(&config).map_err(|source| ManifestError::Serialize {
            artifact: INSTALL_CONFIG_FILENAME,
            source,
        })?;
        Ok(Self {
            config,
            file: File::new(INSTALL_CONFIG_FILENAME, data),
        })
    }

    /// Keeps the original bytes verbatim so downstream embeds the exact text.
    pub fn from_yaml(data: impl Into<Vec<u8>>) -> Result<Self> {
        let data = data.into();
        let config: InstallConfig = serde_yaml::from_slice(&data)
            .map_err(|e| ManifestError::InstallConfig(e.to_string()))?;
        Ok(Self {
            config,
            file: File::new(INSTALL_CONFIG_FILENAME, data),
        })
    }

    pub fn file(&self) -> &File {
        &self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"metadata:
  name: test
clusterID: 0f4b0c8e-1d9a-4a43-9b8c-2f6f2b1f6d11
baseDomain: example.com
pullSecret: '{"auths":{}}'
machines:
- name: master
  replicas: 3
- name: worker
  replicas: 2
"#;

    #[test]
    fn test_master_count_from_pool() {
        let asset = InstallConfigAsset::from_yaml(SAMPLE).unwrap();
        assert_eq!(asset.config.master_count(), 3);
        assert_eq!(asset.config.metadata.name, "test");
    }

    #[test]
    fn test_master_count_defaults_to_one() {
        let mut asset = InstallConfigAsset::from_yaml(SAMPLE).unwrap();
        asset.config.machines.retain(|m| m.name != "master");
        assert_eq!(asset.config.master_count(), 1);
    }

    #[test]
    fn test_from_yaml_keeps_bytes_verbatim() {
        let asset = InstallConfigAsset::from_yaml(SAMPLE).unwrap();
        assert_eq!(asset.file().data, SAMPLE.as_bytes());
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = InstallConfigAsset::from_yaml("metadata: [").unwrap_err();
        assert!(matches!(err, ManifestError::InstallConfig(_)));
    }
}
