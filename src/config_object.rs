//! The kube-system/cluster-config-v1 config map.

use serde::{Deserialize, Serialize};

pub const CLUSTER_CONFIG_NAMESPACE: &str = "kube-system";
pub const CLUSTER_CONFIG_NAME: &str = "cluster-config-v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationObject {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMetadata,
    pub data: ClusterConfigData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub namespace: String,
    pub name: String,
}

/// Exactly the two payloads this config map carries, stored as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfigData {
    #[serde(rename = "network-config")]
    pub network_config: String,
    #[serde(rename = "install-config")]
    pub install_config: String,
}

impl ConfigurationObject {
    pub fn config_map(namespace: &str, name: &str, data: ClusterConfigData) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            metadata: ObjectMetadata {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            data,
        }
    }

    pub fn cluster_config(network_config: String, install_config: String) -> Self {
        Self::config_map(
            CLUSTER_CONFIG_NAMESPACE,
            CLUSTER_CONFIG_NAME,
            ClusterConfigData {
                network_config,
                install_config,
            },
        )
    }
}
