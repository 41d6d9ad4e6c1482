//! Template data - the flat, text-only record every bootkube template reads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::asset::AssetId;
use crate::error::Result;
use crate::parents::Parents;

pub const TECTONIC_NETWORK_OPERATOR_IMAGE: &str =
    "quay.io/coreos/tectonic-network-operator-dev:375423a332f2c12b79438fc6a6da6e448e28ec0f";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootkubeTemplateData {
    // FIXME: cloud provider config is not wired up yet, always empty
    pub base64encode_cloud_provider_config: String,
    pub etcd_ca_cert: String,
    pub etcd_client_cert: String,
    pub etcd_client_key: String,
    pub kube_ca_cert: String,
    pub kube_ca_key: String,
    pub mcs_tls_cert: String,
    pub mcs_tls_key: String,
    pub pull_secret: String,
    pub root_ca_cert: String,
    pub service_serving_ca_cert: String,
    pub service_serving_ca_key: String,
    pub tectonic_network_operator_image: String,
    pub cvo_cluster_id: String,
    pub etcd_endpoint_hostnames: Vec<String>,
    pub etcd_endpoint_dns_suffix: String,
}

impl BootkubeTemplateData {
    /// Extract and encode everything the templates need. Parents are only read.
    pub fn assemble(parents: &Parents) -> Result<Self> {
        let install = &parents.install_config()?.config;
        let etcd_ca = parents.cert_key(AssetId::EtcdCa)?;
        let etcd_client = parents.cert_key(AssetId::EtcdClientCertKey)?;
        let kube_ca = parents.cert_key(AssetId::KubeCa)?;
        let mcs = parents.cert_key(AssetId::McsCertKey)?;
        let root_ca = parents.cert_key(AssetId::RootCa)?;
        let service_serving_ca = parents.cert_key(AssetId::ServiceServingCa)?;

        Ok(Self {
            base64encode_cloud_provider_config: String::new(),
            etcd_ca_cert: STANDARD.encode(etcd_ca.cert()),
            etcd_client_cert: STANDARD.encode(etcd_client.cert()),
            etcd_client_key: STANDARD.encode(etcd_client.key()),
            kube_ca_cert: STANDARD.encode(kube_ca.cert()),
            kube_ca_key: STANDARD.encode(kube_ca.key()),
            mcs_tls_cert: STANDARD.encode(mcs.cert()),
            mcs_tls_key: STANDARD.encode(mcs.key()),
            pull_secret: STANDARD.encode(install.pull_secret.as_bytes()),
            root_ca_cert: STANDARD.encode(root_ca.cert()),
            service_serving_ca_cert: STANDARD.encode(service_serving_ca.cert()),
            service_serving_ca_key: STANDARD.encode(service_serving_ca.key()),
            tectonic_network_operator_image: TECTONIC_NETWORK_OPERATOR_IMAGE.to_string(),
            cvo_cluster_id: install.cluster_id.clone(),
            etcd_endpoint_hostnames: etcd_endpoint_hostnames(
                &install.metadata.name,
                install.master_count(),
            ),
            etcd_endpoint_dns_suffix: install.base_domain.clone(),
        })
    }
}

/// `<cluster>-etcd-<i>` for every master replica.
pub fn etcd_endpoint_hostnames(cluster_name: &str, master_count: u32) -> Vec<String> {
    (0..master_count)
        .map(|i| format!("{}-etcd-{}", cluster_name, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostnames_example() {
        assert_eq!(
            etcd_endpoint_hostnames("test", 3),
            vec!["test-etcd-0", "test-etcd-1", "test-etcd-2"]
        );
    }

    #[test]
    fn test_hostname_count_matches_master_count() {
        for n in 1..=7 {
            let hosts = etcd_endpoint_hostnames("c", n);
            assert_eq!(hosts.len(), n as usize);
            for (i, host) in hosts.iter().enumerate() {
                assert_eq!(host, &format!("c-etcd-{}", i));
            }
        }
    }

    #[test]
    fn test_assemble_requires_certs() {
        let parents = Parents::new();
        assert!(BootkubeTemplateData::assemble(&parents).is_err());
    }
}
