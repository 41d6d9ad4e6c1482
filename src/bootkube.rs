//! Bootkube artifact set - rendered templates plus static manifests.

use crate::asset::File;
use crate::error::Result;
use crate::template_data::BootkubeTemplateData;
use crate::templates::{TemplateCatalog, BOOTKUBE_TEMPLATES, STATIC_MANIFESTS};

/// Directory every manifest lives under.
pub const MANIFEST_DIR: &str = "manifests";

pub fn manifest_path(name: &str) -> String {
    format!("{}/{}", MANIFEST_DIR, name)
}

/// Render every bootkube template and append the static manifests, in table
/// order.
pub fn bootkube_files(catalog: &TemplateCatalog, data: &BootkubeTemplateData) -> Result<Vec<File>> {
    let mut files = Vec::with_capacity(BOOTKUBE_TEMPLATES.len() + STATIC_MANIFESTS.len());

    for (name, _) in BOOTKUBE_TEMPLATES {
        let rendered = catalog.render(name, data)?;
        tracing::debug!("Rendered {} ({} bytes)", name, rendered.len());
        files.push(File::new(manifest_path(name), rendered));
    }

    for (name, content) in STATIC_MANIFESTS {
        files.push(File::new(manifest_path(name), content.as_bytes()));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template_data::TECTONIC_NETWORK_OPERATOR_IMAGE;
    use std::collections::HashSet;

    fn sample_data() -> BootkubeTemplateData {
        BootkubeTemplateData {
            base64encode_cloud_provider_config: String::new(),
            etcd_ca_cert: "ZXRjZC1jYQ==".into(),
            etcd_client_cert: "ZXRjZC1jbGllbnQ=".into(),
            etcd_client_key: "a2V5".into(),
            kube_ca_cert: "a3ViZQ==".into(),
            kube_ca_key: "a2V5".into(),
            mcs_tls_cert: "bWNz".into(),
            mcs_tls_key: "a2V5".into(),
            pull_secret: "e30=".into(),
            root_ca_cert: "cm9vdA==".into(),
            service_serving_ca_cert: "c3Zj".into(),
            service_serving_ca_key: "a2V5".into(),
            tectonic_network_operator_image: TECTONIC_NETWORK_OPERATOR_IMAGE.into(),
            cvo_cluster_id: "cluster-id".into(),
            etcd_endpoint_hostnames: vec!["test-etcd-0".into(), "test-etcd-1".into()],
            etcd_endpoint_dns_suffix: "example.com".into(),
        }
    }

    #[test]
    fn test_every_manifest_under_dir_with_unique_path() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let files = bootkube_files(&catalog, &sample_data()).unwrap();

        assert_eq!(files.len(), BOOTKUBE_TEMPLATES.len() + STATIC_MANIFESTS.len());
        let paths: HashSet<_> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(paths.len(), files.len());
        assert!(files.iter().all(|f| f.filename.starts_with("manifests/")));
    }

    #[test]
    fn test_static_manifests_copied_verbatim() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let files = bootkube_files(&catalog, &sample_data()).unwrap();
        let etcd_service = files
            .iter()
            .find(|f| f.filename == "manifests/etcd-service.yaml")
            .unwrap();
        let (_, expected) = STATIC_MANIFESTS
            .iter()
            .find(|(n, _)| *n == "etcd-service.yaml")
            .unwrap();
        assert_eq!(etcd_service.data, expected.as_bytes());
    }

    #[test]
    fn test_endpoints_list_every_hostname() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let files = bootkube_files(&catalog, &sample_data()).unwrap();
        let endpoints = files
            .iter()
            .find(|f| f.filename == "manifests/etcd-service-endpoints.yaml")
            .unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_slice(&endpoints.data).unwrap();
        let addresses = doc["subsets"][0]["addresses"].as_sequence().unwrap();
        let hosts: Vec<_> = addresses
            .iter()
            .map(|a| a["hostname"].as_str().unwrap())
            .collect();
        assert_eq!(hosts, vec!["test-etcd-0", "test-etcd-1"]);
        assert_eq!(
            doc["metadata"]["annotations"]["alpha.installer.openshift.io/dns-suffix"],
            "example.com"
        );
    }

    #[test]
    fn test_pull_secret_is_valid_json() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let files = bootkube_files(&catalog, &sample_data()).unwrap();
        let pull = files.iter().find(|f| f.filename == "manifests/pull.json").unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&pull.data).unwrap();
        assert_eq!(doc["data"][".dockerconfigjson"], "e30=");
    }
}
