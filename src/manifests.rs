//! Manifests asset - the common cluster manifests fed to bootkube.
//!
//! Either generated from resolved parents or reloaded from `manifests/`.
//! A node materializes once; a re-run needs a fresh node.

use crate::asset::{Asset, AssetId, File, WritableAsset};
use crate::bootkube::{bootkube_files, manifest_path, MANIFEST_DIR};
use crate::config_object::ConfigurationObject;
use crate::error::{ManifestError, Result};
use crate::hashing::files_digest;
use crate::parents::Parents;
use crate::store::FileFetcher;
use crate::template_data::BootkubeTemplateData;
use crate::templates::TemplateCatalog;

pub const KUBE_SYS_CONFIG_FILENAME: &str = "cluster-config.yaml";

const KUBE_SYS_CONFIG_ARTIFACT: &str = "kube-system/cluster-config-v1 configmap";

const DEPENDENCIES: &[AssetId] = &[
    AssetId::InstallConfig,
    AssetId::NetworkOperator,
    AssetId::RootCa,
    AssetId::EtcdCa,
    AssetId::IngressCertKey,
    AssetId::KubeCa,
    AssetId::ServiceServingCa,
    AssetId::EtcdClientCertKey,
    AssetId::McsCertKey,
    AssetId::KubeletCertKey,
];

pub fn kube_sys_config_path() -> String {
    manifest_path(KUBE_SYS_CONFIG_FILENAME)
}

/// Generates the dependent operator config files.
pub struct Manifests<'c> {
    catalog: &'c TemplateCatalog,
    kube_sys_config: Option<ConfigurationObject>,
    file_list: Vec<File>,
}

impl<'c> Manifests<'c> {
    pub fn new(catalog: &'c TemplateCatalog) -> Self {
        Self {
            catalog,
            kube_sys_config: None,
            file_list: vec![],
        }
    }

    pub fn kube_sys_config(&self) -> Option<&ConfigurationObject> {
        self.kube_sys_config.as_ref()
    }

    pub fn is_materialized(&self) -> bool {
        self.kube_sys_config.is_some()
    }

    fn ensure_unmaterialized(&self) -> Result<()> {
        if self.is_materialized() {
            return Err(ManifestError::AlreadyMaterialized(self.name()));
        }
        Ok(())
    }

    fn store(&mut self, kube_sys_config: ConfigurationObject, files: Vec<File>) {
        tracing::info!(
            "{} materialized: {} files, digest {}",
            self.name(),
            files.len(),
            files_digest(&files)
        );
        self.kube_sys_config = Some(kube_sys_config);
        self.file_list = files;
    }
}

impl Asset for Manifests<'_> {
    fn name(&self) -> &'static str {
        "Common Manifests"
    }

    fn dependencies(&self) -> &'static [AssetId] {
        DEPENDENCIES
    }

    fn generate(&mut self, parents: &Parents) -> Result<()> {
        self.ensure_unmaterialized()?;

        let network = parents.network_operator()?;
        let install_config = parents.install_config()?;

        // network operator and install config go to the kube-system config map
        let kube_sys_config = ConfigurationObject::cluster_config(
            String::from_utf8_lossy(network.data()).into_owned(),
            String::from_utf8_lossy(&install_config.file().data).into_owned(),
        );
        let kube_sys_config_data =
            serde_yaml::to_string(&kube_sys_config).map_err(|source| ManifestError::Serialize {
                artifact: KUBE_SYS_CONFIG_ARTIFACT,
                source,
            })?;

        let template_data = BootkubeTemplateData::assemble(parents)?;

        let mut files = vec![File::new(kube_sys_config_path(), kube_sys_config_data)];
        files.extend(bootkube_files(self.catalog, &template_data)?);

        self.store(kube_sys_config, files);
        Ok(())
    }
}

impl WritableAsset for Manifests<'_> {
    fn files(&self) -> &[File] {
        &self.file_list
    }

    fn load(&mut self, fetcher: &dyn FileFetcher) -> Result<bool> {
        self.ensure_unmaterialized()?;

        let mut file_list = fetcher.fetch_by_pattern(&format!("{}/*", MANIFEST_DIR))?;
        if file_list.is_empty() {
            return Ok(false);
        }

        let path = kube_sys_config_path();
        let Some(position) = file_list.iter().position(|f| f.filename == path) else {
            tracing::warn!(
                "{} has {} files but no {}, regenerating",
                MANIFEST_DIR,
                file_list.len(),
                KUBE_SYS_CONFIG_FILENAME
            );
            return Ok(false);
        };

        let kube_sys_config: ConfigurationObject =
            serde_yaml::from_slice(&file_list[position].data).map_err(|source| {
                ManifestError::Deserialize {
                    path: path.clone(),
                    source,
                }
            })?;

        // cluster config leads the list, like a generated set
        let config_file = file_list.remove(position);
        file_list.insert(0, config_file);

        self.store(kube_sys_config, file_list);
        Ok(true)
    }
}
