//! Template Catalog - bootkube templates compiled once, shared by reference.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::{ManifestError, Result};

/// Templated bootkube manifests. The template name is the output file name.
pub const BOOTKUBE_TEMPLATES: &[(&str, &str)] = &[
    ("kube-cloud-config.yaml", include_str!("../templates/bootkube/kube-cloud-config.yaml")),
    (
        "machine-config-server-tls-secret.yaml",
        include_str!("../templates/bootkube/machine-config-server-tls-secret.yaml"),
    ),
    (
        "openshift-service-signer-secret.yaml",
        include_str!("../templates/bootkube/openshift-service-signer-secret.yaml"),
    ),
    ("pull.json", include_str!("../templates/bootkube/pull.json")),
    (
        "tectonic-network-operator.yaml",
        include_str!("../templates/bootkube/tectonic-network-operator.yaml"),
    ),
    ("cvo-overrides.yaml", include_str!("../templates/bootkube/cvo-overrides.yaml")),
    ("legacy-cvo-overrides.yaml", include_str!("../templates/bootkube/legacy-cvo-overrides.yaml")),
    (
        "etcd-service-endpoints.yaml",
        include_str!("../templates/bootkube/etcd-service-endpoints.yaml"),
    ),
    (
        "kube-system-configmap-etcd-serving-ca.yaml",
        include_str!("../templates/bootkube/kube-system-configmap-etcd-serving-ca.yaml"),
    ),
    (
        "kube-system-configmap-root-ca.yaml",
        include_str!("../templates/bootkube/kube-system-configmap-root-ca.yaml"),
    ),
    (
        "kube-system-secret-etcd-client.yaml",
        include_str!("../templates/bootkube/kube-system-secret-etcd-client.yaml"),
    ),
];

/// Manifests copied verbatim.
pub const STATIC_MANIFESTS: &[(&str, &str)] = &[
    ("01-tectonic-namespace.yaml", include_str!("../templates/static/01-tectonic-namespace.yaml")),
    (
        "03-openshift-web-console-namespace.yaml",
        include_str!("../templates/static/03-openshift-web-console-namespace.yaml"),
    ),
    (
        "04-openshift-machine-config-operator.yaml",
        include_str!("../templates/static/04-openshift-machine-config-operator.yaml"),
    ),
    (
        "05-openshift-cluster-api-namespace.yaml",
        include_str!("../templates/static/05-openshift-cluster-api-namespace.yaml"),
    ),
    (
        "09-openshift-service-signer-namespace.yaml",
        include_str!("../templates/static/09-openshift-service-signer-namespace.yaml"),
    ),
    ("app-version-kind.yaml", include_str!("../templates/static/app-version-kind.yaml")),
    (
        "app-version-tectonic-network.yaml",
        include_str!("../templates/static/app-version-tectonic-network.yaml"),
    ),
    ("etcd-service.yaml", include_str!("../templates/static/etcd-service.yaml")),
];

/// Compiled templates. Immutable once built.
pub struct TemplateCatalog {
    sources: BTreeMap<String, String>,
    tera: Tera,
}

impl TemplateCatalog {
    /// Compile the embedded bootkube templates.
    pub fn builtin() -> Result<Self> {
        let sources = BOOTKUBE_TEMPLATES
            .iter()
            .map(|(name, body)| (name.to_string(), body.to_string()))
            .collect();
        Self::compile(sources)
    }

    /// Replace built-in template bodies with same-named files from `dir`.
    /// Files that match no template are ignored.
    pub fn with_overrides_from_dir(self, dir: &Path) -> Result<Self> {
        let mut sources = self.sources;
        if dir.exists() {
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if !path.is_file() {
                    continue;
                }
                let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                    continue;
                };
                match sources.get_mut(&name) {
                    Some(body) => {
                        *body = fs::read_to_string(&path)?;
                        tracing::debug!("Template {} overridden from {}", name, path.display());
                    }
                    None => tracing::warn!("Ignoring {}: no template named {}", path.display(), name),
                }
            }
        }
        Self::compile(sources)
    }

    fn compile(sources: BTreeMap<String, String>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(sources.iter().map(|(n, b)| (n.as_str(), b.as_str())))
            .map_err(|e| ManifestError::TemplateDefect {
                template: "<catalog>".to_string(),
                message: describe(&e),
            })?;
        tracing::debug!("Compiled {} templates", sources.len());
        Ok(Self { sources, tera })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.contains_key(name)
    }

    /// Render one template. Any failure here is a template/data mismatch and
    /// comes back as a defect.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Vec<u8>> {
        if !self.contains(name) {
            return Err(ManifestError::UnknownTemplate(name.to_string()));
        }
        let defect = |e: tera::Error| ManifestError::TemplateDefect {
            template: name.to_string(),
            message: describe(&e),
        };
        let context = Context::from_serialize(data).map_err(defect)?;
        let rendered = self.tera.render(name, &context).map_err(defect)?;
        Ok(rendered.into_bytes())
    }
}

/// Tera nests the useful part of an error in its source chain.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
