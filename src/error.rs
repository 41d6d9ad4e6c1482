//! Error taxonomy for manifest generation and reload.

use thiserror::Error;

use crate::asset::AssetId;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Dependency not resolved: {0}")]
    MissingDependency(AssetId),

    #[error("Dependency {id} did not resolve to {expected}")]
    DependencyMismatch { id: AssetId, expected: &'static str },

    #[error("Failed to create {artifact}")]
    Serialize {
        artifact: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to unmarshal {path}")]
    Deserialize {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid install config: {0}")]
    InstallConfig(String),

    /// Template and data disagree. Never a runtime condition.
    #[error("Template defect in {template}: {message}")]
    TemplateDefect { template: String, message: String },

    #[error("Template defect: no template named {0}")]
    UnknownTemplate(String),

    #[error("{0} is already materialized")]
    AlreadyMaterialized(&'static str),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("File fetch error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ManifestError {
    /// True for programming defects (template/data mismatches) as opposed to
    /// conditions a caller could react to.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            ManifestError::TemplateDefect { .. } | ManifestError::UnknownTemplate(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;
