//! Network operator output consumed by the manifests.

/// Serialized network operator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkOperatorConfig {
    data: Vec<u8>,
}

impl NetworkOperatorConfig {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
