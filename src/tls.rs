//! Certificate and key material handed over by the TLS assets.
//!
//! Issuance happens elsewhere; downstream only reads the PEM bytes.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertKey {
    cert: Vec<u8>,
    key: Option<Vec<u8>>,
}

impl CertKey {
    pub fn new(cert: impl Into<Vec<u8>>, key: impl Into<Vec<u8>>) -> Self {
        Self {
            cert: cert.into(),
            key: Some(key.into()),
        }
    }

    /// A CA published without its private key.
    pub fn cert_only(cert: impl Into<Vec<u8>>) -> Self {
        Self {
            cert: cert.into(),
            key: None,
        }
    }

    pub fn cert(&self) -> &[u8] {
        &self.cert
    }

    /// Empty when the asset carries no key.
    pub fn key(&self) -> &[u8] {
        self.key.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cert_only_has_empty_key() {
        let ca = CertKey::cert_only("-----BEGIN CERTIFICATE-----");
        assert!(ca.key().is_empty());
        assert_eq!(ca.cert(), b"-----BEGIN CERTIFICATE-----");
    }
}
