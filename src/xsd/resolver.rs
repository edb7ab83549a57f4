//! Loading XSD resources named by descriptors

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checksum::Checksum;
use crate::error::{BootError, Result};
use crate::xsd::XsdDescriptor;

/// Source of XSD resource bytes
pub trait XsdResolver {
    /// Fetch the bytes of a resource path such as `org/hibernate/jpa/orm_2_2.xsd`
    fn resolve(&self, resource: &str) -> Result<Vec<u8>>;
}

/// Resolves resource paths below a root directory
#[derive(Debug, Clone)]
pub struct DirectoryXsdResolver {
    root: PathBuf,
}

impl DirectoryXsdResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl XsdResolver for DirectoryXsdResolver {
    fn resolve(&self, resource: &str) -> Result<Vec<u8>> {
        let path = self.root.join(resource);
        debug!(resource, path = %path.display(), "resolving XSD resource");

        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BootError::ResourceNotFound {
                resource: resource.to_string(),
            },
            _ => BootError::Io(e),
        })
    }
}

/// An XSD loaded through a resolver
#[derive(Debug)]
pub struct LoadedXsd<'r> {
    pub descriptor: &'r XsdDescriptor,
    pub content: Vec<u8>,
    pub checksum: Checksum,
}

impl<'r> LoadedXsd<'r> {
    pub(crate) fn new(descriptor: &'r XsdDescriptor, content: Vec<u8>) -> Self {
        let checksum = Checksum::from_bytes(&content);
        Self { descriptor, content, checksum }
    }

    /// Check the loaded content against a pinned checksum
    pub fn verify(&self, expected: &Checksum) -> Result<()> {
        if &self.checksum == expected {
            Ok(())
        } else {
            Err(BootError::ChecksumMismatch {
                expected: expected.to_string(),
                actual: self.checksum.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_directory_resolver_reads_nested_resource() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("org/hibernate/jpa");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("orm_2_2.xsd"), "<xsd:schema/>").unwrap();

        let resolver = DirectoryXsdResolver::new(dir.path());
        let bytes = resolver.resolve("org/hibernate/jpa/orm_2_2.xsd").unwrap();
        assert_eq!(bytes, b"<xsd:schema/>");
    }

    #[test]
    fn test_directory_resolver_missing_resource() {
        let dir = tempdir().unwrap();
        let resolver = DirectoryXsdResolver::new(dir.path());
        match resolver.resolve("org/hibernate/jpa/orm_9_9.xsd") {
            Err(BootError::ResourceNotFound { resource }) => {
                assert_eq!(resource, "org/hibernate/jpa/orm_9_9.xsd");
            }
            other => panic!("Expected ResourceNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_loaded_xsd_verify_pinned_checksum() {
        let descriptor = XsdDescriptor::new("org/hibernate/jpa/orm_2_2.xsd", "2.2", "urn:test");
        let loaded = LoadedXsd::new(&descriptor, b"<xsd:schema/>".to_vec());

        let pinned = Checksum::from(loaded.checksum.as_str().to_ascii_uppercase().as_str());
        assert!(loaded.verify(&pinned).is_ok());

        let stale = Checksum::from_bytes(b"<xsd:schema></xsd:schema>");
        match loaded.verify(&stale) {
            Err(BootError::ChecksumMismatch { expected, actual }) => {
                assert_eq!(expected, stale.to_string());
                assert_eq!(actual, Checksum::from_bytes(b"<xsd:schema/>").to_string());
            }
            other => panic!("Expected ChecksumMismatch, got {:?}", other),
        }
    }
}
