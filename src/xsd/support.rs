//! Mapping XSD registry
//!
//! Authoritative table of the XSDs for Hibernate's `hbm.xml` and JPA's
//! `orm.xml`, with version and namespace resolution on top.

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::error::{BootError, Result};
use crate::xsd::descriptor::{MappingFormat, OrmVersion, XsdDescriptor};
use crate::xsd::document::MappingDocumentHeader;
use crate::xsd::resolver::{LoadedXsd, XsdResolver};

/// Namespace shared by orm.xml 1.0 and 2.0
pub const JPA_LEGACY_NAMESPACE: &str = "http://java.sun.com/xml/ns/persistence/orm";
/// Namespace shared by orm.xml 2.1 and 2.2
pub const JCP_NAMESPACE: &str = "http://xmlns.jcp.org/xml/ns/persistence/orm";
/// Namespace shared by orm.xml 3.0 and 3.1
pub const JAKARTA_NAMESPACE: &str = "https://jakarta.ee/xml/ns/persistence/orm";
/// Namespace of the `hbm.xml` legacy-mapping XSD
pub const HBM_NAMESPACE: &str = "http://www.hibernate.org/xsd/orm/hbm";
/// Namespace of the `hibernate-mapping` XSD
pub const HIBERNATE_MAPPING_NAMESPACE: &str = "http://www.hibernate.org/xsd/hibernate-mapping";

const ORM_ROOT: &str = "entity-mappings";
const HBM_ROOT: &str = "hibernate-mapping";

/// Version treated as current when nothing else decides
const LATEST: OrmVersion = OrmVersion::V2_2;

static SHARED: Lazy<MappingXsdSupport> = Lazy::new(MappingXsdSupport::new);

/// Registry of mapping XSD descriptors.
///
/// The table is fixed at construction and never mutated, so one instance can
/// be shared freely across threads. Every lookup returns a reference into the
/// table: repeated lookups yield the same descriptor instance.
#[derive(Debug)]
pub struct MappingXsdSupport {
    orm: [XsdDescriptor; 6],
    hbm_xml: XsdDescriptor,
    hibernate_mapping_xml: XsdDescriptor,
}

impl MappingXsdSupport {
    pub fn new() -> Self {
        let registry = Self {
            orm: [
                XsdDescriptor::new("org/hibernate/jpa/orm_1_0.xsd", "1.0", JPA_LEGACY_NAMESPACE),
                XsdDescriptor::new("org/hibernate/jpa/orm_2_0.xsd", "2.0", JPA_LEGACY_NAMESPACE),
                XsdDescriptor::new("org/hibernate/jpa/orm_2_1.xsd", "2.1", JCP_NAMESPACE),
                XsdDescriptor::new("org/hibernate/jpa/orm_2_2.xsd", "2.2", JCP_NAMESPACE),
                XsdDescriptor::new("org/hibernate/jpa/orm_3_0.xsd", "3.0", JAKARTA_NAMESPACE),
                XsdDescriptor::new("org/hibernate/jpa/orm_3_1.xsd", "3.1", JAKARTA_NAMESPACE),
            ],
            hbm_xml: XsdDescriptor::new(
                "org/hibernate/xsd/mapping/legacy-mapping-4.0.xsd",
                "4.0",
                HBM_NAMESPACE,
            ),
            hibernate_mapping_xml: XsdDescriptor::new(
                "org/hibernate/hibernate-mapping-4.0.xsd",
                "4.0",
                HIBERNATE_MAPPING_NAMESPACE,
            ),
        };
        debug!(descriptors = registry.descriptors().count(), "mapping XSD registry built");
        registry
    }

    /// Process-wide instance, built on first access
    pub fn shared() -> &'static MappingXsdSupport {
        &SHARED
    }

    /// The descriptor treated as default / most current.
    ///
    /// This is a policy choice and not necessarily the highest version in the
    /// table.
    pub fn latest_descriptor(&self) -> &XsdDescriptor {
        self.orm_descriptor(LATEST)
    }

    /// Whether `uri` is the namespace shared by orm.xml 1.0 and 2.0, in which
    /// case the version has to come from somewhere other than the namespace.
    pub fn is_version_namespace_ambiguous(&self, uri: &str) -> bool {
        self.orm_descriptor(OrmVersion::V1_0).namespace_uri() == uri
    }

    pub fn is_recognized_version(&self, version: &str) -> bool {
        OrmVersion::from_label(version).is_some()
    }

    /// Descriptor for an orm.xml version label
    pub fn descriptor_for_version(&self, version: &str) -> Result<&XsdDescriptor> {
        OrmVersion::from_label(version)
            .map(|v| self.orm_descriptor(v))
            .ok_or_else(|| BootError::UnrecognizedVersion {
                version: version.to_string(),
            })
    }

    pub fn orm_descriptor(&self, version: OrmVersion) -> &XsdDescriptor {
        &self.orm[version.index()]
    }

    /// Descriptor for `hbm.xml` documents
    pub fn legacy_mapping_descriptor(&self) -> &XsdDescriptor {
        &self.hbm_xml
    }

    pub fn hibernate_mapping_descriptor(&self) -> &XsdDescriptor {
        &self.hibernate_mapping_xml
    }

    pub fn descriptor(&self, format: MappingFormat) -> &XsdDescriptor {
        match format {
            MappingFormat::Orm(version) => self.orm_descriptor(version),
            MappingFormat::HbmXml => &self.hbm_xml,
            MappingFormat::HibernateMapping => &self.hibernate_mapping_xml,
        }
    }

    /// All descriptors in table order, legacy formats last
    pub fn descriptors(&self) -> impl Iterator<Item = &XsdDescriptor> {
        self.orm
            .iter()
            .chain([&self.hbm_xml, &self.hibernate_mapping_xml])
    }

    pub fn descriptors_for_namespace<'s>(
        &'s self,
        uri: &'s str,
    ) -> impl Iterator<Item = &'s XsdDescriptor> + 's {
        self.descriptors().filter(move |d| d.namespace_uri() == uri)
    }

    pub fn is_known_namespace(&self, uri: &str) -> bool {
        self.descriptors_for_namespace(uri).next().is_some()
    }

    /// Pick the XSD a mapping document has to be validated against.
    ///
    /// An explicit `version` attribute wins for orm.xml documents. Without one
    /// the namespace decides, which fails for the namespace shared by 1.0 and
    /// 2.0.
    pub fn identify(&self, header: &MappingDocumentHeader) -> Result<&XsdDescriptor> {
        let namespace = match header.namespace.as_deref() {
            Some(ns) => ns,
            None if header.root_name == HBM_ROOT => return Ok(&self.hibernate_mapping_xml),
            None => return Err(BootError::NotAMappingDocument(header.root_name.clone())),
        };

        if namespace == HBM_NAMESPACE || namespace == HIBERNATE_MAPPING_NAMESPACE {
            if header.root_name != HBM_ROOT {
                return Err(BootError::NotAMappingDocument(header.root_name.clone()));
            }
            return Ok(if namespace == HBM_NAMESPACE {
                &self.hbm_xml
            } else {
                &self.hibernate_mapping_xml
            });
        }
        if !self.orm.iter().any(|d| d.namespace_uri() == namespace) {
            return Err(BootError::UnknownNamespace(namespace.to_string()));
        }
        if header.root_name != ORM_ROOT {
            return Err(BootError::NotAMappingDocument(header.root_name.clone()));
        }

        match header.version.as_deref() {
            Some(version) => {
                let descriptor = self.descriptor_for_version(version)?;
                if descriptor.namespace_uri() != namespace {
                    warn!(
                        version,
                        declared = namespace,
                        expected = descriptor.namespace_uri(),
                        "orm.xml version does not match its namespace; trusting the version"
                    );
                }
                Ok(descriptor)
            }
            None if self.is_version_namespace_ambiguous(namespace) => {
                Err(BootError::AmbiguousVersion {
                    namespace: namespace.to_string(),
                })
            }
            None => self
                .orm
                .iter()
                .rev()
                .find(|d| d.namespace_uri() == namespace)
                .ok_or_else(|| BootError::UnknownNamespace(namespace.to_string())),
        }
    }

    /// Load the XSD behind a descriptor
    pub fn load<'d>(
        &self,
        descriptor: &'d XsdDescriptor,
        resolver: &dyn XsdResolver,
    ) -> Result<LoadedXsd<'d>> {
        let content = resolver.resolve(descriptor.resource())?;
        debug!(resource = descriptor.resource(), bytes = content.len(), "loaded XSD");
        Ok(LoadedXsd::new(descriptor, content))
    }
}

impl Default for MappingXsdSupport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapResolver(HashMap<&'static str, &'static str>);

    impl XsdResolver for MapResolver {
        fn resolve(&self, resource: &str) -> Result<Vec<u8>> {
            self.0
                .get(resource)
                .map(|s| s.as_bytes().to_vec())
                .ok_or_else(|| BootError::ResourceNotFound {
                    resource: resource.to_string(),
                })
        }
    }

    #[test]
    fn test_every_label_maps_to_its_own_descriptor() {
        let support = MappingXsdSupport::new();
        for version in OrmVersion::ALL {
            let descriptor = support.descriptor_for_version(version.label()).unwrap();
            assert_eq!(descriptor.version(), version.label());
        }
    }

    #[test]
    fn test_jakarta_versions_are_reachable() {
        let support = MappingXsdSupport::new();
        assert_eq!(
            support.descriptor_for_version("3.0").unwrap().resource(),
            "org/hibernate/jpa/orm_3_0.xsd"
        );
        assert_eq!(
            support.descriptor_for_version("3.1").unwrap().resource(),
            "org/hibernate/jpa/orm_3_1.xsd"
        );
        assert!(support.descriptor_for_version("3.0:").is_err());
    }

    #[test]
    fn test_latest_is_policy_not_maximum() {
        let support = MappingXsdSupport::new();
        assert_eq!(support.latest_descriptor().version(), "2.2");
        assert!(support.is_recognized_version("3.1"));
    }

    #[test]
    fn test_descriptors_for_namespace() {
        let support = MappingXsdSupport::new();
        let versions: Vec<_> = support
            .descriptors_for_namespace(JCP_NAMESPACE)
            .map(|d| d.version())
            .collect();
        assert_eq!(versions, vec!["2.1", "2.2"]);
        assert!(!support.is_known_namespace("urn:unknown"));
    }

    #[test]
    fn test_identify_without_version_uses_newest_in_namespace() {
        let support = MappingXsdSupport::new();
        let header = MappingDocumentHeader::new(ORM_ROOT, Some(JAKARTA_NAMESPACE), None);
        assert_eq!(support.identify(&header).unwrap().version(), "3.1");
    }

    #[test]
    fn test_identify_ambiguous_namespace_requires_version() {
        let support = MappingXsdSupport::new();
        let header = MappingDocumentHeader::new(ORM_ROOT, Some(JPA_LEGACY_NAMESPACE), None);
        assert!(matches!(
            support.identify(&header),
            Err(BootError::AmbiguousVersion { .. })
        ));

        let header = MappingDocumentHeader::new(ORM_ROOT, Some(JPA_LEGACY_NAMESPACE), Some("1.0"));
        assert_eq!(support.identify(&header).unwrap().version(), "1.0");
    }

    #[test]
    fn test_identify_version_namespace_mismatch_trusts_version() {
        let support = MappingXsdSupport::new();
        let header = MappingDocumentHeader::new(ORM_ROOT, Some(JCP_NAMESPACE), Some("3.0"));
        assert_eq!(support.identify(&header).unwrap().version(), "3.0");
    }

    #[test]
    fn test_identify_rejects_wrong_root() {
        let support = MappingXsdSupport::new();
        let header = MappingDocumentHeader::new("persistence", Some(JCP_NAMESPACE), Some("2.2"));
        assert!(matches!(
            support.identify(&header),
            Err(BootError::NotAMappingDocument(_))
        ));
    }

    #[test]
    fn test_identify_legacy_namespace_requires_mapping_root() {
        let support = MappingXsdSupport::new();
        for namespace in [HBM_NAMESPACE, HIBERNATE_MAPPING_NAMESPACE] {
            let header = MappingDocumentHeader::new("persistence", Some(namespace), None);
            match support.identify(&header) {
                Err(BootError::NotAMappingDocument(root)) => assert_eq!(root, "persistence"),
                other => panic!("expected NotAMappingDocument, got {:?}", other),
            }
        }

        let header = MappingDocumentHeader::new("hibernate-mapping", Some(HBM_NAMESPACE), None);
        assert!(std::ptr::eq(
            support.identify(&header).unwrap(),
            support.legacy_mapping_descriptor()
        ));
    }

    #[test]
    fn test_load_checksums_content() {
        let support = MappingXsdSupport::new();
        let resolver = MapResolver(HashMap::from([(
            "org/hibernate/jpa/orm_2_2.xsd",
            "<xsd:schema/>",
        )]));

        let loaded = support.load(support.latest_descriptor(), &resolver).unwrap();
        assert!(std::ptr::eq(loaded.descriptor, support.latest_descriptor()));
        assert!(loaded.checksum.verify(b"<xsd:schema/>"));

        let missing = support.load(support.legacy_mapping_descriptor(), &resolver);
        assert!(matches!(missing, Err(BootError::ResourceNotFound { .. })));
    }

    #[test]
    fn test_loaded_xsd_outlives_registry_borrow() {
        let resolver = MapResolver(HashMap::from([(
            "org/hibernate/jpa/orm_2_2.xsd",
            "<xsd:schema/>",
        )]));
        let descriptor = MappingXsdSupport::shared().latest_descriptor();

        let loaded = {
            let local = MappingXsdSupport::new();
            local.load(descriptor, &resolver).unwrap()
        };
        assert!(std::ptr::eq(loaded.descriptor, descriptor));
    }
}
