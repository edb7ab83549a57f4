//! Mapping document sniffing
//!
//! Only the root element is of interest: its name, namespace and `version`
//! attribute are enough to pick the XSD a document must be validated against.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Root-element facts of a mapping document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDocumentHeader {
    /// Local name of the root element (`entity-mappings`, `hibernate-mapping`)
    pub root_name: String,
    /// Namespace of the root element, if any
    pub namespace: Option<String>,
    /// Value of the root `version` attribute, if any
    pub version: Option<String>,
}

impl MappingDocumentHeader {
    pub fn new(
        root_name: impl Into<String>,
        namespace: Option<&str>,
        version: Option<&str>,
    ) -> Self {
        Self {
            root_name: root_name.into(),
            namespace: namespace.map(String::from),
            version: version.map(String::from),
        }
    }

    /// Parse the header out of XML text
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse_with_options(
            xml,
            roxmltree::ParsingOptions { allow_dtd: true, ..Default::default() },
        )?;
        let root = doc.root_element();
        let tag = root.tag_name();

        Ok(Self::new(tag.name(), tag.namespace(), root.attribute("version")))
    }

    /// Read and parse a document from disk
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_orm_header() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<entity-mappings xmlns="https://jakarta.ee/xml/ns/persistence/orm" version="3.1">
    <package>org.example</package>
</entity-mappings>"#;
        let header = MappingDocumentHeader::parse(xml).unwrap();
        assert_eq!(header.root_name, "entity-mappings");
        assert_eq!(header.namespace.as_deref(), Some("https://jakarta.ee/xml/ns/persistence/orm"));
        assert_eq!(header.version.as_deref(), Some("3.1"));
    }

    #[test]
    fn test_parse_dtd_hbm_header() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE hibernate-mapping PUBLIC
    "-//Hibernate/Hibernate Mapping DTD 3.0//EN"
    "http://www.hibernate.org/dtd/hibernate-mapping-3.0.dtd">
<hibernate-mapping package="org.example">
    <class name="Item"/>
</hibernate-mapping>"#;
        let header = MappingDocumentHeader::parse(xml).unwrap();
        assert_eq!(header.root_name, "hibernate-mapping");
        assert_eq!(header.namespace, None);
        assert_eq!(header.version, None);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(MappingDocumentHeader::parse("<entity-mappings>").is_err());
    }
}
