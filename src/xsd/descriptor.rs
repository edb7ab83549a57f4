//! XSD descriptors and the closed set of orm.xml versions

use serde::Serialize;
use std::fmt;

/// Identity of a mapping XSD: where it is loaded from, its version label and
/// its target namespace.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
pub struct XsdDescriptor {
    resource: &'static str,
    version: &'static str,
    namespace: &'static str,
}

impl XsdDescriptor {
    pub(crate) const fn new(
        resource: &'static str,
        version: &'static str,
        namespace: &'static str,
    ) -> Self {
        Self { resource, version, namespace }
    }

    /// Resource path of the XSD (relative to a resolver root)
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    /// Version label, e.g. "2.1"
    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Target namespace URI
    pub fn namespace_uri(&self) -> &'static str {
        self.namespace
    }
}

impl fmt::Display for XsdDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} @ {})", self.resource, self.version, self.namespace)
    }
}

/// orm.xml versions known to the registry.
///
/// This is a closed enumeration: labels are matched literally, never parsed
/// as numbers, so "2.10" or "3.2" are simply unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OrmVersion {
    V1_0,
    V2_0,
    V2_1,
    V2_2,
    V3_0,
    V3_1,
}

impl OrmVersion {
    /// All versions in table order
    pub const ALL: [OrmVersion; 6] = [
        OrmVersion::V1_0,
        OrmVersion::V2_0,
        OrmVersion::V2_1,
        OrmVersion::V2_2,
        OrmVersion::V3_0,
        OrmVersion::V3_1,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "1.0" => Some(OrmVersion::V1_0),
            "2.0" => Some(OrmVersion::V2_0),
            "2.1" => Some(OrmVersion::V2_1),
            "2.2" => Some(OrmVersion::V2_2),
            "3.0" => Some(OrmVersion::V3_0),
            "3.1" => Some(OrmVersion::V3_1),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrmVersion::V1_0 => "1.0",
            OrmVersion::V2_0 => "2.0",
            OrmVersion::V2_1 => "2.1",
            OrmVersion::V2_2 => "2.2",
            OrmVersion::V3_0 => "3.0",
            OrmVersion::V3_1 => "3.1",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for OrmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mapping document formats with a known XSD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingFormat {
    /// JPA / Jakarta `orm.xml`
    Orm(OrmVersion),
    /// Hibernate `hbm.xml` (legacy-mapping XSD)
    HbmXml,
    /// Pre-XSD `hibernate-mapping` namespace
    HibernateMapping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_exactly() {
        for version in OrmVersion::ALL {
            assert_eq!(OrmVersion::from_label(version.label()), Some(version));
        }
    }

    #[test]
    fn test_labels_are_not_parsed_numerically() {
        assert_eq!(OrmVersion::from_label("2.10"), None);
        assert_eq!(OrmVersion::from_label("3"), None);
        assert_eq!(OrmVersion::from_label(" 2.1"), None);
        assert_eq!(OrmVersion::from_label("3.0:"), None);
    }

    #[test]
    fn test_index_follows_table_order() {
        let indexes: Vec<usize> = OrmVersion::ALL.iter().map(|v| v.index()).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4, 5]);
    }
}
