//! XSD support for `hbm.xml` and `orm.xml` mapping documents

pub mod descriptor;
pub mod document;
pub mod resolver;
pub mod support;

pub use descriptor::{MappingFormat, OrmVersion, XsdDescriptor};
pub use document::MappingDocumentHeader;
pub use resolver::{DirectoryXsdResolver, LoadedXsd, XsdResolver};
pub use support::{
    MappingXsdSupport, HBM_NAMESPACE, HIBERNATE_MAPPING_NAMESPACE, JAKARTA_NAMESPACE,
    JCP_NAMESPACE, JPA_LEGACY_NAMESPACE,
};
