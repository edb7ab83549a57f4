//! Mapping Bootstrap
//!
//! The metadata-bootstrapping slice of an object-relational mapper: the
//! context in which metadata is built from mapping sources, and the registry
//! of XSDs used to identify and validate mapping documents.
//!
//! ## Features
//!
//! - **XSD Registry**: Fixed table of `orm.xml` (1.0 – 3.1) and `hbm.xml` XSDs
//! - **Document Identification**: Picks the XSD for a document from its root
//!   namespace and `version` attribute
//! - **Building Context**: Hierarchical context (global → unit → document →
//!   mapping) with local overrides and delegation to the enclosing scope
//! - **Configuration**: Options, mapping defaults and settings from TOML and
//!   environment variables
//!
//! ## Architecture
//!
//! ```text
//! xsd/
//! ├── descriptor   XsdDescriptor, OrmVersion
//! ├── support      MappingXsdSupport (the registry)
//! ├── document     root-element sniffing
//! └── resolver     loading XSD resources
//! boot/
//! ├── context      BuildingContext
//! ├── collector    InFlightMetadataCollector
//! ├── naming       ObjectNameNormalizer
//! ├── type_def     TypeDefinitionRegistry
//! └── type_codes   preferred SQL type codes
//! ```

pub mod boot;
pub mod checksum;
pub mod config;
pub mod error;
pub mod scan;
pub mod xsd;

pub use boot::{BootstrapContext, BuildingContext, ContextScope, RootCollaborators};
pub use checksum::Checksum;
pub use config::BootstrapConfig;
pub use error::{BootError, Result};
pub use xsd::{MappingDocumentHeader, MappingXsdSupport, OrmVersion, XsdDescriptor};
