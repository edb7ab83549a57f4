//! Error types for mapping bootstrap

use thiserror::Error;

/// Result type for bootstrap operations
pub type Result<T> = std::result::Result<T, BootError>;

/// Bootstrap errors
#[derive(Error, Debug)]
pub enum BootError {
    #[error("Unrecognized JPA orm.xml XSD version : `{version}`")]
    UnrecognizedVersion { version: String },

    #[error("Unknown mapping namespace: {0}")]
    UnknownNamespace(String),

    #[error(
        "orm.xml version cannot be determined from namespace {namespace}; \
         a version attribute is required"
    )]
    AmbiguousVersion { namespace: String },

    #[error("Not a mapping document: {0}")]
    NotAMappingDocument(String),

    #[error("XSD resource not found: {resource}")]
    ResourceNotFound { resource: String },

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Type definition already registered: {name}")]
    DuplicateTypeDefinition { name: String },

    #[error("Invalid value for setting {name}: {value}")]
    InvalidSetting { name: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}
