//! Building context and the collaborators it exposes

pub mod bootstrap;
pub mod collector;
pub mod context;
pub mod defaults;
pub mod naming;
pub mod options;
pub mod service;
pub mod type_codes;
pub mod type_def;

pub use bootstrap::BootstrapContext;
pub use collector::{EntityBinding, InFlightMetadataCollector, NamedQueryDefinition};
pub use context::{BuildingContext, ContextScope, RootCollaborators};
pub use defaults::{MappingDefaults, MappingDefaultsOverride};
pub use naming::{
    Identifier, ObjectNameNormalizer, PhysicalNamingStrategy, SnakeCaseNamingStrategy,
    StandardNamingStrategy,
};
pub use options::{BuildingOptions, NamingStrategyKind};
pub use service::{DialectProfile, ServiceRegistry};
pub use type_codes::{
    preferred_sql_type_code_for_boolean, preferred_sql_type_code_for_duration, sql_types,
};
pub use type_def::{DuplicatePolicy, TypeDefinition, TypeDefinitionRegistry};
