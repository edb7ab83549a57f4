//! Metadata building context
//!
//! The context in which metadata is built out of mapping sources. Contexts
//! are hierarchical and get more specific going down:
//!
//! ```text
//! global -> persistence unit -> document -> mapping
//! ```
//!
//! The root holds every collaborator. A nested context holds a reference to
//! its enclosing context plus whatever it overrides locally (mapping
//! defaults, type definitions, contributor name); anything it does not
//! override is answered by the enclosing context.
//!
//! Contexts only borrow their collaborators. Whoever drives the build owns
//! them and must keep them alive for as long as the contexts are in use.

use std::borrow::Cow;

use tracing::debug;

use crate::boot::bootstrap::BootstrapContext;
use crate::boot::collector::InFlightMetadataCollector;
use crate::boot::defaults::MappingDefaults;
use crate::boot::naming::ObjectNameNormalizer;
use crate::boot::options::BuildingOptions;
use crate::boot::type_codes;
use crate::boot::type_def::TypeDefinitionRegistry;

/// How specific a context is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextScope {
    Global,
    PersistenceUnit,
    Document,
    Mapping,
}

/// Collaborators held by the root context
#[derive(Debug)]
pub struct RootCollaborators<'a> {
    pub bootstrap: &'a BootstrapContext,
    pub options: &'a BuildingOptions,
    pub mapping_defaults: &'a MappingDefaults,
    pub collector: &'a InFlightMetadataCollector,
    pub normalizer: &'a ObjectNameNormalizer,
    pub type_definitions: &'a TypeDefinitionRegistry<'a>,
}

#[derive(Debug)]
enum Enclosing<'a> {
    Root(RootCollaborators<'a>),
    Parent(&'a BuildingContext<'a>),
}

#[derive(Debug, Default)]
struct Overrides<'a> {
    mapping_defaults: Option<&'a MappingDefaults>,
    type_definitions: Option<&'a TypeDefinitionRegistry<'a>>,
    contributor: Option<Cow<'a, str>>,
}

/// Read-mostly access to what is needed while translating mapping sources
/// into metadata.
#[derive(Debug)]
pub struct BuildingContext<'a> {
    scope: ContextScope,
    enclosing: Enclosing<'a>,
    overrides: Overrides<'a>,
}

impl<'a> BuildingContext<'a> {
    /// The outermost context of a build
    pub fn root(
        collaborators: RootCollaborators<'a>,
        contributor: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self {
            scope: ContextScope::Global,
            enclosing: Enclosing::Root(collaborators),
            overrides: Overrides {
                contributor: Some(contributor.into()),
                ..Overrides::default()
            },
        }
    }

    /// A narrower context delegating to this one
    pub fn nested<'b>(&'b self, scope: ContextScope) -> BuildingContext<'b> {
        debug!(
            ?scope,
            depth = self.depth() + 1,
            contributor = self.current_contributor_name(),
            "nested building context"
        );
        BuildingContext {
            scope,
            enclosing: Enclosing::Parent(self),
            overrides: Overrides::default(),
        }
    }

    pub fn with_mapping_defaults(mut self, defaults: &'a MappingDefaults) -> Self {
        self.overrides.mapping_defaults = Some(defaults);
        self
    }

    pub fn with_type_definitions(mut self, registry: &'a TypeDefinitionRegistry<'a>) -> Self {
        self.overrides.type_definitions = Some(registry);
        self
    }

    pub fn with_contributor(mut self, contributor: impl Into<Cow<'a, str>>) -> Self {
        self.overrides.contributor = Some(contributor.into());
        self
    }

    pub fn scope(&self) -> ContextScope {
        self.scope
    }

    /// The enclosing context, `None` for the root
    pub fn parent(&self) -> Option<&'a BuildingContext<'a>> {
        match &self.enclosing {
            Enclosing::Root(_) => None,
            Enclosing::Parent(parent) => Some(*parent),
        }
    }

    /// Number of enclosing contexts
    pub fn depth(&self) -> usize {
        self.parent().map_or(0, |p| p.depth() + 1)
    }

    pub fn bootstrap_context(&self) -> &'a BootstrapContext {
        match &self.enclosing {
            Enclosing::Root(root) => root.bootstrap,
            Enclosing::Parent(parent) => parent.bootstrap_context(),
        }
    }

    /// Options specified for the build
    pub fn building_options(&self) -> &'a BuildingOptions {
        match &self.enclosing {
            Enclosing::Root(root) => root.options,
            Enclosing::Parent(parent) => parent.building_options(),
        }
    }

    /// Mapping defaults in effect for this context
    pub fn mapping_defaults(&self) -> &'a MappingDefaults {
        if let Some(defaults) = self.overrides.mapping_defaults {
            return defaults;
        }
        match &self.enclosing {
            Enclosing::Root(root) => root.mapping_defaults,
            Enclosing::Parent(parent) => parent.mapping_defaults(),
        }
    }

    /// The collector of metadata as it is built
    pub fn metadata_collector(&self) -> &'a InFlightMetadataCollector {
        match &self.enclosing {
            Enclosing::Root(root) => root.collector,
            Enclosing::Parent(parent) => parent.metadata_collector(),
        }
    }

    pub fn object_name_normalizer(&self) -> &'a ObjectNameNormalizer {
        match &self.enclosing {
            Enclosing::Root(root) => root.normalizer,
            Enclosing::Parent(parent) => parent.object_name_normalizer(),
        }
    }

    pub fn type_definition_registry(&self) -> &'a TypeDefinitionRegistry<'a> {
        if let Some(registry) = self.overrides.type_definitions {
            return registry;
        }
        match &self.enclosing {
            Enclosing::Root(root) => root.type_definitions,
            Enclosing::Parent(parent) => parent.type_definition_registry(),
        }
    }

    /// Name of the contributor whose mappings are being processed
    pub fn current_contributor_name(&self) -> &str {
        if let Some(name) = &self.overrides.contributor {
            return name;
        }
        match &self.enclosing {
            Enclosing::Root(_) => "",
            Enclosing::Parent(parent) => parent.current_contributor_name(),
        }
    }

    pub fn preferred_sql_type_code_for_boolean(&self) -> i32 {
        type_codes::preferred_sql_type_code_for_boolean(self.bootstrap_context().service_registry())
    }

    pub fn preferred_sql_type_code_for_duration(&self) -> i32 {
        let registry = self.bootstrap_context().service_registry();
        type_codes::preferred_sql_type_code_for_duration(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::service::ServiceRegistry;
    use crate::boot::type_codes::{sql_types, PREFERRED_BOOLEAN_JDBC_TYPE};

    struct Fixture {
        bootstrap: BootstrapContext,
        options: BuildingOptions,
        defaults: MappingDefaults,
        collector: InFlightMetadataCollector,
        normalizer: ObjectNameNormalizer,
        types: TypeDefinitionRegistry<'static>,
    }

    impl Fixture {
        fn new() -> Self {
            let options = BuildingOptions::default();
            Self {
                bootstrap: BootstrapContext::new(
                    ServiceRegistry::default().with_setting(PREFERRED_BOOLEAN_JDBC_TYPE, "BIT"),
                ),
                normalizer: ObjectNameNormalizer::new(&options),
                options,
                defaults: MappingDefaults::default(),
                collector: InFlightMetadataCollector::new(),
                types: TypeDefinitionRegistry::new(),
            }
        }

        fn root(&self) -> BuildingContext<'_> {
            BuildingContext::root(
                RootCollaborators {
                    bootstrap: &self.bootstrap,
                    options: &self.options,
                    mapping_defaults: &self.defaults,
                    collector: &self.collector,
                    normalizer: &self.normalizer,
                    type_definitions: &self.types,
                },
                "core",
            )
        }
    }

    #[test]
    fn test_root_accessors() {
        let fixture = Fixture::new();
        let root = fixture.root();
        assert_eq!(root.scope(), ContextScope::Global);
        assert_eq!(root.depth(), 0);
        assert!(root.parent().is_none());
        assert_eq!(root.current_contributor_name(), "core");
        assert!(std::ptr::eq(root.mapping_defaults(), &fixture.defaults));
        assert_eq!(root.preferred_sql_type_code_for_boolean(), sql_types::BIT);
        assert_eq!(root.preferred_sql_type_code_for_duration(), sql_types::INTERVAL_SECOND);
    }

    #[test]
    fn test_nested_delegates_unless_overridden() {
        let fixture = Fixture::new();
        let root = fixture.root();
        let document_defaults = MappingDefaults {
            implicit_schema: Some("billing".to_string()),
            ..MappingDefaults::default()
        };

        let unit = root.nested(ContextScope::PersistenceUnit);
        let document = unit
            .nested(ContextScope::Document)
            .with_mapping_defaults(&document_defaults);
        let mapping = document.nested(ContextScope::Mapping).with_contributor("plugin");

        assert_eq!(mapping.depth(), 3);
        assert_eq!(mapping.current_contributor_name(), "plugin");
        assert_eq!(document.current_contributor_name(), "core");
        assert_eq!(mapping.mapping_defaults().implicit_schema.as_deref(), Some("billing"));
        assert_eq!(unit.mapping_defaults().implicit_schema, None);
        assert!(std::ptr::eq(mapping.metadata_collector(), &fixture.collector));
        assert!(std::ptr::eq(mapping.bootstrap_context(), &fixture.bootstrap));
        assert_eq!(mapping.preferred_sql_type_code_for_boolean(), sql_types::BIT);
    }

    #[test]
    fn test_parent_chain() {
        let fixture = Fixture::new();
        let root = fixture.root();
        let document = root.nested(ContextScope::Document);
        let mapping = document.nested(ContextScope::Mapping);

        let parent = mapping.parent().unwrap();
        assert_eq!(parent.scope(), ContextScope::Document);
        assert_eq!(parent.parent().unwrap().scope(), ContextScope::Global);
    }
}
