//! Mapping defaults
//!
//! Values applied when a mapping omits them. A mapping document may declare
//! its own defaults (`default-cascade`, `schema`, ...); those are expressed as
//! a [`MappingDefaultsOverride`] laid over the enclosing defaults.

use serde::{Deserialize, Serialize};

/// Defaults in effect for a context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDefaults {
    #[serde(default)]
    pub implicit_schema: Option<String>,

    #[serde(default)]
    pub implicit_catalog: Option<String>,

    #[serde(default)]
    pub implicit_package: Option<String>,

    #[serde(default = "default_id_column")]
    pub implicit_id_column: String,

    #[serde(default = "default_discriminator_column")]
    pub implicit_discriminator_column: String,

    #[serde(default = "default_tenant_id_column")]
    pub implicit_tenant_id_column: String,

    #[serde(default = "default_cascade_style")]
    pub cascade_style: String,

    #[serde(default = "default_property_accessor")]
    pub property_accessor: String,

    #[serde(default = "default_true")]
    pub auto_import: bool,

    #[serde(default = "default_true")]
    pub entities_implicitly_lazy: bool,

    #[serde(default = "default_true")]
    pub collections_implicitly_lazy: bool,
}

fn default_id_column() -> String {
    "id".to_string()
}

fn default_discriminator_column() -> String {
    "class".to_string()
}

fn default_tenant_id_column() -> String {
    "tenant_id".to_string()
}

fn default_cascade_style() -> String {
    "none".to_string()
}

fn default_property_accessor() -> String {
    "property".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for MappingDefaults {
    fn default() -> Self {
        Self {
            implicit_schema: None,
            implicit_catalog: None,
            implicit_package: None,
            implicit_id_column: default_id_column(),
            implicit_discriminator_column: default_discriminator_column(),
            implicit_tenant_id_column: default_tenant_id_column(),
            cascade_style: default_cascade_style(),
            property_accessor: default_property_accessor(),
            auto_import: true,
            entities_implicitly_lazy: true,
            collections_implicitly_lazy: true,
        }
    }
}

/// Document-level defaults; unset fields inherit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDefaultsOverride {
    pub schema: Option<String>,
    pub catalog: Option<String>,
    pub package: Option<String>,
    pub cascade_style: Option<String>,
    pub property_accessor: Option<String>,
    pub auto_import: Option<bool>,
    pub lazy: Option<bool>,
}

impl MappingDefaultsOverride {
    /// Lay these values over `base`
    pub fn apply(&self, base: &MappingDefaults) -> MappingDefaults {
        let mut merged = base.clone();
        if let Some(schema) = &self.schema {
            merged.implicit_schema = Some(schema.clone());
        }
        if let Some(catalog) = &self.catalog {
            merged.implicit_catalog = Some(catalog.clone());
        }
        if let Some(package) = &self.package {
            merged.implicit_package = Some(package.clone());
        }
        if let Some(cascade) = &self.cascade_style {
            merged.cascade_style = cascade.clone();
        }
        if let Some(accessor) = &self.property_accessor {
            merged.property_accessor = accessor.clone();
        }
        if let Some(auto_import) = self.auto_import {
            merged.auto_import = auto_import;
        }
        // hbm.xml default-lazy covers both entities and collections
        if let Some(lazy) = self.lazy {
            merged.entities_implicitly_lazy = lazy;
            merged.collections_implicitly_lazy = lazy;
        }
        merged
    }
}
