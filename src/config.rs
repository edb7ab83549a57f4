//! Configuration management for mapping bootstrap
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (bootstrap.toml)
//! - Environment variables (BOOTSTRAP__*)
//!
//! ## Example config file (bootstrap.toml):
//! ```toml
//! [options]
//! global_quoted_identifiers = false
//! naming_strategy = "snake_case"
//!
//! [defaults]
//! implicit_schema = "app"
//! cascade_style = "none"
//!
//! [dialect]
//! name = "h2"
//! preferred_boolean_type_code = 16
//!
//! [settings.hibernate.type]
//! preferred_boolean_jdbc_type = "BIT"
//!
//! [xsd]
//! resource_root = "./xsd"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use config_crate::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::boot::{
    BootstrapContext, BuildingOptions, DialectProfile, MappingDefaults, ServiceRegistry,
};
use crate::error::Result;
use crate::xsd::DirectoryXsdResolver;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub options: BuildingOptions,

    #[serde(default)]
    pub defaults: MappingDefaults,

    #[serde(default)]
    pub dialect: DialectProfile,

    /// Free-form settings; nested tables become dotted names
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub xsd: XsdConfig,
}

/// Where XSD resources are loaded from
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct XsdConfig {
    #[serde(default)]
    pub resource_root: Option<PathBuf>,
}

impl BootstrapConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, adding a specific (required) file on top
    pub fn load_from(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_locations = [
            "bootstrap.toml",
            ".bootstrap.toml",
            "config/bootstrap.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        let project_dirs = directories::ProjectDirs::from("dev", "familiar", "mapping-bootstrap");
        if let Some(config_dir) = project_dirs {
            let xdg_config = config_dir.config_dir().join("bootstrap.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("BOOTSTRAP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Settings flattened to `dotted.name = value`
    pub fn flattened_settings(&self) -> HashMap<String, String> {
        let mut flat = HashMap::new();
        for (key, value) in &self.settings {
            flatten_setting(key, value, &mut flat);
        }
        flat
    }

    pub fn service_registry(&self) -> ServiceRegistry {
        ServiceRegistry::new(self.flattened_settings(), self.dialect.clone())
    }

    pub fn bootstrap_context(&self) -> BootstrapContext {
        BootstrapContext::new(self.service_registry())
    }

    /// Resolver for the configured XSD resource root, if any
    pub fn xsd_resolver(&self) -> Option<DirectoryXsdResolver> {
        self.xsd.resource_root.clone().map(DirectoryXsdResolver::new)
    }
}

fn flatten_setting(prefix: &str, value: &serde_json::Value, out: &mut HashMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, nested) in map {
                flatten_setting(&format!("{}.{}", prefix, key), nested, out);
            }
        }
        serde_json::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        serde_json::Value::Null => {}
        other => {
            out.insert(prefix.to_string(), other.to_string());
        }
    }
}
