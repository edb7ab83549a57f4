//! Bootstrap-time service registry

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::boot::type_codes::sql_types;

/// What the target dialect prefers when nothing is configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialectProfile {
    /// Dialect name, informational only
    #[serde(default = "default_dialect_name")]
    pub name: String,

    /// Type code the dialect uses for booleans
    #[serde(default = "default_boolean_type_code")]
    pub preferred_boolean_type_code: i32,
}

fn default_dialect_name() -> String {
    "generic".to_string()
}

fn default_boolean_type_code() -> i32 {
    sql_types::BOOLEAN
}

impl Default for DialectProfile {
    fn default() -> Self {
        Self {
            name: default_dialect_name(),
            preferred_boolean_type_code: default_boolean_type_code(),
        }
    }
}

/// Configuration settings and dialect information shared by a build
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    settings: HashMap<String, String>,
    dialect: DialectProfile,
}

impl ServiceRegistry {
    pub fn new(settings: HashMap<String, String>, dialect: DialectProfile) -> Self {
        Self { settings, dialect }
    }

    /// Raw value of a configuration setting
    pub fn setting(&self, name: &str) -> Option<&str> {
        self.settings.get(name).map(String::as_str)
    }

    pub fn settings(&self) -> &HashMap<String, String> {
        &self.settings
    }

    pub fn dialect(&self) -> &DialectProfile {
        &self.dialect
    }

    /// Builder-style setting override
    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(name.into(), value.into());
        self
    }
}
