//! Options governing a metadata build

use serde::{Deserialize, Serialize};

use crate::boot::naming::{PhysicalNamingStrategy, SnakeCaseNamingStrategy, StandardNamingStrategy};

/// Physical naming strategy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategyKind {
    /// Names are used as written
    #[default]
    Standard,
    /// CamelCase names become snake_case
    SnakeCase,
}

impl NamingStrategyKind {
    pub fn strategy(&self) -> Box<dyn PhysicalNamingStrategy> {
        match self {
            NamingStrategyKind::Standard => Box::new(StandardNamingStrategy),
            NamingStrategyKind::SnakeCase => Box::new(SnakeCaseNamingStrategy),
        }
    }
}

/// Immutable snapshot of the options for one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingOptions {
    /// Quote every database identifier
    #[serde(default)]
    pub global_quoted_identifiers: bool,

    /// Quote identifiers that collide with SQL keywords
    #[serde(default = "default_true")]
    pub auto_quote_keywords: bool,

    #[serde(default)]
    pub naming_strategy: NamingStrategyKind,

    /// Whether XML mapping documents are processed at all
    #[serde(default = "default_true")]
    pub xml_mapping_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for BuildingOptions {
    fn default() -> Self {
        Self {
            global_quoted_identifiers: false,
            auto_quote_keywords: true,
            naming_strategy: NamingStrategyKind::Standard,
            xml_mapping_enabled: true,
        }
    }
}
