//! Preferred SQL type codes
//!
//! The preferred codes for booleans and durations are pure functions of the
//! configuration held by a [`ServiceRegistry`]. A setting may name the type
//! either numerically (`"-7"`) or by constant name (`"BIT"`).

use tracing::warn;

use crate::boot::service::ServiceRegistry;
use crate::error::{BootError, Result};

/// Setting overriding the SQL type used for booleans
pub const PREFERRED_BOOLEAN_JDBC_TYPE: &str = "hibernate.type.preferred_boolean_jdbc_type";
/// Setting overriding the SQL type used for durations
pub const PREFERRED_DURATION_JDBC_TYPE: &str = "hibernate.type.preferred_duration_jdbc_type";

/// JDBC type codes
pub mod sql_types {
    pub const BIT: i32 = -7;
    pub const TINYINT: i32 = -6;
    pub const SMALLINT: i32 = 5;
    pub const INTEGER: i32 = 4;
    pub const BIGINT: i32 = -5;
    pub const FLOAT: i32 = 6;
    pub const REAL: i32 = 7;
    pub const DOUBLE: i32 = 8;
    pub const NUMERIC: i32 = 2;
    pub const DECIMAL: i32 = 3;
    pub const CHAR: i32 = 1;
    pub const VARCHAR: i32 = 12;
    pub const BOOLEAN: i32 = 16;
    pub const INTERVAL_SECOND: i32 = 3100;

    pub(crate) const NAMED: [(&str, i32); 14] = [
        ("BIT", BIT),
        ("TINYINT", TINYINT),
        ("SMALLINT", SMALLINT),
        ("INTEGER", INTEGER),
        ("BIGINT", BIGINT),
        ("FLOAT", FLOAT),
        ("REAL", REAL),
        ("DOUBLE", DOUBLE),
        ("NUMERIC", NUMERIC),
        ("DECIMAL", DECIMAL),
        ("CHAR", CHAR),
        ("VARCHAR", VARCHAR),
        ("BOOLEAN", BOOLEAN),
        ("INTERVAL_SECOND", INTERVAL_SECOND),
    ];
}

/// Duration fallback when nothing is configured
const DEFAULT_DURATION_TYPE_CODE: i32 = sql_types::INTERVAL_SECOND;

/// Interpret a type-code setting value
pub fn resolve_type_code(name: &str, value: &str) -> Result<i32> {
    let value = value.trim();
    if let Ok(code) = value.parse::<i32>() {
        return Ok(code);
    }
    sql_types::NAMED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(value))
        .map(|(_, code)| *code)
        .ok_or_else(|| BootError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn configured_type_code(registry: &ServiceRegistry, setting: &str) -> Option<i32> {
    let value = registry.setting(setting)?;
    match resolve_type_code(setting, value) {
        Ok(code) => Some(code),
        Err(e) => {
            warn!(error = %e, "ignoring preferred type setting");
            None
        }
    }
}

/// SQL type code to use for booleans: the configured override, else the
/// dialect's preference
pub fn preferred_sql_type_code_for_boolean(registry: &ServiceRegistry) -> i32 {
    configured_type_code(registry, PREFERRED_BOOLEAN_JDBC_TYPE)
        .unwrap_or(registry.dialect().preferred_boolean_type_code)
}

/// SQL type code to use for durations: the configured override, else
/// INTERVAL_SECOND
pub fn preferred_sql_type_code_for_duration(registry: &ServiceRegistry) -> i32 {
    configured_type_code(registry, PREFERRED_DURATION_JDBC_TYPE)
        .unwrap_or(DEFAULT_DURATION_TYPE_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::service::DialectProfile;
    use std::collections::HashMap;

    #[test]
    fn test_resolve_by_number_and_name() {
        assert_eq!(resolve_type_code("x", "-7").unwrap(), sql_types::BIT);
        assert_eq!(resolve_type_code("x", "tinyint").unwrap(), sql_types::TINYINT);
        assert_eq!(
            resolve_type_code("x", " INTERVAL_SECOND ").unwrap(),
            sql_types::INTERVAL_SECOND
        );
        assert!(resolve_type_code("x", "BOOL").is_err());
    }

    #[test]
    fn test_boolean_defaults_to_dialect() {
        let dialect = DialectProfile {
            name: "legacy".to_string(),
            preferred_boolean_type_code: sql_types::BIT,
        };
        let registry = ServiceRegistry::new(HashMap::new(), dialect);
        assert_eq!(preferred_sql_type_code_for_boolean(&registry), sql_types::BIT);
    }

    #[test]
    fn test_boolean_override() {
        let registry = ServiceRegistry::default().with_setting(PREFERRED_BOOLEAN_JDBC_TYPE, "CHAR");
        assert_eq!(preferred_sql_type_code_for_boolean(&registry), sql_types::CHAR);
    }

    #[test]
    fn test_duration_fallback_and_override() {
        let registry = ServiceRegistry::default();
        assert_eq!(preferred_sql_type_code_for_duration(&registry), sql_types::INTERVAL_SECOND);

        let registry = registry.with_setting(PREFERRED_DURATION_JDBC_TYPE, "2");
        assert_eq!(preferred_sql_type_code_for_duration(&registry), sql_types::NUMERIC);
    }

    #[test]
    fn test_invalid_setting_falls_back() {
        let registry =
            ServiceRegistry::default().with_setting(PREFERRED_DURATION_JDBC_TYPE, "weeks");
        assert_eq!(preferred_sql_type_code_for_duration(&registry), sql_types::INTERVAL_SECOND);
    }
}
