//! Object name normalization
//!
//! Applies quoting rules and the physical naming strategy to the names that
//! appear in mappings (tables, columns, sequences).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::boot::options::BuildingOptions;

/// Names that need no quoting in SQL
static PLAIN_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("identifier pattern is valid")
});

/// A database identifier and whether it is quoted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub text: String,
    pub quoted: bool,
}

impl Identifier {
    pub fn new(text: impl Into<String>, quoted: bool) -> Self {
        Self { text: text.into(), quoted }
    }

    /// Parse a name, recognising backtick and double-quote quoting
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        let quoted = name.len() >= 2
            && ((name.starts_with('`') && name.ends_with('`'))
                || (name.starts_with('"') && name.ends_with('"')));
        if quoted {
            Self::new(&name[1..name.len() - 1], true)
        } else {
            Self::new(name, false)
        }
    }

    /// Render for SQL, quoting with double quotes when needed
    pub fn render(&self) -> String {
        if self.quoted {
            format!("\"{}\"", self.text)
        } else {
            self.text.clone()
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Maps logical names to physical database names
pub trait PhysicalNamingStrategy: fmt::Debug {
    fn to_physical_table_name(&self, logical: &Identifier) -> Identifier;

    fn to_physical_column_name(&self, logical: &Identifier) -> Identifier;
}

/// Uses logical names unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardNamingStrategy;

impl PhysicalNamingStrategy for StandardNamingStrategy {
    fn to_physical_table_name(&self, logical: &Identifier) -> Identifier {
        logical.clone()
    }

    fn to_physical_column_name(&self, logical: &Identifier) -> Identifier {
        logical.clone()
    }
}

/// Turns `CamelCase` names into `camel_case`; quoted names are left alone
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseNamingStrategy;

impl SnakeCaseNamingStrategy {
    fn apply(logical: &Identifier) -> Identifier {
        if logical.quoted {
            return logical.clone();
        }
        Identifier::new(to_snake_case(&logical.text), false)
    }
}

impl PhysicalNamingStrategy for SnakeCaseNamingStrategy {
    fn to_physical_table_name(&self, logical: &Identifier) -> Identifier {
        Self::apply(logical)
    }

    fn to_physical_column_name(&self, logical: &Identifier) -> Identifier {
        Self::apply(logical)
    }
}

/// Convert a name to snake_case
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;

    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else if c == '-' || c == ' ' || c == '.' {
            result.push('_');
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }

    result
}

fn is_sql_keyword(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "all" | "and" | "as" | "between" | "by" | "case" | "check" | "column" |
        "constraint" | "create" | "cross" | "default" | "delete" | "distinct" |
        "drop" | "else" | "end" | "exists" | "foreign" | "from" | "full" |
        "group" | "having" | "in" | "index" | "inner" | "insert" | "into" |
        "is" | "join" | "key" | "left" | "like" | "limit" | "not" | "null" |
        "on" | "or" | "order" | "outer" | "primary" | "references" | "right" |
        "select" | "set" | "table" | "then" | "to" | "union" | "unique" |
        "update" | "user" | "using" | "values" | "when" | "where" | "with"
    )
}

/// Applies quoting options and the configured naming strategy
#[derive(Debug)]
pub struct ObjectNameNormalizer {
    global_quoting: bool,
    auto_quote_keywords: bool,
    strategy: Box<dyn PhysicalNamingStrategy>,
}

impl ObjectNameNormalizer {
    pub fn new(options: &BuildingOptions) -> Self {
        Self::with_strategy(options, options.naming_strategy.strategy())
    }

    pub fn with_strategy(
        options: &BuildingOptions,
        strategy: Box<dyn PhysicalNamingStrategy>,
    ) -> Self {
        Self {
            global_quoting: options.global_quoted_identifiers,
            auto_quote_keywords: options.auto_quote_keywords,
            strategy,
        }
    }

    /// Resolve the quoting of a name as written in a mapping
    pub fn normalize_identifier_quoting(&self, name: &str) -> Identifier {
        let mut identifier = Identifier::parse(name);
        if identifier.quoted {
            return identifier;
        }
        if self.global_quoting
            || !PLAIN_IDENTIFIER.is_match(&identifier.text)
            || (self.auto_quote_keywords && is_sql_keyword(&identifier.text))
        {
            identifier.quoted = true;
        }
        identifier
    }

    pub fn to_physical_table_name(&self, name: &str) -> Identifier {
        let logical = self.normalize_identifier_quoting(name);
        self.strategy.to_physical_table_name(&logical)
    }

    pub fn to_physical_column_name(&self, name: &str) -> Identifier {
        let logical = self.normalize_identifier_quoting(name);
        self.strategy.to_physical_column_name(&logical)
    }
}
