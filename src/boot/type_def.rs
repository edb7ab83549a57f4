//! Named custom-type definitions
//!
//! Registries nest: a document-local registry sees its own definitions first
//! and falls back to the registry of the enclosing scope.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BootError, Result};

/// A named type mapping, e.g. `<typedef name="money" class="...MoneyType">`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    /// Implementation type name
    pub type_implementation: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, type_implementation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_implementation: type_implementation.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// What to do when a name is registered twice in the same registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    Overwrite,
    Keep,
    Reject,
}

/// Registry of type definitions for a scope
#[derive(Debug, Default)]
pub struct TypeDefinitionRegistry<'p> {
    parent: Option<&'p TypeDefinitionRegistry<'p>>,
    definitions: RefCell<HashMap<String, TypeDefinition>>,
}

impl<'p> TypeDefinitionRegistry<'p> {
    pub fn new() -> Self {
        Self {
            parent: None,
            definitions: RefCell::new(HashMap::new()),
        }
    }

    /// A registry whose lookups fall back to `parent`
    pub fn with_parent(parent: &'p TypeDefinitionRegistry<'p>) -> Self {
        Self {
            parent: Some(parent),
            definitions: RefCell::new(HashMap::new()),
        }
    }

    pub fn register(&self, definition: TypeDefinition, policy: DuplicatePolicy) -> Result<()> {
        let mut definitions = self.definitions.borrow_mut();
        if definitions.contains_key(&definition.name) {
            match policy {
                DuplicatePolicy::Keep => return Ok(()),
                DuplicatePolicy::Reject => {
                    return Err(BootError::DuplicateTypeDefinition { name: definition.name })
                }
                DuplicatePolicy::Overwrite => {
                    debug!(name = %definition.name, "overwriting type definition");
                }
            }
        }
        definitions.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Look a definition up here, then in the enclosing registries
    pub fn resolve(&self, name: &str) -> Option<TypeDefinition> {
        if let Some(found) = self.definitions.borrow().get(name) {
            return Some(found.clone());
        }
        self.parent.and_then(|p| p.resolve(name))
    }

    /// Whether the name is defined in this registry itself
    pub fn is_local(&self, name: &str) -> bool {
        self.definitions.borrow().contains_key(name)
    }

    pub fn local_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.definitions.borrow().keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_resolve() {
        let registry = TypeDefinitionRegistry::new();
        let money =
            TypeDefinition::new("money", "org.example.MoneyType").with_parameter("scale", "2");
        registry.register(money.clone(), DuplicatePolicy::Reject).unwrap();
        assert_eq!(registry.resolve("money"), Some(money));
        assert_eq!(registry.resolve("percent"), None);
    }

    #[test]
    fn test_duplicate_policies() {
        let registry = TypeDefinitionRegistry::new();
        registry.register(TypeDefinition::new("money", "A"), DuplicatePolicy::Reject).unwrap();

        registry.register(TypeDefinition::new("money", "B"), DuplicatePolicy::Keep).unwrap();
        assert_eq!(registry.resolve("money").unwrap().type_implementation, "A");

        registry.register(TypeDefinition::new("money", "C"), DuplicatePolicy::Overwrite).unwrap();
        assert_eq!(registry.resolve("money").unwrap().type_implementation, "C");

        let result = registry.register(TypeDefinition::new("money", "D"), DuplicatePolicy::Reject);
        assert!(matches!(result, Err(BootError::DuplicateTypeDefinition { .. })));
    }

    #[test]
    fn test_child_shadows_parent() {
        let global = TypeDefinitionRegistry::new();
        global.register(TypeDefinition::new("money", "Global"), DuplicatePolicy::Reject).unwrap();
        global
            .register(TypeDefinition::new("percent", "Percent"), DuplicatePolicy::Reject)
            .unwrap();

        let document = TypeDefinitionRegistry::with_parent(&global);
        document.register(TypeDefinition::new("money", "Local"), DuplicatePolicy::Reject).unwrap();

        assert_eq!(document.resolve("money").unwrap().type_implementation, "Local");
        assert_eq!(document.resolve("percent").unwrap().type_implementation, "Percent");
        assert!(!document.is_local("percent"));
        assert_eq!(global.resolve("money").unwrap().type_implementation, "Global");
        assert_eq!(document.local_names(), vec!["money".to_string()]);
    }
}
