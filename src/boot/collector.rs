//! In-flight metadata collector
//!
//! Accumulates what mapping sources contribute while a build is running.
//! A build runs on one thread, so the collector uses `RefCell` and hands out
//! owned copies of its entries. Registering an existing key replaces it.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::boot::naming::Identifier;

/// An entity mapped to a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityBinding {
    pub entity_name: String,
    pub table: String,
    pub schema: Option<String>,
    pub catalog: Option<String>,
    /// Contributor whose mappings declared the entity
    pub contributor: String,
    pub registered_at: DateTime<Utc>,
}

impl EntityBinding {
    pub fn new(
        entity_name: impl Into<String>,
        table: &Identifier,
        contributor: impl Into<String>,
    ) -> Self {
        Self {
            entity_name: entity_name.into(),
            table: table.render(),
            schema: None,
            catalog: None,
            contributor: contributor.into(),
            registered_at: Utc::now(),
        }
    }
}

/// A named query declared by a mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedQueryDefinition {
    pub name: String,
    pub query: String,
    pub contributor: String,
    pub registered_at: DateTime<Utc>,
}

impl NamedQueryDefinition {
    pub fn new(
        name: impl Into<String>,
        query: impl Into<String>,
        contributor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            contributor: contributor.into(),
            registered_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct Collected {
    entities: HashMap<String, EntityBinding>,
    imports: HashMap<String, String>,
    named_queries: HashMap<String, NamedQueryDefinition>,
}

/// Mutable accumulator of the metadata being built
#[derive(Debug, Default)]
pub struct InFlightMetadataCollector {
    inner: RefCell<Collected>,
}

impl InFlightMetadataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entity_binding(&self, binding: EntityBinding) {
        let mut inner = self.inner.borrow_mut();
        if let Some(previous) = inner.entities.get(&binding.entity_name) {
            debug!(
                entity = %binding.entity_name,
                previous = %previous.contributor,
                current = %binding.contributor,
                "replacing entity binding"
            );
        }
        inner.entities.insert(binding.entity_name.clone(), binding);
    }

    pub fn entity_binding(&self, entity_name: &str) -> Option<EntityBinding> {
        self.inner.borrow().entities.get(entity_name).cloned()
    }

    /// All entity bindings, ordered by entity name
    pub fn entity_bindings(&self) -> Vec<EntityBinding> {
        let mut bindings: Vec<_> = self.inner.borrow().entities.values().cloned().collect();
        bindings.sort_by(|a, b| a.entity_name.cmp(&b.entity_name));
        bindings
    }

    /// Register an import (short name usable in queries) for an entity
    pub fn add_import(&self, import_name: impl Into<String>, entity_name: impl Into<String>) {
        let import_name = import_name.into();
        let entity_name = entity_name.into();
        let mut inner = self.inner.borrow_mut();
        if let Some(previous) = inner.imports.insert(import_name.clone(), entity_name) {
            debug!(import = %import_name, previous = %previous, "replacing import");
        }
    }

    pub fn import(&self, import_name: &str) -> Option<String> {
        self.inner.borrow().imports.get(import_name).cloned()
    }

    pub fn add_named_query(&self, query: NamedQueryDefinition) {
        let mut inner = self.inner.borrow_mut();
        if inner.named_queries.contains_key(&query.name) {
            debug!(query = %query.name, contributor = %query.contributor, "replacing named query");
        }
        inner.named_queries.insert(query.name.clone(), query);
    }

    pub fn named_query(&self, name: &str) -> Option<NamedQueryDefinition> {
        self.inner.borrow().named_queries.get(name).cloned()
    }

    pub fn entity_count(&self) -> usize {
        self.inner.borrow().entities.len()
    }

    pub fn named_query_count(&self) -> usize {
        self.inner.borrow().named_queries.len()
    }
}
