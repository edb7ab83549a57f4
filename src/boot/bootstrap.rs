//! Bootstrap context

use chrono::{DateTime, Utc};

use crate::boot::service::ServiceRegistry;

/// Startup state shared by every building context of a build
#[derive(Debug)]
pub struct BootstrapContext {
    service_registry: ServiceRegistry,
    started_at: DateTime<Utc>,
}

impl BootstrapContext {
    pub fn new(service_registry: ServiceRegistry) -> Self {
        Self {
            service_registry,
            started_at: Utc::now(),
        }
    }

    pub fn service_registry(&self) -> &ServiceRegistry {
        &self.service_registry
    }

    /// When the bootstrap began
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
