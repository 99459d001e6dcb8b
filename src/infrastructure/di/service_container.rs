//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::SubsetService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub subset: SubsetService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let subset = SubsetService::new(fs);

        Self { settings, subset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::DomainError;
    use std::path::Path;

    #[test]
    fn test_container_wires_subset_service_to_filesystem() {
        let settings = Settings {
            remove_extensions: true,
            ..Default::default()
        };
        let container = ServiceContainer::with_deps(settings, Arc::new(RealFileSystem));

        assert!(container.settings.remove_extensions);
        let err = container
            .subset
            .check_input(Path::new("/nonexistent/openapi.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::FileNotFound(_))
        ));
    }
}
