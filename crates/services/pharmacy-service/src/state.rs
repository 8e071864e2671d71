//! Application state for dependency injection.

use std::sync::Arc;

use dbx::Datasource;
use jwt_guard::Jwt;

use common::{AppError, AppResult};

use crate::service::{InventoryService, PharmacyService, SaleService};

/// Keys other services present on the `/internal` routes.
#[derive(Debug, Clone, Default)]
pub struct InternalKeys(Arc<Vec<String>>);

impl InternalKeys {
    pub fn new(keys: Vec<String>) -> Self {
        Self(Arc::new(keys))
    }

    pub fn check(&self, key: Option<&str>) -> AppResult<()> {
        match key {
            Some(key) if self.0.iter().any(|known| known == key) => Ok(()),
            _ => {
                tracing::warn!("Internal request with an unknown API key");
                Err(AppError::Unauthorized)
            }
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pharmacy_service: Arc<dyn PharmacyService>,
    pub inventory_service: Arc<dyn InventoryService>,
    pub sale_service: Arc<dyn SaleService>,
    pub jwt: Arc<Jwt>,
    pub datasource: Datasource,
    pub internal_keys: InternalKeys,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_keys() {
        let keys = InternalKeys::new(vec!["user-service".to_string()]);

        assert!(keys.check(Some("user-service")).is_ok());
        assert!(matches!(keys.check(Some("other")), Err(AppError::Unauthorized)));
        assert!(matches!(keys.check(None), Err(AppError::Unauthorized)));
        assert!(InternalKeys::default().check(Some("")).is_err());
    }
}
