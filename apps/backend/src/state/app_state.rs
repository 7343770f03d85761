use std::fmt;
use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::TokenValidator;
use crate::config::provider::ProviderConfig;
use crate::error::AppError;
use crate::idp::ManagementApi;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for auth-only test scenarios)
    pub db: Option<DatabaseConnection>,
    pub provider: ProviderConfig,
    pub validator: Arc<dyn TokenValidator>,
    pub management: Arc<dyn ManagementApi>,
}

impl AppState {
    pub fn new(
        db: Option<DatabaseConnection>,
        provider: ProviderConfig,
        validator: Arc<dyn TokenValidator>,
        management: Arc<dyn ManagementApi>,
    ) -> Self {
        Self {
            db,
            provider,
            validator,
            management,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// The database connection, or `DbUnavailable` when the state was built without one.
    pub fn require_db(&self) -> Result<&DatabaseConnection, AppError> {
        self.db.as_ref().ok_or_else(|| AppError::DbUnavailable {
            detail: "no database configured".to_string(),
        })
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}
