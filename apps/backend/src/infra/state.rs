use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::{JwksTokenValidator, TokenValidator};
use crate::config::db::{DbKind, RuntimeEnv};
use crate::config::provider::ProviderConfig;
use crate::error::AppError;
use crate::idp::{Auth0ManagementClient, ManagementApi};
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    existing_db: Option<DatabaseConnection>,
    provider: Option<ProviderConfig>,
    validator: Option<Arc<dyn TokenValidator>>,
    management: Option<Arc<dyn ManagementApi>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
            existing_db: None,
            provider: None,
            validator: None,
            management: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    /// Use an already-open connection instead of connecting from the environment.
    pub fn with_existing_db(mut self, conn: DatabaseConnection) -> Self {
        self.existing_db = Some(conn);
        self
    }

    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn TokenValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_management_api(mut self, management: Arc<dyn ManagementApi>) -> Self {
        self.management = Some(management);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let provider = self
            .provider
            .ok_or_else(|| AppError::config("identity provider settings are required"))?;

        let http = reqwest::Client::builder()
            .timeout(provider.http_timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;

        let validator = match self.validator {
            Some(v) => v,
            None => Arc::new(JwksTokenValidator::from_config(&provider, http.clone())),
        };
        let management = match self.management {
            Some(m) => m,
            None => Arc::new(Auth0ManagementClient::new(http, &provider)),
        };

        let db = match (self.existing_db, self.db_kind) {
            (Some(conn), _) => Some(conn),
            (None, Some(kind)) => Some(bootstrap_db(self.env, kind).await?),
            (None, None) => None,
        };

        Ok(AppState::new(db, provider, validator, management))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
