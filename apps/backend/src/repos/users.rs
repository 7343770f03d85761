//! User record repository (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea::{self as users_adapter, UserCreate, UserNamesUpdate};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Local user record, keyed by the provider-issued subject id
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub subject_id: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_by_subject_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject_id: &str,
) -> Result<Option<UserRecord>, DomainError> {
    let user = users_adapter::find_user_by_subject_id(conn, subject_id)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(UserRecord::from))
}

/// Persist the record's name fields and refresh `updated_at`.
pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    record: &UserRecord,
) -> Result<UserRecord, DomainError> {
    let dto = UserNamesUpdate {
        id: record.id,
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
    };
    let user = users_adapter::update_user_names(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(UserRecord::from(user))
}

/// Provision a record for `subject_id`. A second record for the same
/// subject is a `Conflict`.
pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject_id: &str,
    first_name: &str,
    last_name: &str,
) -> Result<UserRecord, DomainError> {
    let user = users_adapter::create_user(conn, UserCreate::new(subject_id, first_name, last_name))
        .await
        .map_err(map_db_err)?;
    Ok(UserRecord::from(user))
}

impl From<crate::entities::users::Model> for UserRecord {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            subject_id: model.subject_id,
            first_name: model.first_name,
            last_name: model.last_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
