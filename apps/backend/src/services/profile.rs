//! Profile sync between the local user record and the provider.
//!
//! Names are owned locally; the email is owned by the provider. Neither
//! direction is transactional across the two stores: an update persists the
//! local names first and keeps them even if the remote patch then fails.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::idp::{ManagementApi, RemoteProfilePatch};
use crate::logging::pii::Redacted;
use crate::repos::users::{self, UserRecord};

/// Merged view returned by the read endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Fields accepted by the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Provider-confirmed result of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdated {
    pub name: String,
    pub email: String,
}

/// Display name as stored at the provider: `"{last_name} {first_name}"`.
pub fn remote_display_name(first_name: &str, last_name: &str) -> String {
    format!("{last_name} {first_name}")
}

async fn load_record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject_id: &str,
) -> Result<UserRecord, AppError> {
    users::find_by_subject_id(conn, subject_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "No user record for subject"))
}

/// Local names merged with the provider's email. An unknown subject fails
/// before any provider call is made.
pub async fn read_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    management: &dyn ManagementApi,
    subject_id: &str,
) -> Result<ProfileView, AppError> {
    let record = load_record(conn, subject_id).await?;

    let token = management.exchange_client_credentials().await?;
    let remote = management.fetch_remote_profile(subject_id, &token).await?;

    debug!(subject_id, "profile read merged");
    Ok(ProfileView {
        first_name: record.first_name,
        last_name: record.last_name,
        email: remote.email,
    })
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    management: &dyn ManagementApi,
    subject_id: &str,
    update: ProfileUpdate,
) -> Result<ProfileUpdated, AppError> {
    let mut record = load_record(conn, subject_id).await?;

    record.first_name = update.first_name;
    record.last_name = update.last_name;
    let record = users::save(conn, &record).await?;
    info!(subject_id, user_id = record.id, "local profile names saved");

    let patch = RemoteProfilePatch {
        name: remote_display_name(&record.first_name, &record.last_name),
        email: update.email,
    };

    let token = management.exchange_client_credentials().await?;
    let confirmed = management
        .patch_remote_profile(subject_id, &token, &patch)
        .await?;

    info!(
        subject_id,
        email = %Redacted(&confirmed.email),
        "remote profile updated"
    );
    Ok(ProfileUpdated {
        name: confirmed.name,
        email: confirmed.email,
    })
}
