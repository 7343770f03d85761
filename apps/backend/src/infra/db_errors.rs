//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos convert it here, and the HTTP
//! boundary maps `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Postgres reports the index name, SQLite reports `table.column`.
fn is_subject_id_conflict(msg: &str) -> bool {
    msg.contains("idx_users_subject_id_unique") || msg.contains("users.subject_id")
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) | sea_orm::DbErr::RecordNotUpdated => {
            return DomainError::not_found(NotFoundKind::User, "User record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if is_subject_id_conflict(&error_msg) {
            return DomainError::conflict(
                ConflictKind::UniqueSubject,
                "Subject id already has a user record",
            );
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::*;

    #[test]
    fn record_not_found_maps_to_user_not_found() {
        let err = map_db_err(DbErr::RecordNotFound("users".into()));
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));

        let err = map_db_err(DbErr::RecordNotUpdated);
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::User, _)));
    }

    #[test]
    fn subject_id_unique_violation_maps_to_conflict() {
        let sqlite = DbErr::Exec(RuntimeErr::Internal(
            "UNIQUE constraint failed: users.subject_id".into(),
        ));
        assert!(matches!(
            map_db_err(sqlite),
            DomainError::Conflict(ConflictKind::UniqueSubject, _)
        ));

        let postgres = DbErr::Exec(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"idx_users_subject_id_unique\"".into(),
        ));
        assert!(matches!(
            map_db_err(postgres),
            DomainError::Conflict(ConflictKind::UniqueSubject, _)
        ));
    }

    #[test]
    fn unknown_errors_are_infra_failures() {
        let err = map_db_err(DbErr::Custom("something odd".into()));
        assert!(matches!(err, DomainError::Infra(InfraErrorKind::Other(_), _)));
    }
}
