use backend_test_support::unique_helpers::unique_subject;
use profile_backend::repos::users::{self, UserRecord};
use profile_backend::state::app_state::AppState;

/// Provision a local record for a fresh `auth0|...` subject.
pub async fn seed_user(state: &AppState, first_name: &str, last_name: &str) -> UserRecord {
    let db = state.require_db().expect("test state has a database");
    users::create_user(db, &unique_subject("auth0"), first_name, last_name)
        .await
        .expect("seed user")
}

#[allow(dead_code)]
pub async fn reload_user(state: &AppState, subject_id: &str) -> UserRecord {
    let db = state.require_db().expect("test state has a database");
    users::find_by_subject_id(db, subject_id)
        .await
        .expect("query user")
        .expect("user exists")
}
