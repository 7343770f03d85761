//! DTOs for users_sea adapter.

/// DTO for provisioning a local user record.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub subject_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserCreate {
    pub fn new(
        subject_id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// DTO for rewriting the locally owned name fields.
#[derive(Debug, Clone)]
pub struct UserNamesUpdate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}
