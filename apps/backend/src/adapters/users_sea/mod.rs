//! SeaORM adapter for the user record store.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::{UserCreate, UserNamesUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError.

pub async fn find_user_by_subject_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    subject_id: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::SubjectId.eq(subject_id))
        .one(conn)
        .await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        subject_id: Set(dto.subject_id),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

/// Only the name columns and `updated_at` are written; `subject_id` and
/// `created_at` are left untouched.
pub async fn update_user_names<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserNamesUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(dto.id),
        subject_id: NotSet,
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };

    user_active.update(conn).await
}
