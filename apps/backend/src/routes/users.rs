use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::{AuthClaims, ValidatedForm};
use crate::services::profile::{self, ProfileUpdate};
use crate::state::app_state::AppState;

/// GET /api/users/get_user/
async fn get_user(
    claims: AuthClaims,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let view = profile::read_profile(db, app_state.management.as_ref(), claims.subject()).await?;

    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/users/update_profile/ (form: first_name, last_name, email)
async fn update_profile(
    claims: AuthClaims,
    app_state: web::Data<AppState>,
    form: ValidatedForm<ProfileUpdate>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let updated = profile::update_profile(
        db,
        app_state.management.as_ref(),
        claims.subject(),
        form.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/get_user/", web::get().to(get_user))
        .route("/update_profile/", web::post().to(update_profile));
}
