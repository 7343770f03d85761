use actix_web::web;

use crate::middleware::RequireAuth;

pub mod health;
pub mod messages;
pub mod users;

/// Scope required by `/api/private-scoped`.
pub const READ_MESSAGES_SCOPE: &str = "read:messages";

/// Register every route. Auth guards are attached here, per resource, so
/// the same wiring serves `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/api")
            .service(web::resource("/public").route(web::get().to(messages::public)))
            .service(
                web::resource("/private")
                    .route(web::get().to(messages::private))
                    .wrap(RequireAuth::authenticated()),
            )
            .service(
                web::resource("/private-scoped")
                    .route(web::get().to(messages::private_scoped))
                    .wrap(RequireAuth::scoped(READ_MESSAGES_SCOPE)),
            )
            .service(
                web::scope("/users")
                    .configure(users::configure_routes)
                    .wrap(RequireAuth::authenticated()),
            ),
    );
}
