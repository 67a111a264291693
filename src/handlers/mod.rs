use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::middleware::require_institute;
use crate::auth::session::flash_error;
use crate::errors::AppError;

pub mod auth_handlers;
pub mod event_handlers;
pub mod form_body;
pub mod profile_handlers;

/// Register every route. Static and upload file services must be added to the
/// `App` before this, since the protected scope matches all remaining paths.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/", web::get().to(|| async { see_other("/events/new/basic") }))
        // Protected routes
        .service(
            web::scope("")
                .wrap(actix_web::middleware::from_fn(require_institute))
                .route("/logout", web::post().to(auth_handlers::logout))
                // Event wizard. /events/new resets the draft.
                .route("/events/new", web::get().to(event_handlers::start))
                .route("/events/new/basic", web::get().to(event_handlers::basic::form))
                .route("/events/new/basic", web::post().to(event_handlers::basic::submit))
                .route("/events/new/basic/banner", web::post().to(event_handlers::basic::upload_banner))
                .route("/events/new/participants", web::get().to(event_handlers::participants::form))
                .route("/events/new/participants", web::post().to(event_handlers::participants::submit))
                .route("/events/history", web::get().to(event_handlers::history))
                // Facility profile
                .route("/profile/facilities", web::get().to(profile_handlers::form))
                .route("/profile/facilities", web::post().to(profile_handlers::submit))
                .default_service(web::to(not_found)),
        );
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}

/// Log a failed step operation.
pub fn log_failure(context: &str, err: &AppError) {
    match err {
        AppError::Validation(_) | AppError::Upload(_) | AppError::MissingPrincipal => {
            log::warn!("{context}: {err}")
        }
        _ => log::error!("{context}: {err}"),
    }
}

/// The one place step failures are reported: the error is logged and shown
/// to the institute as a flash error on the next page. `None` means failed.
pub fn report<T>(session: &Session, context: &str, result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log_failure(context, &err);
            flash_error(session, &err.user_message());
            None
        }
    }
}
