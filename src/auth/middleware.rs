use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use super::csrf::CSRF_HEADER;
use super::session::has_principal;

/// Only institutes get past this guard.
///
/// Page requests without a principal are sent to /login. Script requests
/// (they carry the CSRF header) get a JSON 401 instead, since a redirect to
/// an HTML page is useless to them.
pub async fn require_institute(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if has_principal(&req.get_session()) {
        return next.call(req).await.map(|res| res.map_into_left_body());
    }

    let response = if req.headers().contains_key(CSRF_HEADER) {
        HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Your session has expired, please log in again." }))
    } else {
        HttpResponse::SeeOther()
            .insert_header(("Location", "/login"))
            .finish()
    };
    log::debug!("No institute in session for {}", req.path());
    Ok(req.into_response(response).map_into_right_body())
}
