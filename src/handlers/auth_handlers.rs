use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use super::see_other;
use crate::auth::rate_limit::LoginThrottle;
use crate::auth::session::{Principal, has_principal, set_principal};
use crate::auth::{csrf, password};
use crate::errors::{AppError, render};
use crate::store::Store;
use crate::templates_structs::{APP_NAME, LoginTemplate};

#[derive(Deserialize)]
pub struct LoginForm {
    pub institute_id: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_page_with(session: &Session, institute_id: &str, error: Option<&str>) -> Result<HttpResponse, AppError> {
    render(LoginTemplate {
        error: error.map(String::from),
        app_name: APP_NAME.to_string(),
        csrf_token: csrf::get_or_create_token(session),
        institute_id: institute_id.to_string(),
    })
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    if has_principal(&session) {
        return Ok(see_other("/events/new/basic"));
    }
    login_page_with(&session, "", None)
}

pub async fn login_submit(
    req: HttpRequest,
    store: web::Data<Store>,
    throttle: web::Data<LoginThrottle>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Throttle before touching the store
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));
    if throttle.is_blocked(ip) {
        log::warn!("Login throttled for {ip}");
        return login_page_with(
            &session,
            &form.institute_id,
            Some("Too many failed login attempts. Please try again later."),
        );
    }

    let institute_id = form.institute_id.trim();
    let found = store.find_institute(institute_id).await?;
    let verified = match &found {
        Some(institute) => password::verify_password(&form.password, &institute.password_hash)?,
        None => false,
    };

    match found {
        Some(institute) if verified => {
            throttle.clear(ip);
            set_principal(&session, &Principal { institute_id: institute.id.clone(), name: institute.name })?;
            log::info!("Institute {} logged in", institute.id);
            Ok(see_other("/events/new/basic"))
        }
        _ => {
            throttle.record_failure(ip);
            log::warn!("Failed login for institute id {institute_id:?}");
            login_page_with(&session, institute_id, Some("Invalid institute id or password"))
        }
    }
}

pub async fn logout(session: Session, form: web::Form<CsrfOnly>) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/login"))
}
