use actix_web::{HttpResponse, ResponseError};
use askama::Template;
use std::fmt;

/// Flash messages ride in the session cookie; long error lists are cut.
const MAX_SHOWN_ERRORS: usize = 3;

#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Template(askama::Error),
    Session(String),
    Csrf,
    /// A save was attempted without an authenticated institute.
    MissingPrincipal,
    Validation(Vec<String>),
    Upload(String),
    Storage(String),
    Hash(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::MissingPrincipal => write!(f, "Institute not logged in"),
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors.join("; ")),
            AppError::Upload(e) => write!(f, "Upload failed: {e}"),
            AppError::Storage(e) => write!(f, "Storage error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message safe to show to the institute in a flash banner.
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingPrincipal => "You must be logged in as an institute to save.".to_string(),
            AppError::Validation(errors) if errors.len() > MAX_SHOWN_ERRORS => format!(
                "{} (and {} more)",
                errors[..MAX_SHOWN_ERRORS].join("; "),
                errors.len() - MAX_SHOWN_ERRORS
            ),
            AppError::Validation(errors) => errors.join("; "),
            AppError::Upload(e) => format!("Banner upload failed: {e}"),
            AppError::Csrf => "Your form expired, please try again.".to_string(),
            AppError::NotFound => "Not found".to_string(),
            _ => "Something went wrong while saving. Please try again.".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound()
                .content_type("text/html; charset=utf-8")
                .body(include_str!("../templates/errors/404.html")),
            AppError::Csrf => {
                log::warn!("{self}");
                HttpResponse::Forbidden().body("Invalid or missing CSRF token")
            }
            AppError::MissingPrincipal => {
                log::warn!("{self}");
                HttpResponse::SeeOther()
                    .insert_header(("Location", "/login"))
                    .finish()
            }
            AppError::Validation(_) | AppError::Upload(_) => {
                log::warn!("{self}");
                HttpResponse::BadRequest().body(self.user_message())
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an askama template into a 200 HTML response.
pub fn render(tmpl: impl Template) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
