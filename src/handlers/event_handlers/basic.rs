use actix_session::Session;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use super::draft_owner;
use crate::auth::csrf;
use crate::auth::session::flash;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::handlers::form_body::FormBody;
use crate::handlers::{log_failure, report, see_other};
use crate::storage::BlobStore;
use crate::store::Store;
use crate::templates_structs::{BasicInformationTemplate, Choice, PageContext};
use crate::wizard::basic::{self, BannerUpload};
use crate::wizard::{BasicInfoEdit, CATEGORIES, EVENT_TYPES, StepDelta};

pub async fn form(
    store: web::Data<Store>,
    session: Session,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let principal = draft_owner(&session)?;
    let draft = store.load_draft(&principal.institute_id).await?;
    let info = draft.basic_info;
    let ctx = PageContext::build(&session, "/events/new/basic");
    render(BasicInformationTemplate {
        ctx,
        event_types: Choice::list(EVENT_TYPES, &info.event_type),
        categories: Choice::list(CATEGORIES, &info.category),
        info,
        max_banner_bytes: config.max_banner_bytes,
    })
}

/// Actions: `next` keeps the edits and moves on, `save` also appends a snapshot.
pub async fn submit(
    store: web::Data<Store>,
    session: Session,
    body: String,
) -> Result<HttpResponse, AppError> {
    let fields = FormBody::parse(&body);
    csrf::validate_csrf(&session, fields.get("csrf_token"))?;
    let principal = draft_owner(&session)?;

    let edit = BasicInfoEdit {
        event_name: fields.get("event_name").to_string(),
        event_type: fields.get("event_type").to_string(),
        category: fields.get("category").to_string(),
        description: fields.get("description").to_string(),
    };
    let state = store
        .load_draft(&principal.institute_id)
        .await?
        .apply(StepDelta::BasicInfo(edit));
    store.store_draft(&principal.institute_id, &state).await?;

    match fields.get("action") {
        "save" => {
            let saved = basic::save(&store, Some(&principal), &state, Utc::now()).await;
            if report(&session, "Saving basic information", saved).is_some() {
                flash(&session, "Basic information saved");
            }
            Ok(see_other("/events/new/basic"))
        }
        _ => Ok(see_other("/events/new/participants")),
    }
}

#[derive(Deserialize)]
pub struct BannerQuery {
    #[serde(default)]
    pub file_name: String,
}

/// Raw image body posted by the page script; answers with the banner URL.
pub async fn upload_banner(
    req: HttpRequest,
    session: Session,
    store: web::Data<Store>,
    blobs: web::Data<BlobStore>,
    config: web::Data<AppConfig>,
    query: web::Query<BannerQuery>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let token = req
        .headers()
        .get(csrf::CSRF_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    csrf::validate_csrf(&session, token)?;
    let principal = draft_owner(&session)?;

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let upload = BannerUpload { file_name: query.file_name.as_str(), content_type, bytes: &body[..] };

    match basic::upload_banner(&blobs, upload, config.max_banner_bytes, Utc::now()).await {
        Ok(delta) => {
            let state = store.load_draft(&principal.institute_id).await?.apply(delta);
            store.store_draft(&principal.institute_id, &state).await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({ "url": state.basic_info.banner })))
        }
        Err(err) => {
            log_failure("Uploading banner", &err);
            Ok(HttpResponse::BadRequest().json(serde_json::json!({ "error": err.user_message() })))
        }
    }
}
