use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use super::{report, see_other};
use crate::auth::csrf;
use crate::auth::session::flash;
use crate::config::AppConfig;
use crate::errors::{AppError, render};
use crate::store::Store;
use crate::templates_structs::{FacilitiesTemplate, PageContext};
use crate::wizard::FacilitiesStep;

#[derive(Deserialize)]
pub struct FacilitiesForm {
    #[serde(default)]
    pub facilities_infrastructure: String,
    pub action: String,
    pub csrf_token: String,
}

fn render_step(session: &Session, step: FacilitiesStep) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, "/profile/facilities");
    render(FacilitiesTemplate { ctx, facilities_infrastructure: step.facilities_infrastructure })
}

pub async fn form(
    store: web::Data<Store>,
    config: web::Data<AppConfig>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let loaded = FacilitiesStep::load(&store, &config.facility_profile_id).await;
    let step = report(&session, "Loading facilities profile", loaded).unwrap_or_default();
    render_step(&session, step)
}

/// `cancel` blanks the field without writing; `save` merges it into the profile.
pub async fn submit(
    store: web::Data<Store>,
    config: web::Data<AppConfig>,
    session: Session,
    form: web::Form<FacilitiesForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let step = FacilitiesStep::default().edit(&form.facilities_infrastructure);

    match form.action.as_str() {
        "cancel" => render_step(&session, step.cancel()),
        "save" => {
            let saved = step.save(&store, &config.facility_profile_id).await;
            match report(&session, "Saving facilities profile", saved) {
                Some(_) => {
                    flash(&session, "Saved successfully");
                    Ok(see_other("/profile/facilities"))
                }
                // Keep what was typed so nothing is lost on failure.
                None => render_step(&session, step),
            }
        }
        other => Err(AppError::Validation(vec![format!("Unknown action {other:?}")])),
    }
}
