use actix_session::Session;
use actix_web::{HttpResponse, web};

use super::see_other;
use crate::auth::session::{Principal, get_principal};
use crate::errors::{AppError, render};
use crate::store::Store;
use crate::templates_structs::{EventHistoryTemplate, PageContext};

pub mod basic;
pub mod participants;

/// The institute whose draft a wizard request reads and writes.
fn draft_owner(session: &Session) -> Result<Principal, AppError> {
    get_principal(session).ok_or(AppError::MissingPrincipal)
}

/// Begin a new event with an empty draft.
pub async fn start(store: web::Data<Store>, session: Session) -> Result<HttpResponse, AppError> {
    let principal = draft_owner(&session)?;
    store.clear_draft(&principal.institute_id).await?;
    Ok(see_other("/events/new/basic"))
}

/// Every snapshot the institute has saved, oldest first.
pub async fn history(store: web::Data<Store>, session: Session) -> Result<HttpResponse, AppError> {
    let principal = draft_owner(&session)?;
    let log = store.load_event_log(&principal.institute_id).await?;
    let ctx = PageContext::build(&session, "/events/history");
    render(EventHistoryTemplate { ctx, log })
}
