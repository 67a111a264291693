use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;

use super::draft_owner;
use crate::auth::csrf;
use crate::auth::session::{flash, flash_error};
use crate::errors::{AppError, render};
use crate::handlers::form_body::FormBody;
use crate::handlers::{report, see_other};
use crate::store::Store;
use crate::templates_structs::{Choice, CustomerRow, PageContext, ParticipantConfigurationTemplate};
use crate::wizard::participants::{self, ParticipantConfigurationStep};
use crate::wizard::{AGE_GROUPS, MAX_OTHER_CUSTOMERS, OtherCustomerList, ParticipantsEdit, SKILL_LEVELS, StepDelta};

pub async fn form(store: web::Data<Store>, session: Session) -> Result<HttpResponse, AppError> {
    let principal = draft_owner(&session)?;
    let draft = store.load_draft(&principal.institute_id).await?;

    // One roster read per render; a failure leaves the selector empty.
    let candidates = report(
        &session,
        "Loading student roster",
        participants::load_candidates(&store, Some(&principal)).await,
    )
    .unwrap_or_default();
    let step = ParticipantConfigurationStep::new(candidates, &draft);

    let customer_options = step
        .customer_options(&draft.participants)
        .into_iter()
        .map(|(label, selected)| Choice { label, selected })
        .collect();
    let other_customers = step
        .other_customers
        .entries()
        .iter()
        .enumerate()
        .map(|(index, c)| CustomerRow { index, name: c.name.clone(), phone: c.phone.clone() })
        .collect();

    let ctx = PageContext::build(&session, "/events/new/participants");
    render(ParticipantConfigurationTemplate {
        ctx,
        age_groups: Choice::list(AGE_GROUPS, &draft.participants.age_group),
        skill_levels: Choice::list(SKILL_LEVELS, &draft.participants.skill_level),
        customer_options,
        other_customers,
        participants: draft.participants,
    })
}

/// Actions: `back`, `save`, `add_customer`, `remove_customer:{index}`.
pub async fn submit(
    store: web::Data<Store>,
    session: Session,
    body: String,
) -> Result<HttpResponse, AppError> {
    let fields = FormBody::parse(&body);
    csrf::validate_csrf(&session, fields.get("csrf_token"))?;
    let principal = draft_owner(&session)?;

    let draft = store.load_draft(&principal.institute_id).await?;
    let edit = ParticipantsEdit {
        age_group: fields.get("age_group").to_string(),
        eligibility: fields.get("eligibility").to_string(),
        skill_level: fields.get("skill_level").to_string(),
        max_participants: fields.get("max_participants").trim().to_string(),
        selected_customers: fields.get_all("selected_customers"),
    };

    let action = fields.get("action");
    let mut others = OtherCustomerList::resume(&draft.participants.other_institute_customers);
    others.apply_rows(&fields.indexed_rows("customer_name_", "customer_phone_", MAX_OTHER_CUSTOMERS));
    if action == "add_customer" {
        if !others.add() {
            flash_error(&session, &format!("At most {MAX_OTHER_CUSTOMERS} customers from other institutes can be added."));
        }
    } else if let Some(index) = action.strip_prefix("remove_customer:") {
        if let Ok(index) = index.parse::<usize>() {
            others.remove(index);
        }
    }

    let state = draft.apply_all([StepDelta::Participants(edit), others.sync_delta()]);
    store.store_draft(&principal.institute_id, &state).await?;

    match action {
        "back" => Ok(see_other("/events/new/basic")),
        "save" => {
            let saved = participants::save(&store, Some(&principal), &state, Utc::now()).await;
            if report(&session, "Saving participant configuration", saved).is_some() {
                flash(&session, "Participant configuration saved");
            }
            Ok(see_other("/events/new/participants"))
        }
        _ => Ok(see_other("/events/new/participants#other-customers")),
    }
}
