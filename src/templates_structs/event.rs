use askama::Template;

use super::PageContext;
use crate::models::EventLog;
use crate::wizard::{BasicInfo, Participants};

/// One `<option>` or toggle button.
pub struct Choice {
    pub label: String,
    pub selected: bool,
}

impl Choice {
    pub fn list(options: &[&str], current: &str) -> Vec<Choice> {
        options
            .iter()
            .map(|o| Choice { label: o.to_string(), selected: *o == current })
            .collect()
    }
}

/// One editable "other institute" contact row.
pub struct CustomerRow {
    pub index: usize,
    pub name: String,
    pub phone: String,
}

#[derive(Template)]
#[template(path = "events/basic_information.html")]
pub struct BasicInformationTemplate {
    pub ctx: PageContext,
    pub info: BasicInfo,
    pub event_types: Vec<Choice>,
    pub categories: Vec<Choice>,
    pub max_banner_bytes: usize,
}

#[derive(Template)]
#[template(path = "events/participants.html")]
pub struct ParticipantConfigurationTemplate {
    pub ctx: PageContext,
    pub participants: Participants,
    pub age_groups: Vec<Choice>,
    pub skill_levels: Vec<Choice>,
    pub customer_options: Vec<Choice>,
    pub other_customers: Vec<CustomerRow>,
}

#[derive(Template)]
#[template(path = "events/history.html")]
pub struct EventHistoryTemplate {
    pub ctx: PageContext,
    pub log: EventLog,
}
