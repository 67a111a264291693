use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wizard::{BasicInfo, OtherCustomer, Participants};

/// Which list of an institute's event log a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSection {
    BasicInformation,
    ParticipantConfiguration,
}

impl EventSection {
    pub fn as_str(self) -> &'static str {
        match self {
            EventSection::BasicInformation => "basicInformation",
            EventSection::ParticipantConfiguration => "participantConfiguration",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "basicInformation" => Some(EventSection::BasicInformation),
            "participantConfiguration" => Some(EventSection::ParticipantConfiguration),
            _ => None,
        }
    }
}

/// Point-in-time copy of `basicInfo`, appended on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfoSnapshot {
    pub event_name: String,
    pub event_type: String,
    pub category: String,
    pub banner: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl BasicInfoSnapshot {
    pub fn capture(info: &BasicInfo, now: DateTime<Utc>) -> Self {
        Self {
            event_name: info.event_name.clone(),
            event_type: info.event_type.clone(),
            category: info.category.clone(),
            banner: info.banner.clone(),
            description: info.description.clone(),
            created_at: now,
        }
    }
}

/// Point-in-time copy of `participants`, appended on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSnapshot {
    pub age_group: String,
    pub eligibility: String,
    pub skill_level: String,
    pub max_participants: String,
    pub selected_institute_customers: Vec<String>,
    pub other_institute_customers: Vec<OtherCustomer>,
    pub created_at: DateTime<Utc>,
}

impl ParticipantSnapshot {
    pub fn capture(p: &Participants, now: DateTime<Utc>) -> Self {
        Self {
            age_group: p.age_group.clone(),
            eligibility: p.eligibility.clone(),
            skill_level: p.skill_level.clone(),
            max_participants: p.max_participants.clone(),
            selected_institute_customers: p.selected_customers.clone(),
            other_institute_customers: p.other_institute_customers.clone(),
            created_at: now,
        }
    }
}

/// Everything an institute has ever saved, oldest first in each list.
///
/// Saves only ever append, so saving the same draft twice yields two entries
/// that differ only in `created_at`. Consumers that want "the current event"
/// take the last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLog {
    pub basic_information: Vec<BasicInfoSnapshot>,
    pub participant_configuration: Vec<ParticipantSnapshot>,
}

impl EventLog {
    pub fn is_empty(&self) -> bool {
        self.basic_information.is_empty() && self.participant_configuration.is_empty()
    }

    pub fn latest_basic_information(&self) -> Option<&BasicInfoSnapshot> {
        self.basic_information.last()
    }
}
