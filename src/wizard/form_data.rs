use serde::{Deserialize, Serialize};

/// Event types offered by the basic information step.
pub const EVENT_TYPES: &[&str] = &[
    "Tournament",
    "Training Camp",
    "Workshop",
    "Trial Session",
    "Fitness Event",
    "Other",
];

/// Sports categories offered by the basic information step.
pub const CATEGORIES: &[&str] = &[
    "Martial Arts",
    "Team Ball Sports",
    "Racket Sports",
    "Fitness",
    "Target & Precision Sports",
    "Equestrian Sports",
    "Adventure & Outdoor Sports",
    "Ice Sports",
    "Wellness",
    "Dance",
];

pub const AGE_GROUPS: &[&str] = &[
    "3 – 5 years",
    "6 – 8 years",
    "9 – 12 years",
    "13 – 15 years",
    "16 – 18 years",
    "18+ years",
];

pub const SKILL_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced"];

/// `basicInfo` namespace. Absent fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BasicInfo {
    pub event_name: String,
    pub event_type: String,
    pub category: String,
    /// Public URL of the uploaded banner, never the image bytes.
    pub banner: String,
    pub description: String,
}

/// An ad-hoc participant from another institute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherCustomer {
    pub name: String,
    pub phone: String,
}

/// `participants` namespace. Absent fields deserialize as `""` / `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Participants {
    pub age_group: String,
    pub eligibility: String,
    pub skill_level: String,
    /// Kept as entered; validated only when saving.
    pub max_participants: String,
    /// Display names (`"First Last"`) picked from the institute roster.
    pub selected_customers: Vec<String>,
    pub other_institute_customers: Vec<OtherCustomer>,
}

/// The wizard's aggregated state. Immutable: steps hand back a
/// [`StepDelta`](super::StepDelta) and the wizard builds the next value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormData {
    pub basic_info: BasicInfo,
    pub participants: Participants,
}
