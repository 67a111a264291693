use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed profile document edited by the facilities step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FacilityProfile {
    pub facilities_infrastructure: String,
    /// Assigned by the store on every merge.
    pub updated_at: Option<DateTime<Utc>>,
}
