use serde::{Deserialize, Serialize};

/// Roster entry, read-only from the wizard's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub institute_id: String,
}

impl Student {
    /// Value shown in, and submitted by, the customer selector.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
