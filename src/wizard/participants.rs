use chrono::{DateTime, Utc};

use super::form_data::{FormData, Participants};
use super::other_customers::OtherCustomerList;
use crate::auth::session::Principal;
use crate::auth::validate;
use crate::errors::AppError;
use crate::models::{ParticipantSnapshot, Student};
use crate::store::Store;

/// Roster candidates for the customer selector.
///
/// Only students of the principal's institute are returned, whatever the
/// store hands back. Without a principal there is nothing to look up.
pub async fn load_candidates(store: &Store, principal: Option<&Principal>) -> Result<Vec<Student>, AppError> {
    let Some(principal) = principal else {
        return Ok(Vec::new());
    };
    let mut students = store.students_for_institute(&principal.institute_id).await?;
    students.retain(|s| s.institute_id == principal.institute_id);
    Ok(students)
}

/// Per-render state of the participant configuration step.
pub struct ParticipantConfigurationStep {
    pub candidates: Vec<Student>,
    pub other_customers: OtherCustomerList,
}

impl ParticipantConfigurationStep {
    pub fn new(candidates: Vec<Student>, form: &FormData) -> Self {
        Self {
            candidates,
            other_customers: OtherCustomerList::resume(&form.participants.other_institute_customers),
        }
    }

    /// `(display name, selected)` for every candidate.
    pub fn customer_options(&self, participants: &Participants) -> Vec<(String, bool)> {
        self.candidates
            .iter()
            .map(|s| {
                let name = s.display_name();
                let selected = participants.selected_customers.contains(&name);
                (name, selected)
            })
            .collect()
    }
}

/// Field checks run before a participant snapshot is written.
pub fn validate_fields(p: &Participants) -> Vec<String> {
    let mut errors = Vec::new();
    let max = p.max_participants.trim();
    if !max.is_empty() {
        match max.parse::<u32>() {
            Ok(n) if n > 0 => {}
            _ => errors.push("Maximum participants must be a positive whole number".to_string()),
        }
    }
    errors.extend(validate::validate_optional(&p.eligibility, "Eligibility criteria", 500));
    for (i, c) in p.other_institute_customers.iter().enumerate() {
        errors.extend(validate::validate_optional(&c.name, &format!("Customer {} name", i + 1), 100));
        errors.extend(validate::validate_phone(&c.phone, &format!("Customer {} contact number", i + 1)));
    }
    errors
}

/// Append a snapshot of `participants` to the principal's event log.
pub async fn save(
    store: &Store,
    principal: Option<&Principal>,
    form: &FormData,
    now: DateTime<Utc>,
) -> Result<ParticipantSnapshot, AppError> {
    let principal = principal.ok_or(AppError::MissingPrincipal)?;
    let errors = validate_fields(&form.participants);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let snapshot = ParticipantSnapshot::capture(&form.participants, now);
    store
        .append_participant_configuration(&principal.institute_id, &snapshot)
        .await?;
    log::info!("Participant configuration saved for institute {}", principal.institute_id);
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::OtherCustomer;

    #[test]
    fn test_validate_max_participants() {
        let mut p = Participants::default();
        assert!(validate_fields(&p).is_empty());
        p.max_participants = "30".into();
        assert!(validate_fields(&p).is_empty());
        p.max_participants = "0".into();
        assert_eq!(validate_fields(&p).len(), 1);
        p.max_participants = "thirty".into();
        assert_eq!(validate_fields(&p).len(), 1);
    }

    #[test]
    fn test_validate_blank_customer_rows_are_allowed() {
        let p = Participants {
            other_institute_customers: vec![OtherCustomer::default()],
            ..Default::default()
        };
        assert!(validate_fields(&p).is_empty());
    }

    #[test]
    fn test_customer_options_mark_selection() {
        let candidates = vec![
            Student { id: "s1".into(), first_name: "Ana".into(), last_name: "Diaz".into(), institute_id: "U1".into() },
            Student { id: "s2".into(), first_name: "Ben".into(), last_name: "Ode".into(), institute_id: "U1".into() },
        ];
        let mut form = FormData::default();
        form.participants.selected_customers = vec!["Ben Ode".into()];
        let step = ParticipantConfigurationStep::new(candidates, &form);
        assert_eq!(
            step.customer_options(&form.participants),
            vec![("Ana Diaz".to_string(), false), ("Ben Ode".to_string(), true)]
        );
        assert_eq!(step.other_customers.len(), 1);
    }
}
