use super::form_data::{FormData, OtherCustomer};

/// Fields posted by the basic information form. The banner is not part of
/// the form post; it only changes through [`StepDelta::Banner`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicInfoEdit {
    pub event_name: String,
    pub event_type: String,
    pub category: String,
    pub description: String,
}

/// Fields posted by the participant configuration form. The other-customers
/// list travels separately through [`StepDelta::OtherCustomers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantsEdit {
    pub age_group: String,
    pub eligibility: String,
    pub skill_level: String,
    pub max_participants: String,
    pub selected_customers: Vec<String>,
}

/// A change produced by one wizard step against its own namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepDelta {
    BasicInfo(BasicInfoEdit),
    Banner(String),
    Participants(ParticipantsEdit),
    OtherCustomers(Vec<OtherCustomer>),
}

impl FormData {
    /// Produce the next wizard state. `self` is left untouched.
    pub fn apply(&self, delta: StepDelta) -> FormData {
        let mut next = self.clone();
        match delta {
            StepDelta::BasicInfo(edit) => {
                next.basic_info.event_name = edit.event_name;
                next.basic_info.event_type = edit.event_type;
                next.basic_info.category = edit.category;
                next.basic_info.description = edit.description;
            }
            StepDelta::Banner(url) => next.basic_info.banner = url,
            StepDelta::Participants(edit) => {
                next.participants.age_group = edit.age_group;
                next.participants.eligibility = edit.eligibility;
                next.participants.skill_level = edit.skill_level;
                next.participants.max_participants = edit.max_participants;
                next.participants.selected_customers = edit.selected_customers;
            }
            StepDelta::OtherCustomers(list) => next.participants.other_institute_customers = list,
        }
        next
    }

    pub fn apply_all(&self, deltas: impl IntoIterator<Item = StepDelta>) -> FormData {
        deltas
            .into_iter()
            .fold(self.clone(), |state, delta| state.apply(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_leaves_original_untouched() {
        let before = FormData::default();
        let after = before.apply(StepDelta::BasicInfo(BasicInfoEdit {
            event_name: "5K Run".into(),
            ..Default::default()
        }));
        assert_eq!(before.basic_info.event_name, "");
        assert_eq!(after.basic_info.event_name, "5K Run");
    }

    #[test]
    fn test_basic_edit_keeps_uploaded_banner() {
        let state = FormData::default().apply(StepDelta::Banner("/uploads/eventBanners/1_a.png".into()));
        let state = state.apply(StepDelta::BasicInfo(BasicInfoEdit {
            event_name: "Cup".into(),
            event_type: "Tournament".into(),
            category: "Fitness".into(),
            description: String::new(),
        }));
        assert_eq!(state.basic_info.banner, "/uploads/eventBanners/1_a.png");
        assert_eq!(state.basic_info.category, "Fitness");
    }

    #[test]
    fn test_participants_edit_does_not_touch_other_namespace() {
        let base = FormData::default().apply(StepDelta::BasicInfo(BasicInfoEdit {
            event_name: "Cup".into(),
            ..Default::default()
        }));
        let next = base.apply_all([
            StepDelta::Participants(ParticipantsEdit {
                age_group: "18+ years".into(),
                selected_customers: vec!["Ana Diaz".into()],
                ..Default::default()
            }),
            StepDelta::OtherCustomers(vec![OtherCustomer { name: "Lee".into(), phone: "555".into() }]),
        ]);
        assert_eq!(next.basic_info, base.basic_info);
        assert_eq!(next.participants.selected_customers, vec!["Ana Diaz".to_string()]);
        assert_eq!(next.participants.other_institute_customers.len(), 1);
    }

    #[test]
    fn test_participants_edit_keeps_other_customers() {
        let base = FormData::default()
            .apply(StepDelta::OtherCustomers(vec![OtherCustomer { name: "Lee".into(), phone: "1".into() }]));
        let next = base.apply(StepDelta::Participants(ParticipantsEdit::default()));
        assert_eq!(next.participants.other_institute_customers, base.participants.other_institute_customers);
    }
}
