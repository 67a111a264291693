//! Event-creation wizard and facility profile step.
//!
//! `FormData` is the wizard's immutable state. Each step reads its own
//! namespace and returns a [`StepDelta`]; [`FormData::apply`] builds the next
//! state. Saving a step appends a snapshot of its namespace to the
//! institute's event log (see [`crate::store`]).

pub mod basic;
mod delta;
pub mod facilities;
mod form_data;
mod other_customers;
pub mod participants;

pub use delta::{BasicInfoEdit, ParticipantsEdit, StepDelta};
pub use facilities::FacilitiesStep;
pub use form_data::{AGE_GROUPS, BasicInfo, CATEGORIES, EVENT_TYPES, FormData, OtherCustomer, Participants, SKILL_LEVELS};
pub use other_customers::{MAX_OTHER_CUSTOMERS, OtherCustomerList};
pub use participants::ParticipantConfigurationStep;
