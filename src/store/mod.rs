//! Document store behind the wizard.
//!
//! The event log is modelled explicitly: each save is one appended entry in a
//! per-institute, per-section list. Nothing here updates or deletes an entry,
//! so earlier snapshots can never be lost by a later save.
//!
//! Wizard drafts live here too, one per institute, so the session cookie
//! only carries identity and flash messages.
//!
//! Two backends share one surface: Postgres for deployments and an in-memory
//! map for development and tests.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::errors::AppError;
use crate::models::{BasicInfoSnapshot, EventLog, FacilityProfile, Institute, ParticipantSnapshot, Student};
use crate::wizard::FormData;

#[derive(Clone)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Store {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgres",
            Store::Memory(_) => "memory",
        }
    }

    pub async fn append_basic_information(
        &self,
        institute_id: &str,
        snapshot: &BasicInfoSnapshot,
    ) -> Result<(), AppError> {
        match self {
            Store::Postgres(s) => s.append_basic_information(institute_id, snapshot).await,
            Store::Memory(s) => s.append_basic_information(institute_id, snapshot).await,
        }
    }

    pub async fn append_participant_configuration(
        &self,
        institute_id: &str,
        snapshot: &ParticipantSnapshot,
    ) -> Result<(), AppError> {
        match self {
            Store::Postgres(s) => s.append_participant_configuration(institute_id, snapshot).await,
            Store::Memory(s) => s.append_participant_configuration(institute_id, snapshot).await,
        }
    }

    /// The institute's full log; empty when nothing was saved yet.
    pub async fn load_event_log(&self, institute_id: &str) -> Result<EventLog, AppError> {
        match self {
            Store::Postgres(s) => s.load_event_log(institute_id).await,
            Store::Memory(s) => s.load_event_log(institute_id).await,
        }
    }

    /// Students whose `institute_id` equals the given id, ordered by name.
    pub async fn students_for_institute(&self, institute_id: &str) -> Result<Vec<Student>, AppError> {
        match self {
            Store::Postgres(s) => s.students_for_institute(institute_id).await,
            Store::Memory(s) => s.students_for_institute(institute_id).await,
        }
    }

    pub async fn load_facility_profile(&self, profile_id: &str) -> Result<Option<FacilityProfile>, AppError> {
        match self {
            Store::Postgres(s) => s.load_facility_profile(profile_id).await,
            Store::Memory(s) => s.load_facility_profile(profile_id).await,
        }
    }

    /// Upsert the one field; `updated_at` is assigned by the store.
    pub async fn merge_facility_profile(
        &self,
        profile_id: &str,
        facilities_infrastructure: &str,
    ) -> Result<FacilityProfile, AppError> {
        match self {
            Store::Postgres(s) => s.merge_facility_profile(profile_id, facilities_infrastructure).await,
            Store::Memory(s) => s.merge_facility_profile(profile_id, facilities_infrastructure).await,
        }
    }

    /// The institute's in-progress wizard state; blank when none is stored.
    pub async fn load_draft(&self, institute_id: &str) -> Result<FormData, AppError> {
        match self {
            Store::Postgres(s) => s.load_draft(institute_id).await,
            Store::Memory(s) => s.load_draft(institute_id).await,
        }
    }

    pub async fn store_draft(&self, institute_id: &str, form: &FormData) -> Result<(), AppError> {
        match self {
            Store::Postgres(s) => s.store_draft(institute_id, form).await,
            Store::Memory(s) => s.store_draft(institute_id, form).await,
        }
    }

    pub async fn clear_draft(&self, institute_id: &str) -> Result<(), AppError> {
        match self {
            Store::Postgres(s) => s.clear_draft(institute_id).await,
            Store::Memory(s) => s.clear_draft(institute_id).await,
        }
    }

    pub async fn find_institute(&self, id: &str) -> Result<Option<Institute>, AppError> {
        match self {
            Store::Postgres(s) => s.find_institute(id).await,
            Store::Memory(s) => s.find_institute(id).await,
        }
    }

    pub async fn upsert_institute(&self, institute: &Institute) -> Result<(), AppError> {
        match self {
            Store::Postgres(s) => s.upsert_institute(institute).await,
            Store::Memory(s) => s.upsert_institute(institute).await,
        }
    }
}
