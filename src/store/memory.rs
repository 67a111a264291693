use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::{BasicInfoSnapshot, EventLog, FacilityProfile, Institute, ParticipantSnapshot, Student};
use crate::wizard::FormData;

#[derive(Default)]
struct Documents {
    events: HashMap<String, EventLog>,
    students: Vec<Student>,
    profiles: HashMap<String, FacilityProfile>,
    institutes: HashMap<String, Institute>,
    drafts: HashMap<String, FormData>,
}

/// Process-local store. Cloning shares the same documents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<Documents>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a roster entry. The wizard itself never writes students.
    pub async fn insert_student(&self, student: Student) {
        self.docs.write().await.students.push(student);
    }

    pub async fn append_basic_information(
        &self,
        institute_id: &str,
        snapshot: &BasicInfoSnapshot,
    ) -> Result<(), AppError> {
        let mut docs = self.docs.write().await;
        docs.events
            .entry(institute_id.to_string())
            .or_default()
            .basic_information
            .push(snapshot.clone());
        Ok(())
    }

    pub async fn append_participant_configuration(
        &self,
        institute_id: &str,
        snapshot: &ParticipantSnapshot,
    ) -> Result<(), AppError> {
        let mut docs = self.docs.write().await;
        docs.events
            .entry(institute_id.to_string())
            .or_default()
            .participant_configuration
            .push(snapshot.clone());
        Ok(())
    }

    pub async fn load_event_log(&self, institute_id: &str) -> Result<EventLog, AppError> {
        let docs = self.docs.read().await;
        Ok(docs.events.get(institute_id).cloned().unwrap_or_default())
    }

    pub async fn students_for_institute(&self, institute_id: &str) -> Result<Vec<Student>, AppError> {
        let docs = self.docs.read().await;
        let mut students: Vec<Student> = docs
            .students
            .iter()
            .filter(|s| s.institute_id == institute_id)
            .cloned()
            .collect();
        students.sort_by(|a, b| {
            (&a.first_name, &a.last_name, &a.id).cmp(&(&b.first_name, &b.last_name, &b.id))
        });
        Ok(students)
    }

    pub async fn load_facility_profile(&self, profile_id: &str) -> Result<Option<FacilityProfile>, AppError> {
        Ok(self.docs.read().await.profiles.get(profile_id).cloned())
    }

    pub async fn merge_facility_profile(
        &self,
        profile_id: &str,
        facilities_infrastructure: &str,
    ) -> Result<FacilityProfile, AppError> {
        let profile = FacilityProfile {
            facilities_infrastructure: facilities_infrastructure.to_string(),
            updated_at: Some(Utc::now()),
        };
        self.docs
            .write()
            .await
            .profiles
            .insert(profile_id.to_string(), profile.clone());
        Ok(profile)
    }

    pub async fn load_draft(&self, institute_id: &str) -> Result<FormData, AppError> {
        Ok(self.docs.read().await.drafts.get(institute_id).cloned().unwrap_or_default())
    }

    pub async fn store_draft(&self, institute_id: &str, form: &FormData) -> Result<(), AppError> {
        self.docs
            .write()
            .await
            .drafts
            .insert(institute_id.to_string(), form.clone());
        Ok(())
    }

    pub async fn clear_draft(&self, institute_id: &str) -> Result<(), AppError> {
        self.docs.write().await.drafts.remove(institute_id);
        Ok(())
    }

    pub async fn find_institute(&self, id: &str) -> Result<Option<Institute>, AppError> {
        Ok(self.docs.read().await.institutes.get(id).cloned())
    }

    pub async fn upsert_institute(&self, institute: &Institute) -> Result<(), AppError> {
        self.docs
            .write()
            .await
            .institutes
            .insert(institute.id.clone(), institute.clone());
        Ok(())
    }
}
