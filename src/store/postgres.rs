use sqlx::PgPool;
use sqlx::types::Json;

use crate::errors::AppError;
use crate::models::{
    BasicInfoSnapshot, EventLog, EventSection, FacilityProfile, Institute, ParticipantSnapshot, Student,
};
use crate::wizard::FormData;

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn append<T: serde::Serialize + Sync>(
        &self,
        institute_id: &str,
        section: EventSection,
        snapshot: &T,
        created_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO event_log_entries (institute_id, section, payload, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(institute_id)
        .bind(section.as_str())
        .bind(Json(snapshot))
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn append_basic_information(
        &self,
        institute_id: &str,
        snapshot: &BasicInfoSnapshot,
    ) -> Result<(), AppError> {
        self.append(institute_id, EventSection::BasicInformation, snapshot, snapshot.created_at)
            .await
    }

    pub async fn append_participant_configuration(
        &self,
        institute_id: &str,
        snapshot: &ParticipantSnapshot,
    ) -> Result<(), AppError> {
        self.append(institute_id, EventSection::ParticipantConfiguration, snapshot, snapshot.created_at)
            .await
    }

    pub async fn load_event_log(&self, institute_id: &str) -> Result<EventLog, AppError> {
        let rows: Vec<(String, Json<serde_json::Value>)> = sqlx::query_as(
            "SELECT section, payload
             FROM event_log_entries
             WHERE institute_id = $1
             ORDER BY id",
        )
        .bind(institute_id)
        .fetch_all(&self.pool)
        .await?;

        let mut log = EventLog::default();
        for (section, Json(payload)) in rows {
            match EventSection::parse(&section) {
                Some(EventSection::BasicInformation) => log.basic_information.push(
                    serde_json::from_value(payload).map_err(|e| AppError::Storage(e.to_string()))?,
                ),
                Some(EventSection::ParticipantConfiguration) => log.participant_configuration.push(
                    serde_json::from_value(payload).map_err(|e| AppError::Storage(e.to_string()))?,
                ),
                None => log::warn!("Skipping event log entry with unknown section {section:?}"),
            }
        }
        Ok(log)
    }

    pub async fn students_for_institute(&self, institute_id: &str) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, first_name, last_name, institute_id
             FROM students
             WHERE institute_id = $1
             ORDER BY first_name, last_name, id",
        )
        .bind(institute_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(students)
    }

    pub async fn load_facility_profile(&self, profile_id: &str) -> Result<Option<FacilityProfile>, AppError> {
        let profile = sqlx::query_as::<_, FacilityProfile>(
            "SELECT facilities_infrastructure, updated_at
             FROM facility_profiles
             WHERE id = $1",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    pub async fn merge_facility_profile(
        &self,
        profile_id: &str,
        facilities_infrastructure: &str,
    ) -> Result<FacilityProfile, AppError> {
        let profile = sqlx::query_as::<_, FacilityProfile>(
            "INSERT INTO facility_profiles (id, facilities_infrastructure, updated_at)
             VALUES ($1, $2, now())
             ON CONFLICT (id) DO UPDATE
                 SET facilities_infrastructure = EXCLUDED.facilities_infrastructure,
                     updated_at = EXCLUDED.updated_at
             RETURNING facilities_infrastructure, updated_at",
        )
        .bind(profile_id)
        .bind(facilities_infrastructure)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    /// An unreadable payload (e.g. written by an older release) starts over blank.
    pub async fn load_draft(&self, institute_id: &str) -> Result<FormData, AppError> {
        let row: Option<(Json<serde_json::Value>,)> = sqlx::query_as(
            "SELECT payload FROM wizard_drafts WHERE institute_id = $1",
        )
        .bind(institute_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((Json(payload),)) = row else {
            return Ok(FormData::default());
        };
        match serde_json::from_value(payload) {
            Ok(form) => Ok(form),
            Err(e) => {
                log::warn!("Discarding unreadable wizard draft for institute {institute_id}: {e}");
                Ok(FormData::default())
            }
        }
    }

    pub async fn store_draft(&self, institute_id: &str, form: &FormData) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO wizard_drafts (institute_id, payload, updated_at)
             VALUES ($1, $2, now())
             ON CONFLICT (institute_id) DO UPDATE
                 SET payload = EXCLUDED.payload, updated_at = EXCLUDED.updated_at",
        )
        .bind(institute_id)
        .bind(Json(form))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn clear_draft(&self, institute_id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM wizard_drafts WHERE institute_id = $1")
            .bind(institute_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn find_institute(&self, id: &str) -> Result<Option<Institute>, AppError> {
        let institute = sqlx::query_as::<_, Institute>(
            "SELECT id, name, password_hash FROM institutes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(institute)
    }

    pub async fn upsert_institute(&self, institute: &Institute) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO institutes (id, name, password_hash)
             VALUES ($1, $2, $3)
             ON CONFLICT (id) DO UPDATE
                 SET name = EXCLUDED.name, password_hash = EXCLUDED.password_hash",
        )
        .bind(&institute.id)
        .bind(&institute.name)
        .bind(&institute.password_hash)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
