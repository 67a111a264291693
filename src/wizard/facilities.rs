use crate::errors::AppError;
use crate::models::FacilityProfile;
use crate::store::Store;

/// Local state of the facilities & infrastructure step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilitiesStep {
    pub facilities_infrastructure: String,
}

impl FacilitiesStep {
    /// Seed from the profile document; a missing document or field reads as "".
    pub async fn load(store: &Store, profile_id: &str) -> Result<Self, AppError> {
        let profile = store.load_facility_profile(profile_id).await?;
        Ok(Self {
            facilities_infrastructure: profile.map(|p| p.facilities_infrastructure).unwrap_or_default(),
        })
    }

    pub fn edit(&self, text: &str) -> Self {
        Self { facilities_infrastructure: text.to_string() }
    }

    /// Reset to blank. This is not an undo back to the loaded value.
    pub fn cancel(&self) -> Self {
        Self::default()
    }

    /// Merge the field into the profile document. Empty text is a valid save.
    pub async fn save(&self, store: &Store, profile_id: &str) -> Result<FacilityProfile, AppError> {
        let profile = store
            .merge_facility_profile(profile_id, &self.facilities_infrastructure)
            .await?;
        log::info!("Facilities profile {profile_id} saved");
        Ok(profile)
    }
}
