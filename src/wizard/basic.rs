use chrono::{DateTime, Utc};

use super::delta::StepDelta;
use super::form_data::{BasicInfo, CATEGORIES, EVENT_TYPES, FormData};
use crate::auth::session::Principal;
use crate::auth::validate;
use crate::errors::AppError;
use crate::models::BasicInfoSnapshot;
use crate::storage::BlobStore;
use crate::store::Store;

const BANNER_PREFIX: &str = "eventBanners";

/// Strip directories and anything outside `[A-Za-z0-9._-]` from a client file name.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "banner".to_string()
    } else {
        cleaned.to_string()
    }
}

/// `eventBanners/{unix_millis}_{file_name}`.
pub fn banner_key(file_name: &str, now: DateTime<Utc>) -> String {
    format!("{BANNER_PREFIX}/{}_{}", now.timestamp_millis(), sanitize_file_name(file_name))
}

/// An image posted by the basic information step.
pub struct BannerUpload<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// Store the image and hand back the delta that puts its URL into
/// `basicInfo.banner`. On failure no delta is produced, so the banner keeps
/// whatever value it had.
pub async fn upload_banner(
    blobs: &BlobStore,
    upload: BannerUpload<'_>,
    max_bytes: usize,
    now: DateTime<Utc>,
) -> Result<StepDelta, AppError> {
    if !upload.content_type.starts_with("image/") {
        return Err(AppError::Upload(format!("unsupported content type {:?}", upload.content_type)));
    }
    if upload.bytes.is_empty() {
        return Err(AppError::Upload("empty file".to_string()));
    }
    if upload.bytes.len() > max_bytes {
        return Err(AppError::Upload(format!("file is larger than {max_bytes} bytes")));
    }

    let key = banner_key(upload.file_name, now);
    blobs.put(&key, upload.bytes).await?;
    let url = blobs.public_url(&key);
    log::info!("Banner uploaded to {key}");
    Ok(StepDelta::Banner(url))
}

/// Field checks run before a basic information snapshot is written. Every
/// field may be empty; choices must come from the offered lists.
pub fn validate_fields(info: &BasicInfo) -> Vec<String> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_optional(&info.event_name, "Event name", 200));
    errors.extend(validate::validate_optional(&info.description, "Description", 5000));
    if !info.event_type.is_empty() && !EVENT_TYPES.contains(&info.event_type.as_str()) {
        errors.push("Unknown event type".to_string());
    }
    if !info.category.is_empty() && !CATEGORIES.contains(&info.category.as_str()) {
        errors.push("Unknown sports category".to_string());
    }
    errors
}

/// Append a snapshot of `basicInfo` to the principal's event log.
pub async fn save(
    store: &Store,
    principal: Option<&Principal>,
    form: &FormData,
    now: DateTime<Utc>,
) -> Result<BasicInfoSnapshot, AppError> {
    let principal = principal.ok_or(AppError::MissingPrincipal)?;
    let errors = validate_fields(&form.basic_info);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let snapshot = BasicInfoSnapshot::capture(&form.basic_info, now);
    store
        .append_basic_information(&principal.institute_id, &snapshot)
        .await?;
    log::info!(
        "Basic information saved for institute {} ({:?})",
        principal.institute_id,
        snapshot.event_name
    );
    Ok(snapshot)
}
