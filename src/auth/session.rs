use actix_session::Session;

use crate::errors::AppError;

const INSTITUTE_ID: &str = "institute_id";
const INSTITUTE_NAME: &str = "institute_name";
const FLASH: &str = "flash";
const FLASH_ERROR: &str = "flash_error";

/// The authenticated institute for this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub institute_id: String,
    pub name: String,
}

pub fn get_principal(session: &Session) -> Option<Principal> {
    let institute_id = session.get::<String>(INSTITUTE_ID).unwrap_or(None)?;
    let name = session
        .get::<String>(INSTITUTE_NAME)
        .unwrap_or(None)
        .unwrap_or_else(|| institute_id.clone());
    Some(Principal { institute_id, name })
}

pub fn has_principal(session: &Session) -> bool {
    session.get::<String>(INSTITUTE_ID).unwrap_or(None).is_some()
}

pub fn set_principal(session: &Session, principal: &Principal) -> Result<(), AppError> {
    session.renew();
    session
        .insert(INSTITUTE_ID, &principal.institute_id)
        .and_then(|_| session.insert(INSTITUTE_NAME, &principal.name))
        .map_err(|e| AppError::Session(format!("Failed to store principal: {e}")))
}

/// Success message shown once on the next rendered page.
pub fn flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH, message) {
        log::warn!("Failed to store flash message: {e}");
    }
}

/// Error message shown once on the next rendered page.
pub fn flash_error(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_ERROR, message) {
        log::warn!("Failed to store flash error: {e}");
    }
}

fn take(session: &Session, key: &str) -> Option<String> {
    let value = session.get::<String>(key).unwrap_or(None);
    if value.is_some() {
        session.remove(key);
    }
    value
}

pub fn take_flash(session: &Session) -> Option<String> {
    take(session, FLASH)
}

pub fn take_flash_error(session: &Session) -> Option<String> {
    take(session, FLASH_ERROR)
}
