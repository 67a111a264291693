// Template context structures for Askama templates, organized by page group.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{get_principal, take_flash, take_flash_error};

mod common;
mod event;
mod profile;

pub use self::common::LoginTemplate;
pub use self::event::{
    BasicInformationTemplate, Choice, CustomerRow, EventHistoryTemplate, ParticipantConfigurationTemplate,
};
pub use self::profile::FacilitiesTemplate;

pub const APP_NAME: &str = "Arena";

/// Common context shared by all authenticated pages.
pub struct PageContext {
    pub institute_name: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub flash_error: Option<String>,
    pub app_name: String,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, current_path: &str) -> Self {
        let institute_name = get_principal(session).map(|p| p.name).unwrap_or_default();
        let avatar_initial = institute_name
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string();
        Self {
            institute_name,
            avatar_initial,
            flash: take_flash(session),
            flash_error: take_flash_error(session),
            app_name: APP_NAME.to_string(),
            csrf_token: csrf::get_or_create_token(session),
            current_path: current_path.to_string(),
        }
    }

    pub fn is_active(&self, prefix: &str) -> bool {
        self.current_path.starts_with(prefix)
    }
}
