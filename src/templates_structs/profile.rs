use askama::Template;

use super::PageContext;

#[derive(Template)]
#[template(path = "profile/facilities.html")]
pub struct FacilitiesTemplate {
    pub ctx: PageContext,
    pub facilities_infrastructure: String,
}
