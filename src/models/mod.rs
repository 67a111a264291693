pub mod event_log;
pub mod facility;
pub mod institute;
pub mod student;

pub use event_log::{BasicInfoSnapshot, EventLog, EventSection, ParticipantSnapshot};
pub use facility::FacilityProfile;
pub use institute::Institute;
pub use student::Student;
