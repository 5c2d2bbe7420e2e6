pub mod aggregate;
pub mod applicability;
pub mod form;

pub use aggregate::{group_by_room, Subject, SubjectPayload, SubjectRoom};
pub use applicability::{is_applicable, subjects_for_class};
pub use form::{SubjectForm, SubjectSubmission};
