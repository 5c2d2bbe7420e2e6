pub mod aggregate;
pub mod form;
pub mod phone;

pub use aggregate::{CreateStudentResponse, EnrollmentDetails, FeeCounts, FeeFilter, Student, StudentPayload};
pub use form::{FormMode, IdentityField, StudentForm};
