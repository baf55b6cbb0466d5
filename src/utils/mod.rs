pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use extractor::{SafeAssignmentId, SafeCourseId, SafeSubmissionId};
pub use parameter_error_handler::json_error_handler;
