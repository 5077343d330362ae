//! Domain types for student records.
//!
//! Storage-agnostic: nothing here knows about SQL or HTTP.
//!
//! - [`student`] - `Student`, `Enrollment`, `Course` and the eager-loaded
//!   `StudentDetails` view.
//! - [`form`] - Allow-listed form input and validation.
//! - [`sort`] - List ordering and column-header toggles.
//! - [`id`] - Identifier newtypes.

pub mod form;
pub mod id;
pub mod sort;
pub mod student;

pub use form::{Field, StudentForm, ValidationErrors};
pub use id::{CourseId, EnrollmentId, StudentId};
pub use sort::{date_toggle, name_toggle, SortOrder};
pub use student::{Course, Enrollment, EnrollmentDetail, Grade, NewStudent, Student, StudentDetails};
