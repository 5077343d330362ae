//! Persistence port for student records.

use async_trait::async_trait;

use crate::domain::{NewStudent, SortOrder, Student, StudentDetails, StudentId};
use crate::error::Result;

/// Storage operations for students and their enrollments.
///
/// Every operation may fail with a storage fault; callers decide which faults
/// are shown to users and which propagate.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Fetch every student in the given order.
    async fn list(&self, order: SortOrder) -> Result<Vec<Student>>;

    /// Fetch a single student by ID.
    async fn find(&self, id: StudentId) -> Result<Option<Student>>;

    /// Fetch a student together with its enrollments and their courses.
    async fn find_details(&self, id: StudentId) -> Result<Option<StudentDetails>>;

    /// Insert a student and return it with its assigned ID.
    async fn insert(&self, student: &NewStudent) -> Result<Student>;

    /// Overwrite the mutable fields of an existing student.
    ///
    /// Returns `false` when no student with that ID exists.
    async fn update(&self, student: &Student) -> Result<bool>;

    /// Delete a student and its enrollments.
    ///
    /// Returns `false` when no student with that ID exists.
    async fn delete(&self, id: StudentId) -> Result<bool>;
}
