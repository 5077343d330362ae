//! Student record use cases: list, details, create, edit and delete.
//!
//! Each operation returns an [`Outcome`]: a view payload for the HTTP layer to
//! render, a redirect, or a not-found signal. Write faults from the store are
//! caught here and turned into user-facing messages; read faults propagate.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    date_toggle, name_toggle, SortOrder, Student, StudentDetails, StudentForm, StudentId,
    ValidationErrors,
};
use crate::error::Result;
use crate::port::StudentStore;

/// Shown when an insert or update fails in the store.
pub const SAVE_FAILED_MESSAGE: &str =
    "Unable to save changes. Try again, and if the problem persists contact your system administrator.";

/// Shown on the delete confirmation page after a failed delete.
pub const DELETE_FAILED_MESSAGE: &str =
    "Delete failed. Try again, and if the problem persists contact your system administrator.";

/// Where a completed operation sends the client next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// The student list in its default order.
    List,
    /// The delete confirmation page, optionally flagged with a failure.
    DeleteConfirmation {
        id: StudentId,
        save_changes_error: bool,
    },
}

impl Redirect {
    /// Path and query of the redirect target.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Redirect::List => "/Students".to_string(),
            Redirect::DeleteConfirmation {
                id,
                save_changes_error: true,
            } => format!("/Students/Delete/{id}?saveChangesError=true"),
            Redirect::DeleteConfirmation { id, .. } => format!("/Students/Delete/{id}"),
        }
    }
}

/// Result of a record operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<V> {
    View(V),
    Redirect(Redirect),
    NotFound,
}

impl<V> Outcome<V> {
    /// The view payload, if this outcome renders one.
    pub fn into_view(self) -> Option<V> {
        match self {
            Outcome::View(view) => Some(view),
            _ => None,
        }
    }
}

/// Ordered student list plus the keys for the sortable column headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentList {
    pub students: Vec<Student>,
    pub order: SortOrder,
    /// Key the name header links to.
    pub name_sort: &'static str,
    /// Key the date header links to.
    pub date_sort: &'static str,
}

/// Create or edit form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFormView {
    /// Set when editing an existing student.
    pub id: Option<StudentId>,
    pub form: StudentForm,
    pub errors: ValidationErrors,
}

/// Delete confirmation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub student: Student,
    pub error_message: Option<&'static str>,
}

/// Student record handler.
///
/// Stateless apart from the store it is constructed with; clone it freely
/// across request handlers.
#[derive(Clone)]
pub struct StudentRecords {
    store: Arc<dyn StudentStore>,
}

impl StudentRecords {
    #[must_use]
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    /// List every student in the order selected by `sort_key`.
    ///
    /// # Errors
    /// Propagates read faults from the store.
    pub async fn list(&self, sort_key: Option<&str>) -> Result<StudentList> {
        let order = SortOrder::from_key(sort_key);
        let students = self.store.list(order).await?;
        debug!(count = students.len(), order = order.key(), "Listed students");

        Ok(StudentList {
            students,
            order,
            name_sort: name_toggle(sort_key),
            date_sort: date_toggle(sort_key),
        })
    }

    /// Fetch one student with enrollments and courses.
    ///
    /// # Errors
    /// Propagates read faults from the store.
    pub async fn details(&self, id: Option<StudentId>) -> Result<Outcome<StudentDetails>> {
        let Some(id) = id else {
            return Ok(Outcome::NotFound);
        };
        Ok(match self.store.find_details(id).await? {
            Some(details) => Outcome::View(details),
            None => Outcome::NotFound,
        })
    }

    /// Empty create form.
    #[must_use]
    pub fn create_form(&self) -> StudentFormView {
        StudentFormView::default()
    }

    /// Validate and insert a new student.
    ///
    /// Never fails: validation problems and store faults both re-render the
    /// form with messages.
    pub async fn create(&self, form: StudentForm) -> Outcome<StudentFormView> {
        let student = match form.validate() {
            Ok(student) => student,
            Err(errors) => {
                debug!(errors = errors.len(), "Create rejected by validation");
                return Outcome::View(StudentFormView {
                    id: None,
                    form,
                    errors,
                });
            }
        };

        match self.store.insert(&student).await {
            Ok(created) => {
                info!(student_id = %created.id, "Student created");
                Outcome::Redirect(Redirect::List)
            }
            Err(e) => {
                warn!(error = %e, "Failed to save new student");
                let mut errors = ValidationErrors::new();
                errors.add_form_error(SAVE_FAILED_MESSAGE);
                Outcome::View(StudentFormView {
                    id: None,
                    form,
                    errors,
                })
            }
        }
    }

    /// Edit form pre-populated from the stored record.
    ///
    /// # Errors
    /// Propagates read faults from the store.
    pub async fn edit_form(&self, id: Option<StudentId>) -> Result<Outcome<StudentFormView>> {
        let Some(id) = id else {
            return Ok(Outcome::NotFound);
        };
        Ok(match self.store.find(id).await? {
            Some(student) => Outcome::View(StudentFormView {
                id: Some(student.id),
                form: StudentForm::from_student(&student),
                errors: ValidationErrors::new(),
            }),
            None => Outcome::NotFound,
        })
    }

    /// Apply submitted fields onto the stored record and save it.
    ///
    /// The record is re-fetched rather than rebuilt from the submission, so
    /// fields missing from `form` keep their stored values and the ID is
    /// never taken from the client.
    ///
    /// # Errors
    /// Propagates read faults from the store. Write faults re-render the form.
    pub async fn edit(
        &self,
        id: Option<StudentId>,
        form: StudentForm,
    ) -> Result<Outcome<StudentFormView>> {
        let Some(id) = id else {
            return Ok(Outcome::NotFound);
        };
        let Some(current) = self.store.find(id).await? else {
            return Ok(Outcome::NotFound);
        };

        let merged = form.merged_onto(&current);
        let updated = match merged.validate() {
            Ok(student) => student.with_id(current.id),
            Err(errors) => {
                debug!(student_id = %id, errors = errors.len(), "Edit rejected by validation");
                return Ok(Outcome::View(StudentFormView {
                    id: Some(id),
                    form: merged,
                    errors,
                }));
            }
        };

        match self.store.update(&updated).await {
            Ok(true) => {
                info!(student_id = %id, "Student updated");
                Ok(Outcome::Redirect(Redirect::List))
            }
            Ok(false) => Ok(Outcome::NotFound),
            Err(e) => {
                warn!(student_id = %id, error = %e, "Failed to save student");
                let mut errors = ValidationErrors::new();
                errors.add_form_error(SAVE_FAILED_MESSAGE);
                Ok(Outcome::View(StudentFormView {
                    id: Some(id),
                    form: merged,
                    errors,
                }))
            }
        }
    }

    /// Delete confirmation page.
    ///
    /// `save_changes_error` is set when a previous delete attempt failed.
    ///
    /// # Errors
    /// Propagates read faults from the store.
    pub async fn delete_confirmation(
        &self,
        id: Option<StudentId>,
        save_changes_error: bool,
    ) -> Result<Outcome<DeleteConfirmation>> {
        let Some(id) = id else {
            return Ok(Outcome::NotFound);
        };
        Ok(match self.store.find(id).await? {
            Some(student) => Outcome::View(DeleteConfirmation {
                student,
                error_message: save_changes_error.then_some(DELETE_FAILED_MESSAGE),
            }),
            None => Outcome::NotFound,
        })
    }

    /// Delete a student.
    ///
    /// Deleting a student that does not exist is not an error. A failed
    /// delete sends the client back to the confirmation page with the
    /// failure flag set.
    ///
    /// # Errors
    /// Propagates read faults from the store.
    pub async fn delete(&self, id: StudentId) -> Result<Redirect> {
        if self.store.find(id).await?.is_none() {
            debug!(student_id = %id, "Delete of missing student ignored");
            return Ok(Redirect::List);
        }

        match self.store.delete(id).await {
            Ok(_) => {
                info!(student_id = %id, "Student deleted");
                Ok(Redirect::List)
            }
            Err(e) => {
                warn!(student_id = %id, error = %e, "Failed to delete student");
                Ok(Redirect::DeleteConfirmation {
                    id,
                    save_changes_error: true,
                })
            }
        }
    }
}
