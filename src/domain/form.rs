//! Allow-listed student form input and its validation.
//!
//! Only the three editable fields can be bound from a request body. Anything
//! else a client submits (including an `ID`) never reaches the record.

use chrono::NaiveDate;
use serde::Deserialize;

use super::student::{NewStudent, Student};

/// Longest accepted first or last name, in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Wire format of the enrollment date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Editable student fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    LastName,
    FirstMidName,
    EnrollmentDate,
}

impl Field {
    /// Name of the form control carrying this field.
    #[must_use]
    pub fn form_name(self) -> &'static str {
        match self {
            Field::LastName => "LastName",
            Field::FirstMidName => "FirstMidName",
            Field::EnrollmentDate => "EnrollmentDate",
        }
    }

    /// Human-readable label used in messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Field::LastName => "Last Name",
            Field::FirstMidName => "First Name",
            Field::EnrollmentDate => "Enrollment Date",
        }
    }
}

/// A single validation message, either tied to a field or form-wide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Option<Field>,
    pub message: String,
}

/// Messages collected while validating a form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: Some(field),
            message: message.into(),
        });
    }

    /// Record an error that is not attached to any single field.
    pub fn add_form_error(&mut self, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: None,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .filter(move |e| e.field == Some(field))
            .map(|e| e.message.as_str())
    }

    pub fn form_errors(&self) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .filter(|e| e.field.is_none())
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }
}

/// Student fields accepted from a submitted form.
///
/// `None` means the control was absent from the body; `Some("")` means it
/// was submitted blank. Edit uses the distinction to leave absent fields at
/// their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentForm {
    pub last_name: Option<String>,
    pub first_mid_name: Option<String>,
    pub enrollment_date: Option<String>,
}

impl StudentForm {
    /// Pre-populate a form from a stored record.
    #[must_use]
    pub fn from_student(student: &Student) -> Self {
        Self {
            last_name: Some(student.last_name.clone()),
            first_mid_name: Some(student.first_mid_name.clone()),
            enrollment_date: Some(student.enrollment_date.format(DATE_FORMAT).to_string()),
        }
    }

    /// Overlay the submitted fields onto a stored record.
    ///
    /// Fields missing from the submission keep the stored value.
    #[must_use]
    pub fn merged_onto(&self, student: &Student) -> Self {
        let stored = Self::from_student(student);
        Self {
            last_name: self.last_name.clone().or(stored.last_name),
            first_mid_name: self.first_mid_name.clone().or(stored.first_mid_name),
            enrollment_date: self.enrollment_date.clone().or(stored.enrollment_date),
        }
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        let value = match field {
            Field::LastName => &self.last_name,
            Field::FirstMidName => &self.first_mid_name,
            Field::EnrollmentDate => &self.enrollment_date,
        };
        value.as_deref().unwrap_or("")
    }

    /// Check required fields, name lengths and the date format.
    ///
    /// # Errors
    /// Returns every problem found, not just the first.
    pub fn validate(&self) -> Result<NewStudent, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let last_name = required_name(&self.last_name, Field::LastName, &mut errors);
        let first_mid_name = required_name(&self.first_mid_name, Field::FirstMidName, &mut errors);
        let enrollment_date = match present(&self.enrollment_date) {
            None => {
                errors.add(Field::EnrollmentDate, required_message(Field::EnrollmentDate));
                None
            }
            Some(raw) => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add(
                        Field::EnrollmentDate,
                        format!(
                            "The value '{raw}' is not valid for {}.",
                            Field::EnrollmentDate.display_name()
                        ),
                    );
                    None
                }
            },
        };

        match (last_name, first_mid_name, enrollment_date) {
            (Some(last_name), Some(first_mid_name), Some(enrollment_date)) if errors.is_empty() => {
                Ok(NewStudent {
                    last_name,
                    first_mid_name,
                    enrollment_date,
                })
            }
            _ => Err(errors),
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required_message(field: Field) -> String {
    format!("The {} field is required.", field.display_name())
}

fn required_name(
    value: &Option<String>,
    field: Field,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let Some(value) = present(value) else {
        errors.add(field, required_message(field));
        return None;
    };
    if value.chars().count() > MAX_NAME_LEN {
        errors.add(
            field,
            format!(
                "{} cannot be longer than {MAX_NAME_LEN} characters.",
                field.display_name()
            ),
        );
        return None;
    }
    Some(value.to_string())
}
