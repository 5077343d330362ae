//! Builders for domain values used across tests.

use chrono::NaiveDate;

use crate::domain::{Course, CourseId, NewStudent, StudentForm};

/// Build a date, panicking on an invalid one.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// A validated student ready for insertion.
pub fn new_student(last: &str, first: &str, enrolled: NaiveDate) -> NewStudent {
    NewStudent {
        last_name: last.to_string(),
        first_mid_name: first.to_string(),
        enrollment_date: enrolled,
    }
}

/// A form submission with every field present.
pub fn full_form(last: &str, first: &str, enrolled: &str) -> StudentForm {
    StudentForm {
        last_name: Some(last.to_string()),
        first_mid_name: Some(first.to_string()),
        enrollment_date: Some(enrolled.to_string()),
    }
}

/// A catalogue course.
pub fn course(id: i32, title: &str, credits: i32) -> Course {
    Course {
        id: CourseId::new(id),
        title: title.to_string(),
        credits,
    }
}
