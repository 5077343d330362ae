//! Database model types for Diesel ORM.

use chrono::NaiveDate;
use diesel::prelude::*;

use super::schema::{courses, enrollments, students};

/// Database row for a student.
#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StudentRow {
    pub id: i32,
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: NaiveDate,
}

/// Database row for a student (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = students)]
pub struct NewStudentRow {
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: NaiveDate,
}

/// Mutable student columns. The ID is not among them.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = students)]
pub struct StudentChangeset {
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: NaiveDate,
}

/// Database row for a course.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CourseRow {
    pub id: i32,
    pub title: String,
    pub credits: i32,
}

/// Database row for an enrollment (queryable).
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(StudentRow, foreign_key = student_id))]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EnrollmentRow {
    pub id: i32,
    pub student_id: i32,
    pub course_id: i32,
    pub grade: Option<String>,
}

/// Database row for an enrollment (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = enrollments)]
pub struct NewEnrollmentRow {
    pub student_id: i32,
    pub course_id: i32,
    pub grade: Option<String>,
}
