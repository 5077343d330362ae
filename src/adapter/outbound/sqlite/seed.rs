//! Sample data for an empty database.
//!
//! Seeding is all-or-nothing: the rows go in under one transaction, and a
//! database that already holds any student is left alone.

use chrono::NaiveDate;
use diesel::prelude::*;
use tracing::info;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{CourseRow, NewEnrollmentRow, NewStudentRow};
use crate::adapter::outbound::sqlite::database::schema::{courses, enrollments, students};
use crate::error::{Error, Result};

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Students already existed; nothing was written.
    AlreadySeeded,
    Seeded {
        students: usize,
        courses: usize,
        enrollments: usize,
    },
}

const STUDENTS: &[(&str, &str, (i32, u32, u32))] = &[
    ("Carson", "Alexander", (2005, 9, 1)),
    ("Meredith", "Alonso", (2002, 9, 1)),
    ("Arturo", "Anand", (2003, 9, 1)),
    ("Gytis", "Barzdukas", (2002, 9, 1)),
    ("Yan", "Li", (2002, 9, 1)),
    ("Peggy", "Justice", (2001, 9, 1)),
    ("Laura", "Norman", (2003, 9, 1)),
    ("Nino", "Olivetto", (2005, 9, 1)),
];

const COURSES: &[(i32, &str, i32)] = &[
    (1050, "Chemistry", 3),
    (4022, "Microeconomics", 3),
    (4041, "Macroeconomics", 3),
    (1045, "Calculus", 4),
    (3141, "Trigonometry", 4),
    (2021, "Composition", 3),
    (2042, "Literature", 4),
];

/// (index into `STUDENTS`, course ID, grade)
const ENROLLMENTS: &[(usize, i32, Option<&str>)] = &[
    (0, 1050, Some("A")),
    (0, 4022, Some("C")),
    (0, 4041, Some("B")),
    (1, 1045, Some("B")),
    (1, 3141, Some("F")),
    (1, 2021, Some("F")),
    (2, 1050, None),
    (3, 1050, None),
    (3, 4022, Some("F")),
    (4, 4041, Some("C")),
    (5, 1045, None),
    (6, 3141, Some("A")),
];

/// Populate the database with sample students, courses and enrollments if
/// it has no students yet.
///
/// Blocking; call from a blocking context.
///
/// # Errors
/// Returns [`Error::Seed`] if the seed data is inconsistent, or a database
/// error if any insert fails. Nothing is written in either case.
pub fn seed_if_empty(pool: &DbPool) -> Result<SeedOutcome> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;

    conn.transaction::<_, Error, _>(|conn| {
        let existing: i64 = students::table.count().get_result(conn)?;
        if existing > 0 {
            info!(existing, "Database already seeded");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let mut student_ids = Vec::with_capacity(STUDENTS.len());
        for &(first, last, (y, m, d)) in STUDENTS {
            let enrollment_date = NaiveDate::from_ymd_opt(y, m, d)
                .ok_or_else(|| Error::Seed(format!("invalid date for {last}, {first}")))?;
            let id: i32 = diesel::insert_into(students::table)
                .values(&NewStudentRow {
                    last_name: last.to_string(),
                    first_mid_name: first.to_string(),
                    enrollment_date,
                })
                .returning(students::id)
                .get_result(conn)?;
            student_ids.push(id);
        }

        let course_rows: Vec<CourseRow> = COURSES
            .iter()
            .map(|&(id, title, credits)| CourseRow {
                id,
                title: title.to_string(),
                credits,
            })
            .collect();
        diesel::insert_into(courses::table)
            .values(&course_rows)
            .execute(conn)?;

        let enrollment_rows = ENROLLMENTS
            .iter()
            .map(|&(student, course_id, grade)| {
                let student_id = *student_ids
                    .get(student)
                    .ok_or_else(|| Error::Seed(format!("no seeded student at index {student}")))?;
                Ok(NewEnrollmentRow {
                    student_id,
                    course_id,
                    grade: grade.map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        diesel::insert_into(enrollments::table)
            .values(&enrollment_rows)
            .execute(conn)?;

        let outcome = SeedOutcome::Seeded {
            students: student_ids.len(),
            courses: course_rows.len(),
            enrollments: enrollment_rows.len(),
        };
        info!(?outcome, "Seeded database");
        Ok(outcome)
    })
}
