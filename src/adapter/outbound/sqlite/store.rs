//! SQLite student store implementation.
//!
//! Provides persistent storage for students, enrollments and courses using
//! SQLite and Diesel ORM. Diesel is synchronous, so every call checks out a
//! pooled connection on the blocking thread pool and returns it on drop.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    CourseRow, EnrollmentRow, NewStudentRow, StudentChangeset, StudentRow,
};
use crate::adapter::outbound::sqlite::database::schema::{courses, enrollments, students};
use crate::domain::{
    Course, CourseId, Enrollment, EnrollmentDetail, EnrollmentId, Grade, NewStudent, SortOrder,
    Student, StudentDetails, StudentId,
};
use crate::error::{Error, Result};
use crate::port::StudentStore;

/// SQLite-backed student store.
#[derive(Clone)]
pub struct SqliteStudentStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStudentStore {
    /// Create a new SQLite student store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run `f` with a pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| Error::Connection(e.to_string()))?
    }

    fn student_from_row(row: StudentRow) -> Student {
        Student {
            id: StudentId::new(row.id),
            last_name: row.last_name,
            first_mid_name: row.first_mid_name,
            enrollment_date: row.enrollment_date,
        }
    }

    fn detail_from_rows(enrollment: EnrollmentRow, course: CourseRow) -> Result<EnrollmentDetail> {
        let grade = enrollment
            .grade
            .as_deref()
            .map(|g| Grade::parse(g).ok_or_else(|| Error::Parse(format!("unknown grade '{g}'"))))
            .transpose()?;

        Ok(EnrollmentDetail {
            enrollment: Enrollment {
                id: EnrollmentId::new(enrollment.id),
                student_id: StudentId::new(enrollment.student_id),
                course_id: CourseId::new(enrollment.course_id),
                grade,
            },
            course: Course {
                id: CourseId::new(course.id),
                title: course.title,
                credits: course.credits,
            },
        })
    }
}

fn load_ordered(conn: &mut SqliteConnection, order: SortOrder) -> QueryResult<Vec<StudentRow>> {
    let query = students::table.select(StudentRow::as_select());
    match order {
        SortOrder::NameAscending => query
            .order((students::last_name.asc(), students::id.asc()))
            .load(conn),
        SortOrder::NameDescending => query
            .order((students::last_name.desc(), students::id.desc()))
            .load(conn),
        SortOrder::DateAscending => query
            .order((students::enrollment_date.asc(), students::id.asc()))
            .load(conn),
        SortOrder::DateDescending => query
            .order((students::enrollment_date.desc(), students::id.desc()))
            .load(conn),
    }
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn list(&self, order: SortOrder) -> Result<Vec<Student>> {
        let rows = self
            .with_conn(move |conn| Ok(load_ordered(conn, order)?))
            .await?;
        Ok(rows.into_iter().map(Self::student_from_row).collect())
    }

    async fn find(&self, id: StudentId) -> Result<Option<Student>> {
        let row = self
            .with_conn(move |conn| {
                Ok(students::table
                    .find(id.get())
                    .select(StudentRow::as_select())
                    .first(conn)
                    .optional()?)
            })
            .await?;
        Ok(row.map(Self::student_from_row))
    }

    async fn find_details(&self, id: StudentId) -> Result<Option<StudentDetails>> {
        let loaded = self
            .with_conn(move |conn| {
                Ok(conn.transaction::<_, diesel::result::Error, _>(|conn| {
                    let Some(student) = students::table
                        .find(id.get())
                        .select(StudentRow::as_select())
                        .first(conn)
                        .optional()?
                    else {
                        return Ok(None);
                    };

                    let rows: Vec<(EnrollmentRow, CourseRow)> = EnrollmentRow::belonging_to(&student)
                        .inner_join(courses::table)
                        .select((EnrollmentRow::as_select(), CourseRow::as_select()))
                        .order(enrollments::id.asc())
                        .load(conn)?;

                    Ok(Some((student, rows)))
                })?)
            })
            .await?;

        let Some((student, rows)) = loaded else {
            return Ok(None);
        };
        let enrollments = rows
            .into_iter()
            .map(|(enrollment, course)| Self::detail_from_rows(enrollment, course))
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(StudentDetails {
            student: Self::student_from_row(student),
            enrollments,
        }))
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student> {
        let row = NewStudentRow {
            last_name: student.last_name.clone(),
            first_mid_name: student.first_mid_name.clone(),
            enrollment_date: student.enrollment_date,
        };
        let inserted = self
            .with_conn(move |conn| {
                Ok(diesel::insert_into(students::table)
                    .values(&row)
                    .returning(StudentRow::as_returning())
                    .get_result(conn)?)
            })
            .await?;
        Ok(Self::student_from_row(inserted))
    }

    async fn update(&self, student: &Student) -> Result<bool> {
        let id = student.id.get();
        let changes = StudentChangeset {
            last_name: student.last_name.clone(),
            first_mid_name: student.first_mid_name.clone(),
            enrollment_date: student.enrollment_date,
        };
        let updated = self
            .with_conn(move |conn| {
                Ok(diesel::update(students::table.find(id))
                    .set(&changes)
                    .execute(conn)?)
            })
            .await?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: StudentId) -> Result<bool> {
        let deleted = self
            .with_conn(move |conn| {
                Ok(conn.transaction::<_, diesel::result::Error, _>(|conn| {
                    diesel::delete(enrollments::table.filter(enrollments::student_id.eq(id.get())))
                        .execute(conn)?;
                    diesel::delete(students::table.find(id.get())).execute(conn)
                })?)
            })
            .await?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
    use crate::adapter::outbound::sqlite::database::model::NewEnrollmentRow;

    fn setup_test_db() -> DbPool {
        let pool = create_pool(":memory:", 1).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        pool
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_student(last: &str, first: &str, enrolled: NaiveDate) -> NewStudent {
        NewStudent {
            last_name: last.to_string(),
            first_mid_name: first.to_string(),
            enrollment_date: enrolled,
        }
    }

    fn enroll(pool: &DbPool, student: StudentId, course: i32, grade: Option<&str>) {
        let mut conn = pool.get().unwrap();
        diesel::insert_into(courses::table)
            .values(&CourseRow {
                id: course,
                title: format!("Course {course}"),
                credits: 3,
            })
            .on_conflict_do_nothing()
            .execute(&mut conn)
            .unwrap();
        diesel::insert_into(enrollments::table)
            .values(&NewEnrollmentRow {
                student_id: student.get(),
                course_id: course,
                grade: grade.map(str::to_string),
            })
            .execute(&mut conn)
            .unwrap();
    }

    // -------------------------------------------------------------------------
    // Basic CRUD operations
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn insert_assigns_id_and_find_returns_it() {
        let store = SqliteStudentStore::new(setup_test_db());

        let created = store
            .insert(&new_student("Lee", "Ann", date(2023, 9, 1)))
            .await
            .unwrap();
        let loaded = store.find(created.id).await.unwrap().unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.full_name(), "Lee, Ann");
        assert_eq!(loaded.enrollment_date, date(2023, 9, 1));
    }

    #[tokio::test]
    async fn inserted_ids_are_unique() {
        let store = SqliteStudentStore::new(setup_test_db());

        let a = store.insert(&new_student("A", "a", date(2020, 1, 1))).await.unwrap();
        let b = store.insert(&new_student("B", "b", date(2020, 1, 1))).await.unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn update_overwrites_mutable_fields() {
        let store = SqliteStudentStore::new(setup_test_db());
        let mut student = store
            .insert(&new_student("Lee", "Ann", date(2023, 9, 1)))
            .await
            .unwrap();

        student.first_mid_name = "Anne".into();
        student.enrollment_date = date(2024, 1, 15);
        assert!(store.update(&student).await.unwrap());

        let loaded = store.find(student.id).await.unwrap().unwrap();
        assert_eq!(loaded.first_mid_name, "Anne");
        assert_eq!(loaded.last_name, "Lee");
        assert_eq!(loaded.enrollment_date, date(2024, 1, 15));
    }

    #[tokio::test]
    async fn update_missing_student_reports_false() {
        let store = SqliteStudentStore::new(setup_test_db());
        let ghost = new_student("Ghost", "G", date(2020, 1, 1)).with_id(StudentId::new(404));

        assert!(!store.update(&ghost).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_student_and_enrollments() {
        let pool = setup_test_db();
        let store = SqliteStudentStore::new(pool.clone());
        let student = store
            .insert(&new_student("Lee", "Ann", date(2023, 9, 1)))
            .await
            .unwrap();
        enroll(&pool, student.id, 1050, Some("A"));

        assert!(store.delete(student.id).await.unwrap());
        assert!(store.find(student.id).await.unwrap().is_none());
        assert!(!store.delete(student.id).await.unwrap());

        let mut conn = pool.get().unwrap();
        let remaining: i64 = enrollments::table.count().get_result(&mut conn).unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn foreign_key_cascade_removes_enrollments() {
        let pool = setup_test_db();
        let store = SqliteStudentStore::new(pool.clone());
        let student = store
            .insert(&new_student("Lee", "Ann", date(2023, 9, 1)))
            .await
            .unwrap();
        enroll(&pool, student.id, 1050, None);

        let mut conn = pool.get().unwrap();
        diesel::delete(students::table.find(student.id.get()))
            .execute(&mut conn)
            .unwrap();
        let remaining: i64 = enrollments::table.count().get_result(&mut conn).unwrap();
        assert_eq!(remaining, 0);
    }

    // -------------------------------------------------------------------------
    // Ordering
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn list_orders_match_domain_ordering() {
        let store = SqliteStudentStore::new(setup_test_db());
        for (last, enrolled) in [
            ("Norman", date(2003, 9, 1)),
            ("Alonso", date(2002, 9, 1)),
            ("Li", date(2002, 9, 1)),
            ("Alonso", date(2005, 9, 1)),
        ] {
            store.insert(&new_student(last, "X", enrolled)).await.unwrap();
        }

        for order in [
            SortOrder::NameAscending,
            SortOrder::NameDescending,
            SortOrder::DateAscending,
            SortOrder::DateDescending,
        ] {
            let listed = store.list(order).await.unwrap();
            let mut expected = listed.clone();
            order.sort(&mut expected);
            assert_eq!(listed, expected, "order {order:?}");
        }
    }

    #[tokio::test]
    async fn list_empty_database_returns_empty() {
        let store = SqliteStudentStore::new(setup_test_db());
        assert!(store.list(SortOrder::default()).await.unwrap().is_empty());
    }

    // -------------------------------------------------------------------------
    // Eager loading
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn find_details_loads_enrollments_with_courses() {
        let pool = setup_test_db();
        let store = SqliteStudentStore::new(pool.clone());
        let student = store
            .insert(&new_student("Alexander", "Carson", date(2005, 9, 1)))
            .await
            .unwrap();
        let other = store
            .insert(&new_student("Alonso", "Meredith", date(2002, 9, 1)))
            .await
            .unwrap();
        enroll(&pool, student.id, 1050, Some("A"));
        enroll(&pool, student.id, 4022, None);
        enroll(&pool, other.id, 1050, Some("B"));

        let details = store.find_details(student.id).await.unwrap().unwrap();

        assert_eq!(details.student, student);
        assert_eq!(details.enrollments.len(), 2);
        assert_eq!(details.enrollments[0].course.id, CourseId::new(1050));
        assert_eq!(details.enrollments[0].enrollment.grade, Some(Grade::A));
        assert_eq!(details.enrollments[1].course.title, "Course 4022");
        assert_eq!(details.enrollments[1].enrollment.grade, None);
    }

    #[tokio::test]
    async fn find_details_missing_student_returns_none() {
        let store = SqliteStudentStore::new(setup_test_db());
        assert!(store.find_details(StudentId::new(99)).await.unwrap().is_none());
    }

    // -------------------------------------------------------------------------
    // Faults
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn missing_schema_surfaces_database_error() {
        let pool = create_pool(":memory:", 1).unwrap();
        let store = SqliteStudentStore::new(pool);

        let result = store.insert(&new_student("Lee", "Ann", date(2023, 9, 1))).await;

        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn concurrent_inserts_do_not_corrupt_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("concurrent.db");
        let pool = create_pool(path.to_str().unwrap(), 4).unwrap();
        run_migrations(&pool).unwrap();
        let store = Arc::new(SqliteStudentStore::new(pool));

        let mut handles = vec![];
        for i in 0..10 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .insert(&new_student(&format!("Student{i}"), "X", date(2020, 9, 1)))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.list(SortOrder::default()).await.unwrap().len(), 10);
    }
}
