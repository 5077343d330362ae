//! In-memory student store for testing.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{
    Course, Enrollment, EnrollmentDetail, EnrollmentId, Grade, NewStudent, SortOrder, Student,
    StudentDetails, StudentId,
};
use crate::error::{Error, Result};
use crate::port::StudentStore;

/// Store operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Find,
    FindDetails,
    Insert,
    Update,
    Delete,
}

#[derive(Debug)]
struct State {
    students: BTreeMap<StudentId, Student>,
    enrollments: Vec<EnrollmentDetail>,
    next_id: i32,
    next_enrollment_id: i32,
}

impl Default for State {
    fn default() -> Self {
        Self {
            students: BTreeMap::new(),
            enrollments: Vec::new(),
            next_id: 1,
            next_enrollment_id: 1,
        }
    }
}

/// In-memory store with the same semantics as the SQLite store.
///
/// Any operation can be switched to fail with [`Error::Database`] to
/// simulate storage faults.
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    state: RwLock<State>,
    faults: RwLock<HashSet<StoreOp>>,
}

impl InMemoryStudentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a student under a fixed ID. Later inserts get IDs above it.
    pub fn put(&self, student: Student) {
        let mut state = self.state.write();
        state.next_id = state.next_id.max(student.id.get() + 1);
        state.students.insert(student.id, student);
    }

    /// Attach an enrollment (and its course) to an existing student.
    pub fn enroll(&self, student_id: StudentId, course: Course, grade: Option<Grade>) {
        let mut state = self.state.write();
        let id = EnrollmentId::new(state.next_enrollment_id);
        state.next_enrollment_id += 1;
        state.enrollments.push(EnrollmentDetail {
            enrollment: Enrollment {
                id,
                student_id,
                course_id: course.id,
                grade,
            },
            course,
        });
    }

    /// Make `op` fail until [`heal`](Self::heal) is called.
    pub fn fail(&self, op: StoreOp) {
        self.faults.write().insert(op);
    }

    pub fn heal(&self, op: StoreOp) {
        self.faults.write().remove(&op);
    }

    /// Snapshot of a stored student, bypassing fault injection.
    pub fn get(&self, id: StudentId) -> Option<Student> {
        self.state.read().students.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of enrollments held for a student.
    pub fn enrollment_count(&self, id: StudentId) -> usize {
        self.state
            .read()
            .enrollments
            .iter()
            .filter(|e| e.enrollment.student_id == id)
            .count()
    }

    fn check(&self, op: StoreOp) -> Result<()> {
        if self.faults.read().contains(&op) {
            return Err(Error::Database(format!("simulated {op:?} fault")));
        }
        Ok(())
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn list(&self, order: SortOrder) -> Result<Vec<Student>> {
        self.check(StoreOp::List)?;
        let mut students: Vec<Student> = self.state.read().students.values().cloned().collect();
        order.sort(&mut students);
        Ok(students)
    }

    async fn find(&self, id: StudentId) -> Result<Option<Student>> {
        self.check(StoreOp::Find)?;
        Ok(self.get(id))
    }

    async fn find_details(&self, id: StudentId) -> Result<Option<StudentDetails>> {
        self.check(StoreOp::FindDetails)?;
        let state = self.state.read();
        Ok(state.students.get(&id).map(|student| StudentDetails {
            student: student.clone(),
            enrollments: state
                .enrollments
                .iter()
                .filter(|e| e.enrollment.student_id == id)
                .cloned()
                .collect(),
        }))
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student> {
        self.check(StoreOp::Insert)?;
        let mut state = self.state.write();
        let id = StudentId::new(state.next_id);
        state.next_id += 1;
        let created = student.clone().with_id(id);
        state.students.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, student: &Student) -> Result<bool> {
        self.check(StoreOp::Update)?;
        let mut state = self.state.write();
        match state.students.get_mut(&student.id) {
            Some(stored) => {
                stored.clone_from(student);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: StudentId) -> Result<bool> {
        self.check(StoreOp::Delete)?;
        let mut state = self.state.write();
        state.enrollments.retain(|e| e.enrollment.student_id != id);
        Ok(state.students.remove(&id).is_some())
    }
}
