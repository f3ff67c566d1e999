//! # Student Storage
//!
//! The `StudentStore` trait is the persistence seam of the gradebook.
//!
//! A store owns identifier assignment: `save` gives an id to a new student and
//! to every grade that has none yet, then checks that each grade points back
//! at its owner. Grades are persisted together with their student, so
//! removing a grade from a student and saving it removes the grade.
//!
//! Two backends:
//! - [`MemoryStore`]: `BTreeMap` in memory (volatile)
//! - [`RedbStore`]: redb embedded database (ACID, persistent)

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::primitives::FIRST_ID;
use crate::{GradeId, GradebookError, Student, StudentId};

/// Persistence operations for students and their grades.
pub trait StudentStore {
    /// Lookup a student by id.
    fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, GradebookError>;

    /// All students in ascending id order.
    fn find_all(&self) -> Result<Vec<Student>, GradebookError>;

    /// Persist a student and its grades, returning the stored record.
    fn save(&mut self, student: Student) -> Result<Student, GradebookError>;

    /// Number of stored students.
    fn student_count(&self) -> Result<usize, GradebookError>;

    /// Number of stored grades across all students.
    fn grade_count(&self) -> Result<usize, GradebookError>;
}

// =============================================================================
// IDENTIFIER ASSIGNMENT
// =============================================================================

/// Next identifiers to hand out. Persisted by backends that survive restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IdCounters {
    pub next_student: u64,
    pub next_grade: u64,
}

impl Default for IdCounters {
    fn default() -> Self {
        Self {
            next_student: FIRST_ID,
            next_grade: FIRST_ID,
        }
    }
}

impl IdCounters {
    /// Assign missing ids on `student` and validate grade ownership.
    ///
    /// Ids the record already carries move the counters past them, so they are
    /// never handed out again. Counters are only advanced on success, so a rejected save leaves the
    /// store untouched.
    pub(crate) fn prepare(&mut self, student: &mut Student) -> Result<StudentId, GradebookError> {
        let mut next = *self;

        let id = match student.id() {
            Some(id) => {
                next.next_student = next.next_student.max(id.0.saturating_add(1));
                id
            }
            None => {
                let id = StudentId(next.next_student);
                next.next_student = next.next_student.saturating_add(1);
                student.assign_id(id);
                id
            }
        };

        for grade in student.grades_mut() {
            if grade.student() != Some(id) {
                return Err(GradebookError::OwnershipMismatch {
                    grade: grade.id().unwrap_or(GradeId(0)),
                    student: id,
                });
            }
            match grade.id() {
                Some(existing) => {
                    next.next_grade = next.next_grade.max(existing.0.saturating_add(1));
                }
                None => {
                    grade.assign_id(GradeId(next.next_grade));
                    next.next_grade = next.next_grade.saturating_add(1);
                }
            }
        }

        *self = next;
        Ok(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
