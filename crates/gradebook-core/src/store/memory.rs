//! In-memory student store.

use super::{IdCounters, StudentStore};
use crate::{GradebookError, Student, StudentId};
use std::collections::BTreeMap;

/// A volatile store keeping every student in a `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    students: BTreeMap<StudentId, Student>,
    counters: IdCounters,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StudentStore for MemoryStore {
    fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, GradebookError> {
        Ok(self.students.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Student>, GradebookError> {
        Ok(self.students.values().cloned().collect())
    }

    fn save(&mut self, mut student: Student) -> Result<Student, GradebookError> {
        let id = self.counters.prepare(&mut student)?;
        self.students.insert(id, student.clone());
        Ok(student)
    }

    fn student_count(&self) -> Result<usize, GradebookError> {
        Ok(self.students.len())
    }

    fn grade_count(&self) -> Result<usize, GradebookError> {
        Ok(self.students.values().map(|s| s.grades().len()).sum())
    }
}
