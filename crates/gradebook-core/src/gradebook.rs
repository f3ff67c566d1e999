//! # Gradebook Service
//!
//! `Gradebook` is the service layer: it owns a storage backend and exposes
//! every student and grade operation the outer layers need.
//!
//! Every operation that names a student looks it up first and fails with
//! [`GradebookError::StudentNotFound`] before anything is written.
//!
//! ## Storage Backends
//!
//! - `InMemory`: [`MemoryStore`] (fast, volatile)
//! - `Persistent`: [`RedbStore`] (disk-backed, ACID)

use crate::aggregation;
use crate::primitives::{MAX_GROUP_LENGTH, MAX_NAME_LENGTH};
use crate::store::{MemoryStore, RedbStore, StudentStore};
use crate::{Discipline, Grade, GradeId, GradebookError, Student, StudentId};
use std::collections::BTreeMap;
use std::path::Path;

/// Storage backend for a Gradebook.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory store (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

/// The gradebook service handle.
#[derive(Debug, Default)]
pub struct Gradebook {
    backend: StorageBackend,
}

impl Gradebook {
    /// Create an empty gradebook with in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gradebook with persistent redb storage.
    ///
    /// Opens or creates a redb database at the given path.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, GradebookError> {
        Ok(Self {
            backend: StorageBackend::Persistent(RedbStore::open(path)?),
        })
    }

    /// True when backed by redb.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    fn store(&self) -> &dyn StudentStore {
        match &self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    fn store_mut(&mut self) -> &mut dyn StudentStore {
        match &mut self.backend {
            StorageBackend::InMemory(store) => store,
            StorageBackend::Persistent(store) => store,
        }
    }

    fn find_student(&self, id: StudentId) -> Result<Student, GradebookError> {
        self.store()
            .find_by_id(id)?
            .ok_or(GradebookError::StudentNotFound(id))
    }

    // =========================================================================
    // STUDENTS
    // =========================================================================

    /// All students, ascending by id.
    pub fn list_students(&self) -> Result<Vec<Student>, GradebookError> {
        self.store().find_all()
    }

    /// Create and persist a student.
    ///
    /// Names and group are trimmed; each must be non-empty and within its
    /// length limit.
    pub fn add_student(
        &mut self,
        first_name: &str,
        last_name: &str,
        group: &str,
    ) -> Result<Student, GradebookError> {
        let first_name = validate_text("firstName", first_name, MAX_NAME_LENGTH)?;
        let last_name = validate_text("lastName", last_name, MAX_NAME_LENGTH)?;
        let group = validate_text("group", group, MAX_GROUP_LENGTH)?;

        self.store_mut()
            .save(Student::new(first_name, last_name, group))
    }

    pub fn student_count(&self) -> Result<usize, GradebookError> {
        self.store().student_count()
    }

    pub fn grade_count(&self) -> Result<usize, GradebookError> {
        self.store().grade_count()
    }

    // =========================================================================
    // GRADES
    // =========================================================================

    /// Grades of a student, in the order they were added.
    pub fn grades_for_student(&self, id: StudentId) -> Result<Vec<Grade>, GradebookError> {
        Ok(self.find_student(id)?.grades().to_vec())
    }

    /// Attach a new grade to a student and persist it.
    pub fn add_grade(
        &mut self,
        id: StudentId,
        value: f64,
        discipline: Discipline,
    ) -> Result<Grade, GradebookError> {
        let mut student = self.find_student(id)?;
        if !value.is_finite() {
            return Err(GradebookError::InvalidRequest(format!(
                "Grade value must be a finite number, got {}",
                value
            )));
        }

        let position = student.add_grade(Grade::new(value, discipline));
        let saved = self.store_mut().save(student)?;

        saved.grades().get(position).cloned().ok_or_else(|| {
            GradebookError::IoError(format!("Grade lost while saving student {}", id))
        })
    }

    /// Detach a grade from a student and persist the removal.
    ///
    /// Returns the removed grade with its back-reference cleared.
    pub fn remove_grade(
        &mut self,
        id: StudentId,
        grade_id: GradeId,
    ) -> Result<Grade, GradebookError> {
        let mut student = self.find_student(id)?;
        let removed = student
            .remove_grade(grade_id)
            .ok_or(GradebookError::GradeNotFound(grade_id))?;
        self.store_mut().save(student)?;
        Ok(removed)
    }

    // =========================================================================
    // AGGREGATES
    // =========================================================================

    /// Average grade per discipline the student has grades in.
    pub fn average_per_discipline(
        &self,
        id: StudentId,
    ) -> Result<BTreeMap<Discipline, f64>, GradebookError> {
        let student = self.find_student(id)?;
        Ok(aggregation::average_per_discipline(student.grades()))
    }

    /// Highest grade per discipline the student has grades in.
    pub fn max_per_discipline(
        &self,
        id: StudentId,
    ) -> Result<BTreeMap<Discipline, f64>, GradebookError> {
        let student = self.find_student(id)?;
        Ok(aggregation::max_per_discipline(student.grades()))
    }

    /// Promotion flag for every discipline.
    pub fn promotion_per_discipline(
        &self,
        id: StudentId,
    ) -> Result<BTreeMap<Discipline, bool>, GradebookError> {
        let student = self.find_student(id)?;
        Ok(aggregation::promotion_per_discipline(student.grades()))
    }

    // =========================================================================
    // MAINTENANCE
    // =========================================================================

    /// Compact the underlying database. A no-op for in-memory storage.
    pub fn compact(&mut self) -> Result<(), GradebookError> {
        match &mut self.backend {
            StorageBackend::InMemory(_) => Ok(()),
            StorageBackend::Persistent(store) => store.compact(),
        }
    }
}

/// Trim `value` and check it is non-empty and at most `max` bytes.
fn validate_text(field: &str, value: &str, max: usize) -> Result<String, GradebookError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GradebookError::InvalidRequest(format!(
            "{} must not be empty",
            field
        )));
    }
    if trimmed.len() > max {
        return Err(GradebookError::InvalidRequest(format!(
            "{} length {} exceeds maximum {} bytes",
            field,
            trimmed.len(),
            max
        )));
    }
    Ok(trimmed.to_string())
}

// =============================================================================
// TESTS
// =============================================================================
