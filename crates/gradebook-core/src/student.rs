//! # Student and Grade Records
//!
//! A `Student` exclusively owns its `Grade`s. Each grade keeps a non-owning
//! back-reference (the owner's `StudentId`) which the store checks on save.
//!
//! The grade collection is never handed out mutably: callers go through
//! [`Student::add_grade`] and [`Student::remove_grade`], which keep the
//! back-reference in step with the owner.
//!
//! Equality of both records is identity-based: two values are equal when
//! their identifiers are equal, whatever their other fields hold.

use crate::{Discipline, GradeId, StudentId};
use serde::{Deserialize, Serialize};

// =============================================================================
// GRADE
// =============================================================================

/// A single grade in one discipline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    id: Option<GradeId>,
    value: f64,
    discipline: Discipline,
    student: Option<StudentId>,
}

impl Grade {
    /// Create a detached, not yet persisted grade.
    #[must_use]
    pub fn new(value: f64, discipline: Discipline) -> Self {
        Self {
            id: None,
            value,
            discipline,
            student: None,
        }
    }

    /// Store-assigned identifier, `None` until first saved.
    #[must_use]
    pub fn id(&self) -> Option<GradeId> {
        self.id
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// The owning student, `None` while detached or while the owner is unsaved.
    #[must_use]
    pub fn student(&self) -> Option<StudentId> {
        self.student
    }

    pub(crate) fn assign_id(&mut self, id: GradeId) {
        self.id = Some(id);
    }
}

impl PartialEq for Grade {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

// =============================================================================
// STUDENT
// =============================================================================

/// A student and the grades it owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    id: Option<StudentId>,
    first_name: String,
    last_name: String,
    group: String,
    grades: Vec<Grade>,
}

impl Student {
    /// Create a not yet persisted student with no grades.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            group: group.into(),
            grades: Vec::new(),
        }
    }

    /// Store-assigned identifier, `None` until first saved.
    #[must_use]
    pub fn id(&self) -> Option<StudentId> {
        self.id
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Read-only view of the owned grades, in insertion order.
    #[must_use]
    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Attach a grade, pointing its back-reference at this student.
    ///
    /// Returns the position of the grade in [`Student::grades`].
    pub fn add_grade(&mut self, mut grade: Grade) -> usize {
        grade.student = self.id;
        self.grades.push(grade);
        self.grades.len() - 1
    }

    /// Detach the grade with the given id and clear its back-reference.
    ///
    /// Returns `None` if this student owns no such grade.
    pub fn remove_grade(&mut self, id: GradeId) -> Option<Grade> {
        let position = self.grades.iter().position(|g| g.id == Some(id))?;
        let mut grade = self.grades.remove(position);
        grade.student = None;
        Some(grade)
    }

    /// Set the identifier and re-point every owned grade at it.
    pub(crate) fn assign_id(&mut self, id: StudentId) {
        self.id = Some(id);
        for grade in &mut self.grades {
            grade.student = Some(id);
        }
    }

    pub(crate) fn grades_mut(&mut self) -> impl Iterator<Item = &mut Grade> {
        self.grades.iter_mut()
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

// =============================================================================
// TESTS
// =============================================================================
