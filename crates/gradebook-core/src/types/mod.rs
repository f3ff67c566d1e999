//! # Core Type Definitions
//!
//! This module contains the shared value types of the gradebook:
//! - Record identifiers (`StudentId`, `GradeId`)
//! - The closed `Discipline` enumeration
//! - Error types (`GradebookError`)
//!
//! ## Ordering Guarantees
//!
//! Identifiers and `Discipline` implement `Ord`, so every per-discipline
//! result kept in a `BTreeMap` iterates (and serializes) in declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIERS
// =============================================================================

/// Identifier of a persisted student. Assigned by the store on first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u64);

/// Identifier of a persisted grade. Assigned by the store on first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GradeId(pub u64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for GradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// DISCIPLINE
// =============================================================================

/// The subject a grade was given in.
///
/// The set is closed. Serialized as the upper snake case name
/// (`"ARTIFICIAL_INTELLIGENCE"`), both as a JSON value and as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Discipline {
    Algebra,
    Geometry,
    ArtificialIntelligence,
    ProgrammingFundamentals,
    WebDevelopment,
}

impl Discipline {
    /// Every discipline, in declaration order.
    pub const ALL: [Discipline; 5] = [
        Discipline::Algebra,
        Discipline::Geometry,
        Discipline::ArtificialIntelligence,
        Discipline::ProgrammingFundamentals,
        Discipline::WebDevelopment,
    ];

    /// The wire name of this discipline.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Algebra => "ALGEBRA",
            Self::Geometry => "GEOMETRY",
            Self::ArtificialIntelligence => "ARTIFICIAL_INTELLIGENCE",
            Self::ProgrammingFundamentals => "PROGRAMMING_FUNDAMENTALS",
            Self::WebDevelopment => "WEB_DEVELOPMENT",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Discipline {
    type Err = GradebookError;

    /// Case-insensitive; `-` is accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| GradebookError::InvalidRequest(format!("Unknown discipline: {}", s)))
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in gradebook operations.
#[derive(Debug, Error)]
pub enum GradebookError {
    /// The referenced student does not exist.
    #[error("Student not found: {0}")]
    StudentNotFound(StudentId),

    /// The referenced grade does not exist on the given student.
    #[error("Grade not found: {0}")]
    GradeNotFound(GradeId),

    /// The request carried a value that fails validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A grade's back-reference names a different student than its owner.
    #[error("Grade {grade} does not belong to student {student}")]
    OwnershipMismatch { grade: GradeId, student: StudentId },

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O or storage error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl GradebookError {
    /// True for errors caused by a missing record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::StudentNotFound(_) | Self::GradeNotFound(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
