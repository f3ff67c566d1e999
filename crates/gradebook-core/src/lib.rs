//! # gradebook-core
//!
//! The logic of the gradebook service: students, their grades, and the
//! per-discipline aggregates computed from them.
//!
//! ## Layout
//!
//! - `types` - identifiers, `Discipline`, `GradebookError`
//! - `student` - the `Student` / `Grade` records and their ownership rules
//! - `aggregation` - pure average / max / promotion functions
//! - `store` - the `StudentStore` trait with in-memory and redb backends
//! - `gradebook` - the `Gradebook` service handle used by the app layer
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies
//! - Per-discipline results are `BTreeMap`s (ordered by `Discipline`)
//! - Errors are returned, never logged, from this crate

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregation;
pub mod gradebook;
pub mod primitives;
pub mod store;
pub mod student;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use gradebook::{Gradebook, StorageBackend};
pub use store::{MemoryStore, RedbStore, StudentStore};
pub use student::{Grade, Student};
pub use types::{Discipline, GradeId, GradebookError, StudentId};
