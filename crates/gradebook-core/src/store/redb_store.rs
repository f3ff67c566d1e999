//! # redb-backed Student Storage
//!
//! A disk-backed store using the redb embedded database, providing:
//! - ACID transactions (one write transaction per `save`)
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//!
//! Each student is stored as one postcard-encoded record that embeds its
//! grades, so grade persistence cascades with the owning student. Identifier
//! counters live in the metadata table and survive reopening the database.

use super::{IdCounters, StudentStore};
use crate::{GradebookError, Student, StudentId};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

/// Table for students: StudentId(u64) -> postcard-encoded Student (with grades)
const STUDENTS: TableDefinition<u64, &[u8]> = TableDefinition::new("students");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

const NEXT_STUDENT_ID: &str = "next_student_id";
const NEXT_GRADE_ID: &str = "next_grade_id";

/// Map any redb error into the gradebook error type.
fn io_error(e: impl std::fmt::Display) -> GradebookError {
    GradebookError::IoError(e.to_string())
}

fn encode(student: &Student) -> Result<Vec<u8>, GradebookError> {
    postcard::to_allocvec(student).map_err(|e| GradebookError::SerializationError(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Student, GradebookError> {
    postcard::from_bytes(bytes).map_err(|e| GradebookError::DeserializationError(e.to_string()))
}

/// A disk-backed student store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
    /// Cached copy of the persisted id counters.
    counters: IdCounters,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore")
            .field("next_student_id", &self.counters.next_student)
            .field("next_grade_id", &self.counters.next_grade)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a student database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GradebookError> {
        let db = Database::create(path.as_ref()).map_err(io_error)?;

        // Initialize tables if they don't exist
        {
            let write_txn = db.begin_write().map_err(io_error)?;
            let _ = write_txn.open_table(STUDENTS).map_err(io_error)?;
            let _ = write_txn.open_table(METADATA).map_err(io_error)?;
            write_txn.commit().map_err(io_error)?;
        }

        let counters = {
            let read_txn = db.begin_read().map_err(io_error)?;
            let table = read_txn.open_table(METADATA).map_err(io_error)?;
            let defaults = IdCounters::default();
            IdCounters {
                next_student: table
                    .get(NEXT_STUDENT_ID)
                    .map_err(io_error)?
                    .map(|v| v.value())
                    .unwrap_or(defaults.next_student),
                next_grade: table
                    .get(NEXT_GRADE_ID)
                    .map_err(io_error)?
                    .map(|v| v.value())
                    .unwrap_or(defaults.next_grade),
            }
        };

        Ok(Self { db, counters })
    }

    /// Compact the database file.
    pub fn compact(&mut self) -> Result<(), GradebookError> {
        self.db.compact().map_err(io_error)?;
        Ok(())
    }
}

impl StudentStore for RedbStore {
    fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, GradebookError> {
        let read_txn = self.db.begin_read().map_err(io_error)?;
        let table = read_txn.open_table(STUDENTS).map_err(io_error)?;
        let record = table.get(id.0).map_err(io_error)?;
        record.map(|data| decode(data.value())).transpose()
    }

    fn find_all(&self) -> Result<Vec<Student>, GradebookError> {
        let read_txn = self.db.begin_read().map_err(io_error)?;
        let table = read_txn.open_table(STUDENTS).map_err(io_error)?;
        let mut students = Vec::new();
        for entry in table.iter().map_err(io_error)? {
            let (_, value) = entry.map_err(io_error)?;
            students.push(decode(value.value())?);
        }
        Ok(students)
    }

    fn save(&mut self, mut student: Student) -> Result<Student, GradebookError> {
        let mut counters = self.counters;
        let id = counters.prepare(&mut student)?;
        let bytes = encode(&student)?;

        let write_txn = self.db.begin_write().map_err(io_error)?;
        {
            let mut students = write_txn.open_table(STUDENTS).map_err(io_error)?;
            students
                .insert(id.0, bytes.as_slice())
                .map_err(io_error)?;

            let mut meta = write_txn.open_table(METADATA).map_err(io_error)?;
            meta.insert(NEXT_STUDENT_ID, counters.next_student)
                .map_err(io_error)?;
            meta.insert(NEXT_GRADE_ID, counters.next_grade)
                .map_err(io_error)?;
        }
        write_txn.commit().map_err(io_error)?;

        self.counters = counters;
        Ok(student)
    }

    fn student_count(&self) -> Result<usize, GradebookError> {
        let read_txn = self.db.begin_read().map_err(io_error)?;
        let table = read_txn.open_table(STUDENTS).map_err(io_error)?;
        let len = table.len().map_err(io_error)?;
        Ok(len as usize)
    }

    fn grade_count(&self) -> Result<usize, GradebookError> {
        Ok(self.find_all()?.iter().map(|s| s.grades().len()).sum())
    }
}

// =============================================================================
// TESTS
// =============================================================================
