//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, GradeDto, StudentDto, map_list};
use crate::config::{AppConfig, BackendKind, StorageConfig};
use gradebook_core::{Discipline, GradeId, Gradebook, GradebookError, StudentId};
use serde::Serialize;

/// Print a value as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<(), GradebookError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| GradebookError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &AppConfig) -> Result<(), GradebookError> {
    let gradebook = open_gradebook(&config.storage)?;

    println!("Gradebook Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.server.host);
    println!("  Port:       {}", config.server.port);
    println!("  Backend:    {}", config.storage.backend);
    println!("  Database:   {:?}", config.storage.database);
    println!("  Rate limit: {} req/s", config.server.rate_limit);
    println!();
    println!("Endpoints:");
    println!("  GET    /api/students                 - List students");
    println!("  POST   /api/students                 - Create a student");
    println!("  GET    /api/students/{{id}}/grades     - List grades");
    println!("  POST   /api/students/{{id}}/grades     - Add a grade");
    println!("  DELETE /api/students/{{id}}/grades/{{g}} - Remove a grade");
    println!("  GET    /api/students/{{id}}/average    - Average per discipline");
    println!("  GET    /api/students/{{id}}/max        - Max per discipline");
    println!("  GET    /api/students/{{id}}/promotion  - Promotion per discipline");
    println!("  GET    /health                       - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(gradebook, &config.server).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show student and grade counts.
pub fn cmd_status(storage: &StorageConfig, json_mode: bool) -> Result<(), GradebookError> {
    let gradebook = open_gradebook(storage)?;
    let students = gradebook.student_count()?;
    let grades = gradebook.grade_count()?;

    if json_mode {
        return print_json(&serde_json::json!({
            "database": storage.database.to_string_lossy(),
            "backend": storage.backend.to_string(),
            "student_count": students,
            "grade_count": grades,
        }));
    }

    println!("Gradebook Status");
    println!("================");
    println!("Database: {:?}", storage.database);
    println!("Backend:  {}", storage.backend);
    println!();
    println!("Students: {}", students);
    println!("Grades:   {}", grades);

    Ok(())
}

// =============================================================================
// STUDENT COMMANDS
// =============================================================================

/// List all students.
pub fn cmd_students(storage: &StorageConfig, json_mode: bool) -> Result<(), GradebookError> {
    let gradebook = open_gradebook(storage)?;
    let students: Vec<StudentDto> = map_list(&gradebook.list_students()?);

    if json_mode {
        return print_json(&students);
    }

    if students.is_empty() {
        println!("No students");
        return Ok(());
    }

    println!("{:>6}  {:<20} {:<20} {:<8} {:>6}", "ID", "First", "Last", "Group", "Grades");
    for student in &students {
        println!(
            "{:>6}  {:<20} {:<20} {:<8} {:>6}",
            student.id.unwrap_or_default(),
            student.first_name,
            student.last_name,
            student.group,
            student.grades.len()
        );
    }

    Ok(())
}

/// Create a student.
pub fn cmd_add_student(
    storage: &StorageConfig,
    json_mode: bool,
    first_name: &str,
    last_name: &str,
    group: &str,
) -> Result<(), GradebookError> {
    let mut gradebook = open_gradebook(storage)?;
    let student = StudentDto::from(&gradebook.add_student(first_name, last_name, group)?);

    if json_mode {
        return print_json(&student);
    }

    println!(
        "Created student {} ({} {}, group {})",
        student.id.unwrap_or_default(),
        student.first_name,
        student.last_name,
        student.group
    );
    Ok(())
}

// =============================================================================
// GRADE COMMANDS
// =============================================================================

/// Add a grade to a student.
pub fn cmd_add_grade(
    storage: &StorageConfig,
    json_mode: bool,
    student: u64,
    value: f64,
    discipline: Discipline,
) -> Result<(), GradebookError> {
    let mut gradebook = open_gradebook(storage)?;
    let grade = GradeDto::from(&gradebook.add_grade(StudentId(student), value, discipline)?);

    if json_mode {
        return print_json(&grade);
    }

    println!(
        "Added grade {} to student {}: {} in {}",
        grade.id.unwrap_or_default(),
        student,
        grade.value,
        grade.discipline
    );
    Ok(())
}

/// Remove a grade from a student.
pub fn cmd_remove_grade(
    storage: &StorageConfig,
    json_mode: bool,
    student: u64,
    grade: u64,
) -> Result<(), GradebookError> {
    let mut gradebook = open_gradebook(storage)?;
    let removed = GradeDto::from(&gradebook.remove_grade(StudentId(student), GradeId(grade))?);

    if json_mode {
        return print_json(&removed);
    }

    println!(
        "Removed grade {} from student {} ({} in {})",
        grade, student, removed.value, removed.discipline
    );
    Ok(())
}

/// List a student's grades.
pub fn cmd_grades(
    storage: &StorageConfig,
    json_mode: bool,
    student: u64,
) -> Result<(), GradebookError> {
    let gradebook = open_gradebook(storage)?;
    let grades: Vec<GradeDto> = map_list(&gradebook.grades_for_student(StudentId(student))?);

    if json_mode {
        return print_json(&grades);
    }

    println!("Grades of student {}", student);
    if grades.is_empty() {
        println!("  (none)");
    }
    for grade in &grades {
        println!(
            "  #{:<5} {:<26} {:>6.2}",
            grade.id.unwrap_or_default(),
            grade.discipline.name(),
            grade.value
        );
    }
    Ok(())
}

// =============================================================================
// REPORT COMMAND
// =============================================================================

/// Show average, max and promotion per discipline.
pub fn cmd_report(
    storage: &StorageConfig,
    json_mode: bool,
    student: u64,
) -> Result<(), GradebookError> {
    let gradebook = open_gradebook(storage)?;
    let id = StudentId(student);
    let average = gradebook.average_per_discipline(id)?;
    let max = gradebook.max_per_discipline(id)?;
    let promotion = gradebook.promotion_per_discipline(id)?;

    if json_mode {
        return print_json(&serde_json::json!({
            "student": student,
            "average": average,
            "max": max,
            "promotion": promotion,
        }));
    }

    println!("Report for student {}", student);
    println!();
    println!("{:<26} {:>8} {:>8}  {}", "Discipline", "Average", "Max", "Promoted");
    for discipline in Discipline::ALL {
        let avg = average
            .get(&discipline)
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        let top = max
            .get(&discipline)
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        let promoted = promotion.get(&discipline).copied().unwrap_or(false);
        println!(
            "{:<26} {:>8} {:>8}  {}",
            discipline.name(),
            avg,
            top,
            if promoted { "yes" } else { "no" }
        );
    }
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize new database.
pub fn cmd_init(storage: &StorageConfig, force: bool) -> Result<(), GradebookError> {
    if storage.backend == BackendKind::Memory {
        return Err(GradebookError::InvalidRequest(
            "The memory backend has no database to initialize".to_string(),
        ));
    }

    let db_path = &storage.database;
    if db_path.exists() {
        if !force {
            return Err(GradebookError::IoError(
                "Database already exists. Use --force to overwrite.".to_string(),
            ));
        }
        std::fs::remove_file(db_path)
            .map_err(|e| GradebookError::IoError(format!("Remove {:?}: {}", db_path, e)))?;
    }

    let _gradebook = Gradebook::with_redb(db_path)?;
    println!("Initialized new redb database at {:?}", db_path);
    Ok(())
}

/// Compact the database file.
pub fn cmd_compact(storage: &StorageConfig) -> Result<(), GradebookError> {
    let mut gradebook = open_gradebook(storage)?;
    gradebook.compact()?;
    println!("Compacted {:?}", storage.database);
    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Open the gradebook for the configured backend.
pub fn open_gradebook(storage: &StorageConfig) -> Result<Gradebook, GradebookError> {
    match storage.backend {
        BackendKind::Redb => Gradebook::with_redb(&storage.database),
        BackendKind::Memory => {
            tracing::warn!("Using the in-memory backend: changes are lost on exit");
            Ok(Gradebook::new())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
