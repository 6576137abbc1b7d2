//! # Core Type Definitions
//!
//! This module contains all record types for the Registrar in-memory store:
//! - Per-kind record identifiers (`StudentId`, `CourseId`, `EnrollmentId`, `GradeId`)
//! - Stored records (`Student`, `Course`, `Enrollment`, `Grade`)
//! - Insert inputs (`NewStudent`, `NewCourse`, `NewEnrollment`, `NewGrade`)
//! - Partial-update patches (`StudentPatch`, `CoursePatch`, `GradePatch`)
//! - Error types (`RegistrarError`)
//!
//! ## Wire Contract
//!
//! All records serialize with camelCase field names. A record's natural key
//! (the caller-assigned unique string, e.g. `S1001` or `MATH101`) is named
//! `code` in Rust and `studentId`/`courseId` on the wire, keeping it visually
//! distinct from the store-assigned sequential `id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIERS
// =============================================================================

/// Store-assigned identifier for a student record.
/// Sequential per entity kind, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub u32);

/// Store-assigned identifier for a course record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseId(pub u32);

/// Store-assigned identifier for an enrollment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnrollmentId(pub u32);

/// Store-assigned identifier for a grade record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GradeId(pub u32);

// =============================================================================
// STUDENT
// =============================================================================

/// A student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Store-assigned sequential identifier.
    pub id: StudentId,
    /// Natural key, e.g. `S1001`. Unique across students (caller-enforced).
    #[serde(rename = "studentId")]
    pub code: String,
    pub name: String,
    /// Unique across students (caller-enforced).
    pub email: String,
    /// Academic year, 1-4.
    pub year: u8,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a student. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    #[serde(rename = "studentId")]
    pub code: String,
    pub name: String,
    pub email: String,
    pub year: u8,
    pub avatar_url: Option<String>,
}

/// Partial update for a student.
///
/// A `None` field is absent from the patch and leaves the stored value
/// untouched. The nullable `avatar_url` field uses a double option so that
/// "omitted" (`None`) and "explicitly cleared" (`Some(None)`) remain
/// distinguishable after deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StudentPatch {
    #[serde(rename = "studentId")]
    pub code: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub year: Option<u8>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

impl StudentPatch {
    /// Check whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.year.is_none()
            && self.avatar_url.is_none()
    }
}

// =============================================================================
// COURSE
// =============================================================================

/// A course record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Store-assigned sequential identifier.
    pub id: CourseId,
    /// Natural key, e.g. `MATH101`. Unique across courses (caller-enforced).
    #[serde(rename = "courseId")]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: u32,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a course. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    #[serde(rename = "courseId")]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: u32,
}

/// Partial update for a course. Same omitted-vs-cleared semantics as
/// [`StudentPatch`], with `description` as the nullable field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CoursePatch {
    #[serde(rename = "courseId")]
    pub code: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub credits: Option<u32>,
}

impl CoursePatch {
    /// Check whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.credits.is_none()
    }
}

// =============================================================================
// ENROLLMENT
// =============================================================================

/// An enrollment record: the many-to-many link between a student and a
/// course. Created and deleted, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Store-assigned sequential identifier.
    pub id: EnrollmentId,
    #[serde(rename = "studentId")]
    pub student: StudentId,
    #[serde(rename = "courseId")]
    pub course: CourseId,
    pub enrollment_date: DateTime<Utc>,
}

/// Input for creating an enrollment. The caller must verify that both
/// referenced records exist; the store does not re-check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    #[serde(rename = "studentId")]
    pub student: StudentId,
    #[serde(rename = "courseId")]
    pub course: CourseId,
}

// =============================================================================
// GRADE
// =============================================================================

/// A grade record. The `(student, course)` pair should correspond to an
/// existing enrollment; that policy is enforced by the route layer on
/// creation and is not re-validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    /// Store-assigned sequential identifier.
    pub id: GradeId,
    #[serde(rename = "studentId")]
    pub student: StudentId,
    #[serde(rename = "courseId")]
    pub course: CourseId,
    /// Score in 0-100 (caller-validated).
    pub score: f64,
    /// Academic term, e.g. `Spring 2023`.
    pub term: String,
    pub graded_date: DateTime<Utc>,
}

/// Input for creating a grade. The store assigns `id` and `graded_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGrade {
    #[serde(rename = "studentId")]
    pub student: StudentId,
    #[serde(rename = "courseId")]
    pub course: CourseId,
    pub score: f64,
    pub term: String,
}

/// Partial update for a grade. Only `score` and `term` are mutable; the
/// student/course references are fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GradePatch {
    pub score: Option<f64>,
    pub term: Option<String>,
}

impl GradePatch {
    /// Check whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.score.is_none() && self.term.is_none()
    }
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

/// Deserialize a nullable patch field so a present-but-null value maps to
/// `Some(None)` while an absent field stays `None` (via `#[serde(default)]`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Registrar system.
///
/// Store lookups never produce these: "not found" is signalled with
/// `Option`/`bool` so the route layer owns the status-code decision.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// A grade references a student or course that no longer exists.
    /// Unreachable under cascade delete; surfaced as fatal if observed.
    #[error("Grade {} references a missing student or course", (.0).0)]
    GradeIntegrity(GradeId),

    /// Malformed or constraint-violating input, rejected at the route
    /// layer before it reaches the store.
    #[error("{0}")]
    Validation(String),

    /// An I/O error occurred (file or network, app layer only).
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// =============================================================================
// TESTS
// =============================================================================
