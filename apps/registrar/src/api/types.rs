//! # API Request/Response Types
//!
//! JSON request bodies and the shared error/health response shapes.
//!
//! Each create request validates itself and converts into the core's
//! insert input; the store assumes pre-validated data and performs no
//! checks of its own. Partial updates deserialize straight into the
//! core patch types, with the field-level constraints re-checked here
//! before the patch is applied.

use registrar_core::{
    CourseId, CoursePatch, GradePatch, NewCourse, NewEnrollment, NewGrade, NewStudent,
    RegistrarError, StudentId, StudentPatch,
};
use serde::{Deserialize, Serialize};

/// Bounds for grade scores.
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Bounds for a student's academic year.
pub const MIN_YEAR: u8 = 1;
pub const MAX_YEAR: u8 = 4;

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Uniform error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// STUDENT REQUESTS
// =============================================================================

/// Body of `POST /api/students`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[serde(rename = "studentId")]
    pub code: String,
    pub name: String,
    pub email: String,
    pub year: u8,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl CreateStudentRequest {
    /// Validate and convert into the store's insert input.
    pub fn into_new_student(self) -> Result<NewStudent, RegistrarError> {
        if self.code.trim().is_empty() {
            return Err(validation("studentId must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(validation("name must not be empty"));
        }
        validate_email(&self.email)?;
        validate_year(self.year)?;

        Ok(NewStudent {
            code: self.code,
            name: self.name,
            email: self.email,
            year: self.year,
            avatar_url: self.avatar_url,
        })
    }
}

/// Field-level checks for `PUT /api/students/{id}` bodies. Omitted fields
/// are not constrained.
pub fn validate_student_patch(patch: &StudentPatch) -> Result<(), RegistrarError> {
    if let Some(code) = &patch.code {
        if code.trim().is_empty() {
            return Err(validation("studentId must not be empty"));
        }
    }
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(validation("name must not be empty"));
        }
    }
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }
    if let Some(year) = patch.year {
        validate_year(year)?;
    }
    Ok(())
}

// =============================================================================
// COURSE REQUESTS
// =============================================================================

/// Body of `POST /api/courses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[serde(rename = "courseId")]
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub credits: u32,
}

impl CreateCourseRequest {
    /// Validate and convert into the store's insert input.
    pub fn into_new_course(self) -> Result<NewCourse, RegistrarError> {
        if self.code.trim().is_empty() {
            return Err(validation("courseId must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(validation("name must not be empty"));
        }
        if self.credits == 0 {
            return Err(validation("credits must be at least 1"));
        }

        Ok(NewCourse {
            code: self.code,
            name: self.name,
            description: self.description,
            credits: self.credits,
        })
    }
}

/// Field-level checks for `PUT /api/courses/{id}` bodies.
pub fn validate_course_patch(patch: &CoursePatch) -> Result<(), RegistrarError> {
    if let Some(code) = &patch.code {
        if code.trim().is_empty() {
            return Err(validation("courseId must not be empty"));
        }
    }
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(validation("name must not be empty"));
        }
    }
    if let Some(credits) = patch.credits {
        if credits == 0 {
            return Err(validation("credits must be at least 1"));
        }
    }
    Ok(())
}

// =============================================================================
// ENROLLMENT REQUESTS
// =============================================================================

/// Body of `POST /api/enrollments`. Carries only the two references; the
/// handler checks both exist and that the pair is not already enrolled.
pub type CreateEnrollmentRequest = NewEnrollment;

// =============================================================================
// GRADE REQUESTS
// =============================================================================

/// Body of `POST /api/grades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeRequest {
    #[serde(rename = "studentId")]
    pub student: StudentId,
    #[serde(rename = "courseId")]
    pub course: CourseId,
    pub score: f64,
    pub term: String,
}

impl CreateGradeRequest {
    /// Validate and convert into the store's insert input.
    pub fn into_new_grade(self) -> Result<NewGrade, RegistrarError> {
        validate_score(self.score)?;
        if self.term.trim().is_empty() {
            return Err(validation("term must not be empty"));
        }

        Ok(NewGrade {
            student: self.student,
            course: self.course,
            score: self.score,
            term: self.term,
        })
    }
}

/// Field-level checks for `PUT /api/grades/{id}` bodies.
pub fn validate_grade_patch(patch: &GradePatch) -> Result<(), RegistrarError> {
    if let Some(score) = patch.score {
        validate_score(score)?;
    }
    if let Some(term) = &patch.term {
        if term.trim().is_empty() {
            return Err(validation("term must not be empty"));
        }
    }
    Ok(())
}

// =============================================================================
// SHARED CHECKS
// =============================================================================

fn validation(msg: &str) -> RegistrarError {
    RegistrarError::Validation(msg.to_string())
}

fn validate_email(email: &str) -> Result<(), RegistrarError> {
    // Shape check only; deliverability is not this layer's problem.
    let valid = email.contains('@') && !email.starts_with('@') && !email.ends_with('@');
    if valid {
        Ok(())
    } else {
        Err(validation("email is not a valid address"))
    }
}

fn validate_year(year: u8) -> Result<(), RegistrarError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(RegistrarError::Validation(format!(
            "year must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )))
    }
}

fn validate_score(score: f64) -> Result<(), RegistrarError> {
    if score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score) {
        Ok(())
    } else {
        Err(RegistrarError::Validation(format!(
            "score must be between {} and {}",
            MIN_SCORE, MAX_SCORE
        )))
    }
}
