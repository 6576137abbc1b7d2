//! # API Endpoint Handlers
//!
//! The HTTP endpoint handlers. Each handler owns its status-code mapping:
//! 400 for validation faults and duplicate natural keys, 404 for absent
//! ids, 201 on create, 204 on delete, 500 for integrity faults.
//!
//! The store itself never errors for "not found" and never checks
//! uniqueness; every pre-check lives here, under the write lock, so the
//! check and the mutation are atomic with respect to other requests.

use super::{
    AppState,
    types::{
        CreateCourseRequest, CreateEnrollmentRequest, CreateGradeRequest, CreateStudentRequest,
        ErrorResponse, HealthResponse, validate_course_patch, validate_grade_patch,
        validate_student_patch,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use registrar_core::{
    CourseId, CoursePatch, EnrollmentId, GradeId, GradePatch, RegistrarError, StudentId,
    StudentPatch, enrich, stats,
};

// =============================================================================
// RESPONSE HELPERS
// =============================================================================

fn bad_request(msg: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
}

fn not_found(msg: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new(msg))).into_response()
}

fn internal_error(err: &RegistrarError) -> Response {
    tracing::error!(error = %err, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(err.to_string())),
    )
        .into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// STUDENT HANDLERS
// =============================================================================

/// List every student, enriched with course membership and average grade.
pub async fn list_students_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(enrich::students_with_courses(&store))
}

/// `GET /api/students/{id}`
pub async fn get_student_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Response {
    let store = state.store.read().await;
    match enrich::student_with_courses(&store, StudentId(id)) {
        Some(view) => (StatusCode::OK, Json(view)).into_response(),
        None => not_found("Student not found"),
    }
}

/// `POST /api/students`
pub async fn create_student_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> Response {
    let input = match request.into_new_student() {
        Ok(input) => input,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut store = state.store.write().await;
    if store.student_by_code(&input.code).is_some() {
        return bad_request("Student ID already exists");
    }
    if store.student_by_email(&input.email).is_some() {
        return bad_request("Email already exists");
    }

    let student = store.create_student(input);
    (StatusCode::CREATED, Json(student)).into_response()
}

/// `PUT /api/students/{id}`
pub async fn update_student_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(patch): Json<StudentPatch>,
) -> Response {
    if let Err(e) = validate_student_patch(&patch) {
        return bad_request(e.to_string());
    }

    let mut store = state.store.write().await;
    let Some(existing) = store.student(StudentId(id)).cloned() else {
        return not_found("Student not found");
    };

    // A natural key may move onto this record only if no other record
    // holds it already.
    if let Some(code) = &patch.code {
        if *code != existing.code && store.student_by_code(code).is_some() {
            return bad_request("Student ID already exists");
        }
    }
    if let Some(email) = &patch.email {
        if *email != existing.email && store.student_by_email(email).is_some() {
            return bad_request("Email already exists");
        }
    }

    match store.update_student(StudentId(id), patch) {
        Some(student) => (StatusCode::OK, Json(student)).into_response(),
        None => not_found("Student not found"),
    }
}

/// Delete a student, cascading to its enrollments and grades.
pub async fn delete_student_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Response {
    let mut store = state.store.write().await;
    if store.delete_student(StudentId(id)) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("Student not found")
    }
}

// =============================================================================
// COURSE HANDLERS
// =============================================================================

/// List every course, enriched with enrolled students and average grade.
pub async fn list_courses_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(enrich::courses_with_students(&store))
}

/// `GET /api/courses/{id}`
pub async fn get_course_handler(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let store = state.store.read().await;
    match enrich::course_with_students(&store, CourseId(id)) {
        Some(view) => (StatusCode::OK, Json(view)).into_response(),
        None => not_found("Course not found"),
    }
}

/// `POST /api/courses`
pub async fn create_course_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> Response {
    let input = match request.into_new_course() {
        Ok(input) => input,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut store = state.store.write().await;
    if store.course_by_code(&input.code).is_some() {
        return bad_request("Course ID already exists");
    }

    let course = store.create_course(input);
    (StatusCode::CREATED, Json(course)).into_response()
}

/// `PUT /api/courses/{id}`
pub async fn update_course_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(patch): Json<CoursePatch>,
) -> Response {
    if let Err(e) = validate_course_patch(&patch) {
        return bad_request(e.to_string());
    }

    let mut store = state.store.write().await;
    let Some(existing) = store.course(CourseId(id)).cloned() else {
        return not_found("Course not found");
    };

    if let Some(code) = &patch.code {
        if *code != existing.code && store.course_by_code(code).is_some() {
            return bad_request("Course ID already exists");
        }
    }

    match store.update_course(CourseId(id), patch) {
        Some(course) => (StatusCode::OK, Json(course)).into_response(),
        None => not_found("Course not found"),
    }
}

/// Delete a course, cascading to its enrollments and grades.
pub async fn delete_course_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Response {
    let mut store = state.store.write().await;
    if store.delete_course(CourseId(id)) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("Course not found")
    }
}

// =============================================================================
// ENROLLMENT HANDLERS
// =============================================================================

/// List the raw enrollment link records.
pub async fn list_enrollments_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(store.enrollments().cloned().collect::<Vec<_>>())
}

/// `POST /api/enrollments`
pub async fn create_enrollment_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateEnrollmentRequest>,
) -> Response {
    let mut store = state.store.write().await;

    if store.student(request.student).is_none() {
        return bad_request("Student not found");
    }
    if store.course(request.course).is_none() {
        return bad_request("Course not found");
    }
    if store.is_enrolled(request.student, request.course) {
        return bad_request("Student is already enrolled in this course");
    }

    let enrollment = store.create_enrollment(request);
    (StatusCode::CREATED, Json(enrollment)).into_response()
}

/// `DELETE /api/enrollments/{id}`
pub async fn delete_enrollment_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Response {
    let mut store = state.store.write().await;
    if store.delete_enrollment(EnrollmentId(id)) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("Enrollment not found")
    }
}

// =============================================================================
// GRADE HANDLERS
// =============================================================================

/// List every grade with its student and course resolved. A grade whose
/// parents cannot be resolved is an integrity fault: the whole read
/// fails with 500 rather than returning partial data.
pub async fn list_grades_handler(State(state): State<AppState>) -> Response {
    let store = state.store.read().await;
    match enrich::full_grades(&store) {
        Ok(grades) => (StatusCode::OK, Json(grades)).into_response(),
        Err(e) => internal_error(&e),
    }
}

/// Fetch the raw grade record.
pub async fn get_grade_handler(State(state): State<AppState>, Path(id): Path<u32>) -> Response {
    let store = state.store.read().await;
    match store.grade(GradeId(id)) {
        Some(grade) => (StatusCode::OK, Json(grade.clone())).into_response(),
        None => not_found("Grade not found"),
    }
}

/// Record a grade. Requires an existing enrollment for the pair.
pub async fn create_grade_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateGradeRequest>,
) -> Response {
    let input = match request.into_new_grade() {
        Ok(input) => input,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut store = state.store.write().await;
    if store.student(input.student).is_none() {
        return bad_request("Student not found");
    }
    if store.course(input.course).is_none() {
        return bad_request("Course not found");
    }
    if !store.is_enrolled(input.student, input.course) {
        return bad_request("Student is not enrolled in this course");
    }

    let grade = store.create_grade(input);
    (StatusCode::CREATED, Json(grade)).into_response()
}

/// Update a grade's score and term. The enrollment policy is not
/// re-validated on update.
pub async fn update_grade_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(patch): Json<GradePatch>,
) -> Response {
    if let Err(e) = validate_grade_patch(&patch) {
        return bad_request(e.to_string());
    }

    let mut store = state.store.write().await;
    match store.update_grade(GradeId(id), patch) {
        Some(grade) => (StatusCode::OK, Json(grade)).into_response(),
        None => not_found("Grade not found"),
    }
}

/// `DELETE /api/grades/{id}`
pub async fn delete_grade_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Response {
    let mut store = state.store.write().await;
    if store.delete_grade(GradeId(id)) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found("Grade not found")
    }
}

// =============================================================================
// DASHBOARD HANDLER
// =============================================================================

/// `GET /api/dashboard/stats`
pub async fn dashboard_stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store.read().await;
    Json(stats::dashboard_stats(&store))
}
