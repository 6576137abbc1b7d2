//! # registrar-core
//!
//! The in-memory academic records engine for Registrar - THE LOGIC.
//!
//! This crate owns the four entity collections (students, courses,
//! enrollments, grades) and everything computed from them: relationship
//! enrichment views, the aggregation engine behind the dashboard, the
//! recent-activity feed, and the demo seed dataset.
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network dependencies
//! - Deterministic iteration: `BTreeMap` only, no `HashMap`
//! - The store signals "not found" with `Option`/`bool`, never errors;
//!   validation and natural-key uniqueness are the caller's responsibility
//! - Enrichment and aggregation hold no state: every view is recomputed
//!   from the store's current contents per call

// =============================================================================
// MODULES
// =============================================================================

pub mod activity;
pub mod enrich;
pub mod seed;
pub mod stats;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Course, CourseId, CoursePatch, Enrollment, EnrollmentId, Grade, GradeId, GradePatch,
    NewCourse, NewEnrollment, NewGrade, NewStudent, RegistrarError, Student, StudentId,
    StudentPatch,
};

// =============================================================================
// RE-EXPORTS: Store & Views
// =============================================================================

pub use activity::{ActivityEvent, ActivityKind, ActivityLog};
pub use enrich::{
    CourseRef, CourseWithStudents, FullGrade, StudentRef, StudentWithCourses,
    course_with_students, courses_with_students, full_grade, full_grades, student_with_courses,
    students_with_courses,
};
pub use seed::seed_demo;
pub use stats::{
    DashboardStats, GradeDistribution, LetterGrade, TopStudent, average, dashboard_stats,
    round_tenths,
};
pub use store::{EntityStore, Snapshot};
