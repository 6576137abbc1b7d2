//! # Entity Store
//!
//! The in-memory record keeper for Registrar CORE.
//!
//! Four keyed collections (students, courses, enrollments, grades) with
//! per-kind sequential identity assignment. All collections use `BTreeMap`
//! for deterministic ordering; since identifiers are assigned sequentially,
//! iteration order equals insertion order.
//!
//! ## Contract
//!
//! - Lookups return `Option`, deletions return `bool`. The store never
//!   errors for "not found"; status-code decisions belong to the caller.
//! - `create_*` performs no uniqueness enforcement. Natural-key collision
//!   checks are the route layer's responsibility.
//! - Deleting a student or course cascades to every enrollment and grade
//!   referencing it, so no orphaned rows remain after the call returns.

use crate::activity::{ActivityEvent, ActivityKind, ActivityLog};
use crate::types::{
    Course, CourseId, CoursePatch, Enrollment, EnrollmentId, Grade, GradeId, GradePatch,
    NewCourse, NewEnrollment, NewGrade, NewStudent, Student, StudentId, StudentPatch,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// ENTITY STORE
// =============================================================================

/// The in-memory relational store.
///
/// Constructed explicitly and passed by handle to the route layer; never a
/// module-level singleton, so tests build isolated instances per case.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    students: BTreeMap<StudentId, Student>,
    courses: BTreeMap<CourseId, Course>,
    enrollments: BTreeMap<EnrollmentId, Enrollment>,
    grades: BTreeMap<GradeId, Grade>,

    last_student_id: u32,
    last_course_id: u32,
    last_enrollment_id: u32,
    last_grade_id: u32,

    activity: ActivityLog,
}

impl EntityStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // STUDENT OPERATIONS
    // =========================================================================

    /// All students in insertion order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Number of student records.
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Lookup a student by store id.
    #[must_use]
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    /// Lookup a student by natural key (linear scan).
    #[must_use]
    pub fn student_by_code(&self, code: &str) -> Option<&Student> {
        self.students.values().find(|s| s.code == code)
    }

    /// Lookup a student by email (linear scan).
    #[must_use]
    pub fn student_by_email(&self, email: &str) -> Option<&Student> {
        self.students.values().find(|s| s.email == email)
    }

    /// Insert a new student, assigning the next sequential id and stamping
    /// the creation time. Returns the full record.
    pub fn create_student(&mut self, input: NewStudent) -> Student {
        self.last_student_id += 1;
        let student = Student {
            id: StudentId(self.last_student_id),
            code: input.code,
            name: input.name,
            email: input.email,
            year: input.year,
            avatar_url: input.avatar_url,
            created_at: Utc::now(),
        };
        self.activity.record(
            ActivityKind::AddStudent,
            format!("New student added: {}", student.name),
        );
        self.students.insert(student.id, student.clone());
        student
    }

    /// Merge a patch onto an existing student. Fields absent from the patch
    /// are preserved; `avatar_url` set to `Some(None)` clears the value.
    pub fn update_student(&mut self, id: StudentId, patch: StudentPatch) -> Option<Student> {
        let student = self.students.get_mut(&id)?;
        if let Some(code) = patch.code {
            student.code = code;
        }
        if let Some(name) = patch.name {
            student.name = name;
        }
        if let Some(email) = patch.email {
            student.email = email;
        }
        if let Some(year) = patch.year {
            student.year = year;
        }
        if let Some(avatar_url) = patch.avatar_url {
            student.avatar_url = avatar_url;
        }
        let updated = student.clone();
        self.activity.record(
            ActivityKind::UpdateStudent,
            format!("Student updated: {}", updated.name),
        );
        Some(updated)
    }

    /// Delete a student, cascading to every enrollment and grade that
    /// references it. Returns `false` if the id was absent (in which case
    /// nothing is touched — no rows can reference a nonexistent student).
    pub fn delete_student(&mut self, id: StudentId) -> bool {
        let Some(student) = self.students.get(&id) else {
            return false;
        };
        let name = student.name.clone();

        // Cascade: enrollments first, then grades, then the record itself.
        self.enrollments.retain(|_, e| e.student != id);
        self.grades.retain(|_, g| g.student != id);
        self.students.remove(&id);

        self.activity.record(
            ActivityKind::RemoveStudent,
            format!("Student removed: {}", name),
        );
        true
    }

    // =========================================================================
    // COURSE OPERATIONS
    // =========================================================================

    /// All courses in insertion order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Number of course records.
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Lookup a course by store id.
    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Lookup a course by natural key (linear scan).
    #[must_use]
    pub fn course_by_code(&self, code: &str) -> Option<&Course> {
        self.courses.values().find(|c| c.code == code)
    }

    /// Insert a new course, assigning the next sequential id and stamping
    /// the creation time. Returns the full record.
    pub fn create_course(&mut self, input: NewCourse) -> Course {
        self.last_course_id += 1;
        let course = Course {
            id: CourseId(self.last_course_id),
            code: input.code,
            name: input.name,
            description: input.description,
            credits: input.credits,
            created_at: Utc::now(),
        };
        self.activity.record(
            ActivityKind::AddCourse,
            format!("New course added: {}", course.name),
        );
        self.courses.insert(course.id, course.clone());
        course
    }

    /// Merge a patch onto an existing course.
    pub fn update_course(&mut self, id: CourseId, patch: CoursePatch) -> Option<Course> {
        let course = self.courses.get_mut(&id)?;
        if let Some(code) = patch.code {
            course.code = code;
        }
        if let Some(name) = patch.name {
            course.name = name;
        }
        if let Some(description) = patch.description {
            course.description = description;
        }
        if let Some(credits) = patch.credits {
            course.credits = credits;
        }
        let updated = course.clone();
        self.activity.record(
            ActivityKind::UpdateCourse,
            format!("Course updated: {}", updated.name),
        );
        Some(updated)
    }

    /// Delete a course, cascading to every enrollment and grade that
    /// references it.
    pub fn delete_course(&mut self, id: CourseId) -> bool {
        let Some(course) = self.courses.get(&id) else {
            return false;
        };
        let name = course.name.clone();

        self.enrollments.retain(|_, e| e.course != id);
        self.grades.retain(|_, g| g.course != id);
        self.courses.remove(&id);

        self.activity.record(
            ActivityKind::RemoveCourse,
            format!("Course removed: {}", name),
        );
        true
    }

    // =========================================================================
    // ENROLLMENT OPERATIONS
    // =========================================================================

    /// All enrollments in insertion order.
    pub fn enrollments(&self) -> impl Iterator<Item = &Enrollment> {
        self.enrollments.values()
    }

    /// Lookup an enrollment by store id.
    #[must_use]
    pub fn enrollment(&self, id: EnrollmentId) -> Option<&Enrollment> {
        self.enrollments.get(&id)
    }

    /// All enrollments for a student (linear filter).
    pub fn enrollments_by_student(
        &self,
        student: StudentId,
    ) -> impl Iterator<Item = &Enrollment> {
        self.enrollments.values().filter(move |e| e.student == student)
    }

    /// All enrollments for a course (linear filter).
    pub fn enrollments_by_course(&self, course: CourseId) -> impl Iterator<Item = &Enrollment> {
        self.enrollments.values().filter(move |e| e.course == course)
    }

    /// Check whether a student is enrolled in a course.
    #[must_use]
    pub fn is_enrolled(&self, student: StudentId, course: CourseId) -> bool {
        self.enrollments
            .values()
            .any(|e| e.student == student && e.course == course)
    }

    /// Insert a new enrollment, assigning the next sequential id and
    /// stamping the enrollment date. The caller must have verified that the
    /// referenced student and course exist.
    pub fn create_enrollment(&mut self, input: NewEnrollment) -> Enrollment {
        self.last_enrollment_id += 1;
        let enrollment = Enrollment {
            id: EnrollmentId(self.last_enrollment_id),
            student: input.student,
            course: input.course,
            enrollment_date: Utc::now(),
        };
        let message = format!(
            "{} enrolled in {}",
            self.student_label(input.student),
            self.course_label(input.course)
        );
        self.activity.record(ActivityKind::AddEnrollment, message);
        self.enrollments.insert(enrollment.id, enrollment.clone());
        enrollment
    }

    /// Delete an enrollment. Returns `false` if the id was absent.
    pub fn delete_enrollment(&mut self, id: EnrollmentId) -> bool {
        let Some(enrollment) = self.enrollments.remove(&id) else {
            return false;
        };
        let message = format!(
            "Enrollment removed: {} in {}",
            self.student_label(enrollment.student),
            self.course_label(enrollment.course)
        );
        self.activity.record(ActivityKind::RemoveEnrollment, message);
        true
    }

    // =========================================================================
    // GRADE OPERATIONS
    // =========================================================================

    /// All grades in insertion order.
    pub fn grades(&self) -> impl Iterator<Item = &Grade> {
        self.grades.values()
    }

    /// Lookup a grade by store id.
    #[must_use]
    pub fn grade(&self, id: GradeId) -> Option<&Grade> {
        self.grades.get(&id)
    }

    /// All grades for a student (linear filter).
    pub fn grades_by_student(&self, student: StudentId) -> impl Iterator<Item = &Grade> {
        self.grades.values().filter(move |g| g.student == student)
    }

    /// All grades for a course (linear filter).
    pub fn grades_by_course(&self, course: CourseId) -> impl Iterator<Item = &Grade> {
        self.grades.values().filter(move |g| g.course == course)
    }

    /// Insert a new grade, assigning the next sequential id and stamping
    /// the graded date. The caller must have verified the enrollment exists.
    pub fn create_grade(&mut self, input: NewGrade) -> Grade {
        self.last_grade_id += 1;
        let grade = Grade {
            id: GradeId(self.last_grade_id),
            student: input.student,
            course: input.course,
            score: input.score,
            term: input.term,
            graded_date: Utc::now(),
        };
        let message = format!(
            "Grade recorded: {} for {}",
            self.course_label(input.course),
            self.student_label(input.student)
        );
        self.activity.record(ActivityKind::AddGrade, message);
        self.grades.insert(grade.id, grade.clone());
        grade
    }

    /// Merge a patch onto an existing grade. The `(student, course)` pair
    /// is fixed at creation and is not re-validated here.
    pub fn update_grade(&mut self, id: GradeId, patch: GradePatch) -> Option<Grade> {
        let grade = self.grades.get_mut(&id)?;
        if let Some(score) = patch.score {
            grade.score = score;
        }
        if let Some(term) = patch.term {
            grade.term = term;
        }
        let updated = grade.clone();
        let message = format!(
            "Grade updated: {} for {}",
            self.course_label(updated.course),
            self.student_label(updated.student)
        );
        self.activity.record(ActivityKind::UpdateGrade, message);
        Some(updated)
    }

    /// Delete a grade. Returns `false` if the id was absent.
    pub fn delete_grade(&mut self, id: GradeId) -> bool {
        let Some(grade) = self.grades.remove(&id) else {
            return false;
        };
        let message = format!(
            "Grade removed: {} for {}",
            self.course_label(grade.course),
            self.student_label(grade.student)
        );
        self.activity.record(ActivityKind::RemoveGrade, message);
        true
    }

    // =========================================================================
    // ACTIVITY & SNAPSHOT
    // =========================================================================

    /// The most recent mutation events, newest first, at most `limit`.
    #[must_use]
    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityEvent> {
        self.activity.recent(limit)
    }

    /// Drop all recorded activity. Called after demo seeding so the feed
    /// reflects only live mutations.
    pub fn clear_activity(&mut self) {
        self.activity.clear();
    }

    /// A full copy of the current dataset, e.g. for JSON export.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            students: self.students.values().cloned().collect(),
            courses: self.courses.values().cloned().collect(),
            enrollments: self.enrollments.values().cloned().collect(),
            grades: self.grades.values().cloned().collect(),
        }
    }

    // Display labels for activity messages. Falls back to the raw id when
    // the referenced record is gone or was never created.
    fn student_label(&self, id: StudentId) -> String {
        self.students
            .get(&id)
            .map_or_else(|| format!("student #{}", id.0), |s| s.name.clone())
    }

    fn course_label(&self, id: CourseId) -> String {
        self.courses
            .get(&id)
            .map_or_else(|| format!("course #{}", id.0), |c| c.name.clone())
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// A point-in-time copy of all four collections, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
    pub grades: Vec<Grade>,
}

// =============================================================================
// TESTS
// =============================================================================
