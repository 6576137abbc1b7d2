//! # Relationship Enrichment
//!
//! Read-model views joining entities through enrollment records. These are
//! stateless: every call recomputes from the store's current contents, so
//! there is no cache to invalidate.
//!
//! Joins are linear scans over the enrollment collection. Acceptable at
//! in-memory scale; a secondary index from student/course id to enrollment
//! ids would remove the repeated scans without changing this contract.
//!
//! ## Dangling references
//!
//! The two membership views tolerate a dangling enrollment (its course or
//! student no longer resolves) by dropping that row silently. A grade with
//! a dangling reference is different: grades must never outlive their
//! parents under cascade delete, so [`full_grades`] treats it as a fatal
//! integrity fault rather than returning partial data.

use crate::stats::{average, round_tenths};
use crate::store::EntityStore;
use crate::types::{
    Course, CourseId, Grade, GradeId, RegistrarError, Student, StudentId,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// VIEW TYPES
// =============================================================================

/// Minimal course projection embedded in views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: CourseId,
    #[serde(rename = "courseId")]
    pub code: String,
    pub name: String,
}

impl From<&Course> for CourseRef {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            code: course.code.clone(),
            name: course.name.clone(),
        }
    }
}

/// Minimal student projection embedded in views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRef {
    pub id: StudentId,
    #[serde(rename = "studentId")]
    pub code: String,
    pub name: String,
}

impl From<&Student> for StudentRef {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            code: student.code.clone(),
            name: student.name.clone(),
        }
    }
}

/// A student with the courses they are enrolled in and their average grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithCourses {
    #[serde(flatten)]
    pub student: Student,
    pub courses: Vec<CourseRef>,
    pub average_grade: f64,
}

/// A course with its enrolled students and the course-wide average grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseWithStudents {
    #[serde(flatten)]
    pub course: Course,
    pub students: Vec<StudentRef>,
    pub average_grade: f64,
}

/// A grade with its student and course resolved to minimal projections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullGrade {
    #[serde(flatten)]
    pub grade: Grade,
    pub student: StudentRef,
    pub course: CourseRef,
}

// =============================================================================
// STUDENT VIEWS
// =============================================================================

/// Enrich a single student with course membership and average grade.
/// Returns `None` when the base student does not exist.
#[must_use]
pub fn student_with_courses(store: &EntityStore, id: StudentId) -> Option<StudentWithCourses> {
    let student = store.student(id)?.clone();

    let courses = store
        .enrollments_by_student(id)
        .filter_map(|e| store.course(e.course))
        .map(CourseRef::from)
        .collect();

    let average_grade = round_tenths(average(store.grades_by_student(id).map(|g| g.score)));

    Some(StudentWithCourses {
        student,
        courses,
        average_grade,
    })
}

/// Enrich every student. O(students x enrollments).
#[must_use]
pub fn students_with_courses(store: &EntityStore) -> Vec<StudentWithCourses> {
    store
        .students()
        .filter_map(|s| student_with_courses(store, s.id))
        .collect()
}

// =============================================================================
// COURSE VIEWS
// =============================================================================

/// Enrich a single course with student membership and average grade.
/// Returns `None` when the base course does not exist.
#[must_use]
pub fn course_with_students(store: &EntityStore, id: CourseId) -> Option<CourseWithStudents> {
    let course = store.course(id)?.clone();

    let students = store
        .enrollments_by_course(id)
        .filter_map(|e| store.student(e.student))
        .map(StudentRef::from)
        .collect();

    let average_grade = round_tenths(average(store.grades_by_course(id).map(|g| g.score)));

    Some(CourseWithStudents {
        course,
        students,
        average_grade,
    })
}

/// Enrich every course. O(courses x enrollments).
#[must_use]
pub fn courses_with_students(store: &EntityStore) -> Vec<CourseWithStudents> {
    store
        .courses()
        .filter_map(|c| course_with_students(store, c.id))
        .collect()
}

// =============================================================================
// GRADE VIEWS
// =============================================================================

/// Resolve a single grade to a [`FullGrade`]. Returns `Ok(None)` when the
/// grade id is absent, and an integrity fault when its student or course
/// cannot be resolved.
pub fn full_grade(
    store: &EntityStore,
    id: GradeId,
) -> Result<Option<FullGrade>, RegistrarError> {
    match store.grade(id) {
        Some(grade) => resolve_grade(store, grade).map(Some),
        None => Ok(None),
    }
}

/// Resolve every grade. Fails as a whole on the first integrity fault
/// rather than returning partial or corrupt data.
pub fn full_grades(store: &EntityStore) -> Result<Vec<FullGrade>, RegistrarError> {
    store.grades().map(|g| resolve_grade(store, g)).collect()
}

fn resolve_grade(store: &EntityStore, grade: &Grade) -> Result<FullGrade, RegistrarError> {
    let student = store
        .student(grade.student)
        .ok_or(RegistrarError::GradeIntegrity(grade.id))?;
    let course = store
        .course(grade.course)
        .ok_or(RegistrarError::GradeIntegrity(grade.id))?;

    Ok(FullGrade {
        grade: grade.clone(),
        student: StudentRef::from(student),
        course: CourseRef::from(course),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewCourse, NewEnrollment, NewGrade, NewStudent};

    fn seed_one_of_each(store: &mut EntityStore) -> (StudentId, CourseId) {
        let student = store.create_student(NewStudent {
            code: "S1001".to_string(),
            name: "Emily Johnson".to_string(),
            email: "emily.johnson@example.com".to_string(),
            year: 3,
            avatar_url: None,
        });
        let course = store.create_course(NewCourse {
            code: "MATH101".to_string(),
            name: "Mathematics 101".to_string(),
            description: None,
            credits: 3,
        });
        store.create_enrollment(NewEnrollment {
            student: student.id,
            course: course.id,
        });
        (student.id, course.id)
    }

    #[test]
    fn student_view_joins_courses_and_averages_grades() {
        let mut store = EntityStore::new();
        let (student, course) = seed_one_of_each(&mut store);
        store.create_grade(NewGrade {
            student,
            course,
            score: 98.5,
            term: "Spring 2023".to_string(),
        });

        let view = student_with_courses(&store, student).expect("student exists");

        assert_eq!(view.courses.len(), 1);
        assert_eq!(view.courses[0].code, "MATH101");
        assert_eq!(view.average_grade, 98.5);
    }

    #[test]
    fn student_view_without_grades_averages_to_zero() {
        let mut store = EntityStore::new();
        let (student, _) = seed_one_of_each(&mut store);

        let view = student_with_courses(&store, student).expect("student exists");
        assert_eq!(view.average_grade, 0.0);
    }

    #[test]
    fn missing_student_yields_none() {
        let store = EntityStore::new();
        assert!(student_with_courses(&store, StudentId(7)).is_none());
        assert!(course_with_students(&store, CourseId(7)).is_none());
    }

    #[test]
    fn dangling_enrollment_is_dropped_silently() {
        let mut store = EntityStore::new();
        let student = store.create_student(NewStudent {
            code: "S1001".to_string(),
            name: "Emily Johnson".to_string(),
            email: "emily.johnson@example.com".to_string(),
            year: 3,
            avatar_url: None,
        });
        // The store does not validate references; point at a course that
        // was never created.
        store.create_enrollment(NewEnrollment {
            student: student.id,
            course: CourseId(99),
        });

        let view = student_with_courses(&store, student.id).expect("student exists");
        assert!(view.courses.is_empty());
    }

    #[test]
    fn course_view_is_symmetric() {
        let mut store = EntityStore::new();
        let (student, course) = seed_one_of_each(&mut store);
        store.create_grade(NewGrade {
            student,
            course,
            score: 75.8,
            term: "Spring 2023".to_string(),
        });
        store.create_grade(NewGrade {
            student,
            course,
            score: 73.8,
            term: "Fall 2023".to_string(),
        });

        let view = course_with_students(&store, course).expect("course exists");
        assert_eq!(view.students.len(), 1);
        assert_eq!(view.students[0].code, "S1001");
        // (75.8 + 73.8) / 2 = 74.8
        assert_eq!(view.average_grade, 74.8);
    }

    #[test]
    fn bulk_views_cover_every_record() {
        let mut store = EntityStore::new();
        seed_one_of_each(&mut store);
        store.create_student(NewStudent {
            code: "S1002".to_string(),
            name: "Daniel Smith".to_string(),
            email: "daniel.smith@example.com".to_string(),
            year: 2,
            avatar_url: None,
        });

        assert_eq!(students_with_courses(&store).len(), 2);
        assert_eq!(courses_with_students(&store).len(), 1);
    }

    #[test]
    fn full_grades_resolve_both_parents() {
        let mut store = EntityStore::new();
        let (student, course) = seed_one_of_each(&mut store);
        let grade = store.create_grade(NewGrade {
            student,
            course,
            score: 98.5,
            term: "Spring 2023".to_string(),
        });

        let full = full_grade(&store, grade.id)
            .expect("no integrity fault")
            .expect("grade exists");
        assert_eq!(full.student.name, "Emily Johnson");
        assert_eq!(full.course.code, "MATH101");

        assert!(full_grade(&store, GradeId(99)).expect("no fault").is_none());
    }

    #[test]
    fn dangling_grade_is_an_integrity_fault() {
        let mut store = EntityStore::new();
        let (student, _) = seed_one_of_each(&mut store);
        // A grade pointing at a course that never existed. Unreachable when
        // all mutations go through cascade delete, but must fail loudly.
        store.create_grade(NewGrade {
            student,
            course: CourseId(99),
            score: 50.0,
            term: "Spring 2023".to_string(),
        });

        let result = full_grades(&store);
        assert!(matches!(
            result,
            Err(RegistrarError::GradeIntegrity(_))
        ));
    }
}
