//! # Demo Dataset
//!
//! The fixed dataset loaded on server startup: 5 courses, 4 students,
//! 9 enrollments, 9 grades. The store is process-local and unpersisted,
//! so a restart always returns to exactly this state.

use crate::store::EntityStore;
use crate::types::{CourseId, NewCourse, NewEnrollment, NewGrade, NewStudent, StudentId};

/// Load the demo dataset into `store`. Seeding goes through the normal
/// create operations but leaves the activity feed clean.
///
/// Intended for an empty store; on a non-empty one it simply appends with
/// fresh ids.
pub fn seed_demo(store: &mut EntityStore) {
    let courses = [
        ("MATH101", "Mathematics 101", "Introduction to advanced mathematics", 3),
        ("ENG201", "English 201", "Composition and Literature", 3),
        ("SCI301", "Science 301", "Applied Physics", 4),
        ("HIS202", "History 202", "World History", 3),
        ("PHY301", "Physics 301", "Advanced Physics", 4),
    ];
    let course_ids: Vec<CourseId> = courses
        .into_iter()
        .map(|(code, name, description, credits)| {
            store
                .create_course(NewCourse {
                    code: code.to_string(),
                    name: name.to_string(),
                    description: Some(description.to_string()),
                    credits,
                })
                .id
        })
        .collect();

    let students = [
        ("S1001", "Emily Johnson", "emily.johnson@example.com", 3, 1),
        ("S1002", "Daniel Smith", "daniel.smith@example.com", 2, 2),
        ("S1003", "Sophia Martinez", "sophia.martinez@example.com", 4, 3),
        ("S1004", "Michael Brown", "michael.brown@example.com", 1, 4),
    ];
    let student_ids: Vec<StudentId> = students
        .into_iter()
        .map(|(code, name, email, year, avatar)| {
            store
                .create_student(NewStudent {
                    code: code.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                    year,
                    avatar_url: Some(format!("https://i.pravatar.cc/150?img={}", avatar)),
                })
                .id
        })
        .collect();

    // (student index, course index) pairs.
    let enrollments = [
        (0, 0), // Emily in Math 101
        (0, 2), // Emily in Science 301
        (0, 3), // Emily in History 202
        (1, 1), // Daniel in English 201
        (1, 2), // Daniel in Science 301
        (2, 0), // Sophia in Math 101
        (2, 3), // Sophia in History 202
        (3, 1), // Michael in English 201
        (3, 4), // Michael in Physics 301
    ];
    for (s, c) in enrollments {
        store.create_enrollment(NewEnrollment {
            student: student_ids[s],
            course: course_ids[c],
        });
    }

    let grades = [
        (0, 0, 98.5),
        (0, 2, 97.8),
        (0, 3, 99.2),
        (1, 1, 96.2),
        (1, 2, 96.0),
        (2, 0, 95.7),
        (2, 3, 95.8),
        (3, 1, 75.8),
        (3, 4, 73.8),
    ];
    for (s, c, score) in grades {
        store.create_grade(NewGrade {
            student: student_ids[s],
            course: course_ids[c],
            score,
            term: "Spring 2023".to_string(),
        });
    }

    store.clear_activity();
}

// =============================================================================
// TESTS
// =============================================================================
