//! # Aggregation Engine
//!
//! Average-score computation, letter-grade banding, and the dashboard
//! summary. Stateless like the enrichment layer: every call recomputes
//! from the store's current contents.

use crate::activity::ActivityEvent;
use crate::enrich::students_with_courses;
use crate::store::EntityStore;
use crate::types::StudentId;
use serde::{Deserialize, Serialize};

/// Number of events the dashboard's recent-activity feed returns.
pub const RECENT_ACTIVITY_LIMIT: usize = 4;

/// Number of entries in the dashboard's top-students list.
pub const TOP_STUDENT_LIMIT: usize = 3;

// =============================================================================
// AVERAGES
// =============================================================================

/// Round to one decimal place, the precision every reported average uses.
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean of a score sequence. Defined as 0 for the empty
/// sequence so downstream display always has a number.
#[must_use]
pub fn average<I>(scores: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0u32;
    for score in scores {
        sum += score;
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

// =============================================================================
// LETTER BANDING
// =============================================================================

/// The five grade bands. Every score classifies into exactly one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// All bands in display order, highest first.
    pub const ALL: [Self; 5] = [Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Classify a score: A >= 90, B in [80,90), C in [70,80), D in [60,70),
    /// F below 60.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::A
        } else if score >= 80.0 {
            Self::B
        } else if score >= 70.0 {
            Self::C
        } else if score >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }

    /// Display label used in distribution charts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A (90-100%)",
            Self::B => "B (80-89%)",
            Self::C => "C (70-79%)",
            Self::D => "D (60-69%)",
            Self::F => "F (Below 60%)",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
            Self::F => 4,
        }
    }
}

// =============================================================================
// DISTRIBUTION
// =============================================================================

/// Five-band histogram in the chart-friendly `{labels, data}` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeDistribution {
    pub labels: Vec<String>,
    pub data: Vec<u32>,
}

impl GradeDistribution {
    /// Build a histogram from a score sequence. Each score lands in
    /// exactly one band.
    #[must_use]
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut data = vec![0u32; LetterGrade::ALL.len()];
        for score in scores {
            data[LetterGrade::from_score(score).index()] += 1;
        }
        Self {
            labels: LetterGrade::ALL.iter().map(|b| b.label().to_string()).collect(),
            data,
        }
    }

    /// Total count across all bands.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.data.iter().sum()
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// A top-students entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStudent {
    pub id: StudentId,
    pub name: String,
    pub average_grade: f64,
}

/// The dashboard summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: usize,
    pub active_courses: usize,
    /// Mean over ALL grades, not per-entity.
    pub average_grade: f64,
    /// Enrollments with no grade recorded yet.
    pub pending_grades: usize,
    pub grade_distribution: GradeDistribution,
    pub top_students: Vec<TopStudent>,
    pub recent_activity: Vec<ActivityEvent>,
}

/// Compute the dashboard summary from the store's current contents.
#[must_use]
pub fn dashboard_stats(store: &EntityStore) -> DashboardStats {
    let average_grade = round_tenths(average(store.grades().map(|g| g.score)));
    let grade_distribution = GradeDistribution::from_scores(store.grades().map(|g| g.score));

    let pending_grades = store
        .enrollments()
        .filter(|e| {
            !store
                .grades()
                .any(|g| g.student == e.student && g.course == e.course)
        })
        .count();

    // Top 3 by average grade descending; ties break by id ascending so the
    // ordering is deterministic.
    let mut enriched = students_with_courses(store);
    enriched.sort_by(|a, b| {
        b.average_grade
            .total_cmp(&a.average_grade)
            .then_with(|| a.student.id.cmp(&b.student.id))
    });
    let top_students = enriched
        .into_iter()
        .take(TOP_STUDENT_LIMIT)
        .map(|s| TopStudent {
            id: s.student.id,
            name: s.student.name,
            average_grade: s.average_grade,
        })
        .collect();

    DashboardStats {
        total_students: store.student_count(),
        active_courses: store.course_count(),
        average_grade,
        pending_grades,
        grade_distribution,
        top_students,
        recent_activity: store.recent_activity(RECENT_ACTIVITY_LIMIT),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NewCourse, NewEnrollment, NewGrade, NewStudent};

    #[test]
    fn average_of_empty_sequence_is_zero() {
        assert_eq!(average(std::iter::empty()), 0.0);
    }

    #[test]
    fn average_rounds_to_one_decimal_at_reporting_sites() {
        // 91.0, 92.0, 94.0 -> 92.333... -> 92.3
        let mean = round_tenths(average([91.0, 92.0, 94.0]));
        assert_eq!(mean, 92.3);
        assert_eq!(round_tenths(97.84), 97.8);
        assert_eq!(round_tenths(97.86), 97.9);
    }

    #[test]
    fn banding_boundaries_classify_as_specified() {
        let cases = [
            (100.0, LetterGrade::A),
            (90.0, LetterGrade::A),
            (89.9, LetterGrade::B),
            (80.0, LetterGrade::B),
            (79.9, LetterGrade::C),
            (70.0, LetterGrade::C),
            (69.9, LetterGrade::D),
            (60.0, LetterGrade::D),
            (59.9, LetterGrade::F),
            (0.0, LetterGrade::F),
        ];
        for (score, expected) in cases {
            assert_eq!(LetterGrade::from_score(score), expected, "score {}", score);
        }
    }

    #[test]
    fn distribution_counts_boundary_scores_exactly_once() {
        let scores = [59.9, 60.0, 69.9, 70.0, 79.9, 80.0, 89.9, 90.0, 100.0];
        let dist = GradeDistribution::from_scores(scores);

        assert_eq!(dist.total() as usize, scores.len());
        // [A, B, C, D, F]
        assert_eq!(dist.data, vec![2, 2, 2, 2, 1]);
        assert_eq!(dist.labels[0], "A (90-100%)");
        assert_eq!(dist.labels[4], "F (Below 60%)");
    }

    fn add_student(store: &mut EntityStore, code: &str, name: &str) -> StudentId {
        store
            .create_student(NewStudent {
                code: code.to_string(),
                name: name.to_string(),
                email: format!("{}@example.com", code.to_lowercase()),
                year: 1,
                avatar_url: None,
            })
            .id
    }

    #[test]
    fn dashboard_aggregates_the_whole_store() {
        let mut store = EntityStore::new();
        let course = store.create_course(NewCourse {
            code: "MATH101".to_string(),
            name: "Mathematics 101".to_string(),
            description: None,
            credits: 3,
        });
        let alice = add_student(&mut store, "S1001", "Alice");
        let bob = add_student(&mut store, "S1002", "Bob");
        let carol = add_student(&mut store, "S1003", "Carol");

        for s in [alice, bob, carol] {
            store.create_enrollment(NewEnrollment {
                student: s,
                course: course.id,
            });
        }
        store.create_grade(NewGrade {
            student: alice,
            course: course.id,
            score: 95.0,
            term: "Spring 2023".to_string(),
        });
        store.create_grade(NewGrade {
            student: bob,
            course: course.id,
            score: 55.0,
            term: "Spring 2023".to_string(),
        });
        // Carol is enrolled but ungraded.

        let stats = dashboard_stats(&store);

        assert_eq!(stats.total_students, 3);
        assert_eq!(stats.active_courses, 1);
        assert_eq!(stats.average_grade, 75.0);
        assert_eq!(stats.pending_grades, 1);
        assert_eq!(stats.grade_distribution.data, vec![1, 0, 0, 0, 1]);
        assert_eq!(stats.top_students.len(), 3);
        assert_eq!(stats.top_students[0].name, "Alice");
        assert!(!stats.recent_activity.is_empty());
    }

    #[test]
    fn top_student_ties_break_by_id_ascending() {
        let mut store = EntityStore::new();
        let course = store.create_course(NewCourse {
            code: "MATH101".to_string(),
            name: "Mathematics 101".to_string(),
            description: None,
            credits: 3,
        });
        // Four students, all tied at 90.0: only the three lowest ids make
        // the list, in id order.
        let ids: Vec<StudentId> = (1..=4)
            .map(|i| add_student(&mut store, &format!("S100{}", i), &format!("Student {}", i)))
            .collect();
        for &s in &ids {
            store.create_enrollment(NewEnrollment {
                student: s,
                course: course.id,
            });
            store.create_grade(NewGrade {
                student: s,
                course: course.id,
                score: 90.0,
                term: "Spring 2023".to_string(),
            });
        }

        let stats = dashboard_stats(&store);
        let top_ids: Vec<StudentId> = stats.top_students.iter().map(|t| t.id).collect();
        assert_eq!(top_ids, ids[..3]);
    }

    #[test]
    fn dashboard_on_empty_store_is_all_zeroes() {
        let store = EntityStore::new();
        let stats = dashboard_stats(&store);

        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.active_courses, 0);
        assert_eq!(stats.average_grade, 0.0);
        assert_eq!(stats.pending_grades, 0);
        assert_eq!(stats.grade_distribution.total(), 0);
        assert!(stats.top_students.is_empty());
        assert!(stats.recent_activity.is_empty());
    }
}
