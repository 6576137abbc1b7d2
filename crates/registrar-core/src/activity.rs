//! # Activity Log
//!
//! A bounded ring of the most recent store mutations, backing the
//! dashboard's recent-activity feed. Events carry a machine-readable kind,
//! a human-readable message, and the mutation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of events retained. Older events are discarded.
pub const ACTIVITY_CAPACITY: usize = 20;

// =============================================================================
// EVENTS
// =============================================================================

/// The kind of mutation an activity event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    AddStudent,
    UpdateStudent,
    RemoveStudent,
    AddCourse,
    UpdateCourse,
    RemoveCourse,
    AddEnrollment,
    RemoveEnrollment,
    AddGrade,
    UpdateGrade,
    RemoveGrade,
}

/// A single recorded mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// LOG
// =============================================================================

/// Bounded, append-only log of recent mutations.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    events: VecDeque<ActivityEvent>,
}

impl ActivityLog {
    /// Create a new empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mutation, stamped with the current time. Discards the
    /// oldest event once [`ACTIVITY_CAPACITY`] is exceeded.
    pub fn record(&mut self, kind: ActivityKind, message: impl Into<String>) {
        self.events.push_back(ActivityEvent {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        });
        while self.events.len() > ACTIVITY_CAPACITY {
            self.events.pop_front();
        }
    }

    /// The most recent events, newest first, at most `limit`.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<ActivityEvent> {
        self.events.iter().rev().take(limit).cloned().collect()
    }

    /// Total number of retained events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check whether the log holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all events. Used after demo seeding so the feed starts clean.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_returns_newest_first() {
        let mut log = ActivityLog::new();
        log.record(ActivityKind::AddStudent, "first");
        log.record(ActivityKind::AddCourse, "second");
        log.record(ActivityKind::AddGrade, "third");

        let recent = log.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message, "third");
        assert_eq!(recent[1].message, "second");
    }

    #[test]
    fn capacity_discards_oldest() {
        let mut log = ActivityLog::new();
        for i in 0..ACTIVITY_CAPACITY + 5 {
            log.record(ActivityKind::AddStudent, format!("event {}", i));
        }

        assert_eq!(log.len(), ACTIVITY_CAPACITY);
        let oldest = log.recent(ACTIVITY_CAPACITY).pop().expect("non-empty");
        assert_eq!(oldest.message, "event 5");
    }

    #[test]
    fn kind_serializes_snake_case() {
        let mut log = ActivityLog::new();
        log.record(ActivityKind::UpdateGrade, "Grade updated");

        let json = serde_json::to_value(log.recent(1)).expect("serialize");
        assert_eq!(json[0]["type"], "update_grade");
        assert!(json[0]["timestamp"].is_string());
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = ActivityLog::new();
        log.record(ActivityKind::AddStudent, "x");
        log.clear();
        assert!(log.is_empty());
    }
}
