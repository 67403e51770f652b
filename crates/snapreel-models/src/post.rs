//! Planned posts and planner metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Stage a planned post is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Idea captured, nothing rendered yet
    #[default]
    Draft,
    /// Video rendered for this idea
    Rendered,
    /// Submitted with a future publish time
    Scheduled,
    /// Live on the platform
    Posted,
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Error)]
#[error("unknown post status: {0}")]
pub struct StatusParseError(pub String);

impl PostStatus {
    /// All statuses in pipeline order.
    pub const ALL: [PostStatus; 4] = [
        PostStatus::Draft,
        PostStatus::Rendered,
        PostStatus::Scheduled,
        PostStatus::Posted,
    ];

    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Rendered => "rendered",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Posted => "posted",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Rendered => "Rendered",
            PostStatus::Scheduled => "Scheduled",
            PostStatus::Posted => "Posted",
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "rendered" => Ok(PostStatus::Rendered),
            "scheduled" => Ok(PostStatus::Scheduled),
            "posted" => Ok(PostStatus::Posted),
            other => Err(StatusParseError(other.to_string())),
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A planned post in the content calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedPost {
    /// Unique identifier
    pub id: Uuid,
    /// Offer or hook idea
    pub idea: String,
    /// Scroll-stopping hook line
    pub hook: String,
    /// Call to action
    pub cta: String,
    /// Pipeline stage
    pub status: PostStatus,
    /// When the post should go out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<DateTime<Utc>>,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for creating a planned post.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPlannedPost {
    #[validate(length(min = 1, message = "idea must not be empty"))]
    pub idea: String,
    #[validate(length(min = 1, message = "hook must not be empty"))]
    pub hook: String,
    #[validate(length(min = 1, message = "cta must not be empty"))]
    pub cta: String,
    pub schedule_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl PlannedPost {
    /// Create a new draft entry from a creation payload.
    pub fn from_new(new: NewPlannedPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            idea: new.idea,
            hook: new.hook,
            cta: new.cta,
            status: PostStatus::Draft,
            schedule_at: new.schedule_at,
            notes: new.notes.filter(|n| !n.is_empty()),
        }
    }
}

/// Derived display metrics for the planner.
#[derive(Debug, Clone, Serialize)]
pub struct PlannerMetrics {
    /// Ideas in the pipeline
    pub total: usize,
    /// Entries in the scheduled stage
    pub scheduled: usize,
    /// Entries in the posted stage
    pub posted: usize,
    /// Projected cadence label, e.g. "1.4/day"
    pub cadence: String,
}

/// Build the cadence label: posts-per-day over a week, one decimal place,
/// or a nudge when nothing is scheduled yet.
pub fn cadence_label(total: usize, any_scheduled: bool) -> String {
    if total == 0 || !any_scheduled {
        return "Plan more drops".to_string();
    }
    let per_day = ((total as f64 / 7.0) * 10.0).round() / 10.0;
    if per_day.fract() == 0.0 {
        format!("{}/day", per_day as i64)
    } else {
        format!("{:.1}/day", per_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for status in PostStatus::ALL {
            assert_eq!(PostStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(PostStatus::from_str("published").is_err());
    }

    #[test]
    fn test_status_serde_shape() {
        let json = serde_json::to_string(&PostStatus::Scheduled).unwrap();
        assert_eq!(json, "\"scheduled\"");
    }

    #[test]
    fn test_from_new_defaults_to_draft() {
        let post = PlannedPost::from_new(NewPlannedPost {
            idea: "3 lead magnets".to_string(),
            hook: "I make $540/day".to_string(),
            cta: "Comment START".to_string(),
            schedule_at: None,
            notes: Some(String::new()),
        });
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.notes.is_none());
    }

    #[test]
    fn test_cadence_label() {
        assert_eq!(cadence_label(0, false), "Plan more drops");
        assert_eq!(cadence_label(5, false), "Plan more drops");
        assert_eq!(cadence_label(10, true), "1.4/day");
        assert_eq!(cadence_label(7, true), "1/day");
        assert_eq!(cadence_label(1, true), "0.1/day");
    }
}
