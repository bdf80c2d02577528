//! Project records and the form draft used to create or edit them.
//!
//! A `Project` is the only durable entity in the dashboard. Forms work on a
//! `ProjectDraft`, which keeps every field as typed text until submission
//! converts it into a record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_deadline;
use crate::error::{DashResult, DashboardError};
use crate::fields::{PROJECT_COMPLETED, PROJECT_IN_PROGRESS, PROJECT_NOT_STARTED};

/// A tracked project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub description: String,
    /// Free-form label; see `fields::PROJECT_STATUSES` for the usual values.
    pub status: String,
    /// Percentage complete. Not bounded here; forms clamp to 0..=100.
    pub progress: i64,
    /// Serialized as `YYYY-MM-DD`.
    pub deadline: NaiveDate,
}

impl Project {
    /// String form of every field, in declaration order. This is what the list
    /// view's search box matches against.
    pub fn field_strings(&self) -> [String; 6] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.description.clone(),
            self.status.clone(),
            self.progress.to_string(),
            self.deadline.format("%Y-%m-%d").to_string(),
        ]
    }

    /// Case-insensitive substring match across all fields.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self
                .field_strings()
                .iter()
                .any(|value| value.to_lowercase().contains(needle))
    }
}

/// The records a fresh store is populated with.
pub fn seed_projects() -> Vec<Project> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        Project {
            id: 1,
            name: "Website Redesign".into(),
            description: "Complete overhaul of company website".into(),
            status: PROJECT_IN_PROGRESS.into(),
            progress: 65,
            deadline: date(2023, 6, 30),
        },
        Project {
            id: 2,
            name: "Mobile App Launch".into(),
            description: "Ship the first public build to both app stores".into(),
            status: PROJECT_NOT_STARTED.into(),
            progress: 0,
            deadline: date(2023, 9, 15),
        },
        Project {
            id: 3,
            name: "Data Warehouse Migration".into(),
            description: "Move reporting tables off the legacy cluster".into(),
            status: PROJECT_COMPLETED.into(),
            progress: 100,
            deadline: date(2023, 3, 31),
        },
    ]
}

/// Text-typed form state for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub progress: String,
    pub deadline: String,
}

impl ProjectDraft {
    /// Empty draft stamped with the id the new record will receive.
    pub fn blank(id: u64) -> Self {
        ProjectDraft {
            id,
            ..Default::default()
        }
    }

    /// Draft pre-filled from an existing record.
    pub fn from_project(project: &Project) -> Self {
        ProjectDraft {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status.clone(),
            progress: project.progress.to_string(),
            deadline: project.deadline.format("%Y-%m-%d").to_string(),
        }
    }

    /// Convert into a record. Every field is required; progress is clamped to
    /// 0..=100 and the deadline accepts the shorthands of `parse_deadline`.
    pub fn into_project(self, today: NaiveDate) -> DashResult<Project> {
        let name = required("name", &self.name)?;
        let description = required("description", &self.description)?;
        let status = required("status", &self.status)?;
        let progress_raw = required("progress", &self.progress)?;
        let deadline_raw = required("deadline", &self.deadline)?;

        let progress = progress_raw
            .trim_end_matches('%')
            .trim()
            .parse::<i64>()
            .map_err(|_| DashboardError::InvalidNumber {
                field: "progress",
                value: progress_raw.clone(),
            })?
            .clamp(0, 100);
        let deadline = parse_deadline(&deadline_raw, today)?;

        Ok(Project {
            id: self.id,
            name,
            description,
            status,
            progress,
            deadline,
        })
    }
}

fn required(field: &'static str, value: &str) -> DashResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DashboardError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
