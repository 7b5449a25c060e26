//! Project domain model.
//!
//! # Responsibility
//! - Define the canonical project record rendered by active/ended lists.
//! - Provide the two-state status machine used by drag-and-drop.
//!
//! # Invariants
//! - `id` is generated once by the store and never reused.
//! - `status` only moves between `Active` and `Ended`; both directions are
//!   allowed and neither state is terminal.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one project.
pub type ProjectId = Uuid;

/// Partition a project currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Newly created or re-opened work.
    Active,
    /// Finished work.
    Ended,
}

impl ProjectStatus {
    /// Both partitions in board display order.
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Ended];

    /// Stable lowercase id used by hosts and list element ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    /// List heading shown above the partition.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE PROJECTS",
            Self::Ended => "ENDED PROJECTS",
        }
    }

    /// Parses a host-supplied status string (case-insensitive, trimmed).
    pub fn parse(value: &str) -> Result<Self, ProjectStatusParseError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            other => Err(ProjectStatusParseError(other.to_string())),
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown project status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatusParseError(pub String);

impl Display for ProjectStatusParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported project status `{}`; expected active|ended",
            self.0
        )
    }
}

impl Error for ProjectStatusParseError {}

/// One project tracked by the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable id, also used as drag payload.
    pub id: ProjectId,
    /// Non-empty title (enforced by the input form, not here).
    pub title: String,
    pub description: String,
    /// Number of people assigned.
    pub members: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a freshly generated id.
    pub fn new(title: impl Into<String>, description: impl Into<String>, members: u32) -> Self {
        Self::with_id(Uuid::new_v4(), title, description, members)
    }

    /// Creates an active project with a caller-provided id.
    pub fn with_id(
        id: ProjectId,
        title: impl Into<String>,
        description: impl Into<String>,
        members: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            members,
            status: ProjectStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Member line rendered on the project card.
    pub fn members_label(&self) -> String {
        if self.members == 1 {
            "1 member assigned".to_string()
        } else {
            format!("{} members assigned", self.members)
        }
    }
}
