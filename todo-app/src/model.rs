//! TodoItem entity and its enumerated fields

use crate::error::TodoError;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier assigned by the repository when an item is first persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wrap a raw id
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw id value
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TodoId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion status of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    /// Not yet done; every item starts here
    #[default]
    Pending,
    /// Completed
    Done,
}

impl Status {
    /// Stored name of the status
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Done => "DONE",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Done => "Done",
        }
    }

    /// The other status
    pub fn toggled(self) -> Self {
        match self {
            Status::Pending => Status::Done,
            Status::Done => Status::Pending,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Status::Pending),
            "DONE" => Ok(Status::Done),
            _ => Err(TodoError::InvalidStatus(s.to_string())),
        }
    }
}

/// Optional importance of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal
    Medium,
    /// Do first
    High,
}

impl Priority {
    /// All priorities, lowest first
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Stored name of the priority
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }

    /// Human-readable label ("Low", "Medium", "High")
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parse a human label; anything else (including "None" and "All") is `None`
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }

    /// Sort rank: High sorts first
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            _ => Err(TodoError::InvalidPriority(s.to_string())),
        }
    }
}

/// A single TODO item
///
/// Instances are working copies. The repository is the source of truth, so a
/// change only sticks once it has been passed to `update` or `set_status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// `None` until the repository assigns one; never changes afterwards
    pub id: Option<TodoId>,
    /// Trimmed, never empty
    pub title: String,
    /// Trimmed; `None` instead of blank
    pub description: Option<String>,
    pub status: Status,
    pub created_at: NaiveDateTime,
    /// Refreshed on every mutation; never earlier than `created_at`
    pub updated_at: NaiveDateTime,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    /// Trimmed, non-empty entries in insertion order; duplicates allowed
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TodoItem {
    /// Create an unpersisted, pending item stamped with `now`
    ///
    /// No normalization happens here; that is the service's job.
    pub fn new(title: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            status: Status::Pending,
            created_at: now,
            updated_at: now,
            due_date: None,
            priority: None,
            tags: Vec::new(),
        }
    }

    /// True once the repository has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.status == Status::Done
    }

    /// True when the item has a due date on or before `date`
    pub fn is_due_by(&self, date: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due <= date)
    }

    /// Set `updated_at`, never letting it fall behind `created_at`
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated_at = now.max(self.created_at);
    }
}
