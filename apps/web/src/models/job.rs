use std::fmt;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Status every job starts in.
pub const DEFAULT_STATUS: &str = "Applied";

/// Statuses offered as suggestions on the status form. Any other text is stored as-is.
pub const KNOWN_STATUSES: &[&str] = &["Applied", "Interview", "Offer", "Rejected"];

#[derive(Debug, Clone, FromRow)]
pub struct JobApplication {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    pub status: String,
    pub category: Option<String>,
    pub tech_stack: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobApplication {
    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn created_on(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }

    pub fn updated_on(&self) -> String {
        self.updated_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl fmt::Display for JobApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.title, self.company)
    }
}

/// Fields captured by the add-job form.
#[derive(Debug, Clone, Default)]
pub struct NewJobApplication {
    pub title: String,
    pub company: String,
    pub description: Option<String>,
}

impl NewJobApplication {
    /// Both timestamps are set to `now` on creation.
    pub fn into_row(self, now: DateTime<Utc>) -> JobApplication {
        JobApplication {
            id: 0,
            title: self.title,
            company: self.company,
            description: self.description,
            status: DEFAULT_STATUS.to_string(),
            category: None,
            tech_stack: None,
            created_at: now,
            updated_at: now,
        }
    }
}
