use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use thiserror::Error;

/// Kind of document a template holds. Stored as `CV` / `CoverLetter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Cv,
    CoverLetter,
}

impl TemplateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Cv => "CV",
            TemplateKind::CoverLetter => "CoverLetter",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown template type '{0}'")]
pub struct UnknownTemplateKind(pub String);

impl FromStr for TemplateKind {
    type Err = UnknownTemplateKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CV" => Ok(TemplateKind::Cv),
            "CoverLetter" => Ok(TemplateKind::CoverLetter),
            other => Err(UnknownTemplateKind(other.to_string())),
        }
    }
}

impl TryFrom<String> for TemplateKind {
    type Error = UnknownTemplateKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TemplateRow {
    pub id: i64,
    #[sqlx(rename = "type", try_from = "String")]
    pub kind: TemplateKind,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

impl TemplateRow {
    pub fn uploaded_on(&self) -> String {
        self.uploaded_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

impl fmt::Display for TemplateRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.filename)
    }
}
