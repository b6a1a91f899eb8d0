use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::template::{TemplateKind, TemplateRow};

pub async fn insert_template(
    pool: &SqlitePool,
    kind: TemplateKind,
    filename: &str,
    uploaded_at: DateTime<Utc>,
) -> Result<TemplateRow, sqlx::Error> {
    sqlx::query_as::<_, TemplateRow>(
        "INSERT INTO templates (type, filename, uploaded_at) VALUES (?, ?, ?) RETURNING *",
    )
    .bind(kind.as_str())
    .bind(filename)
    .bind(uploaded_at)
    .fetch_one(pool)
    .await
}

/// Templates of one kind, oldest first.
pub async fn list_templates(
    pool: &SqlitePool,
    kind: TemplateKind,
) -> Result<Vec<TemplateRow>, sqlx::Error> {
    sqlx::query_as::<_, TemplateRow>("SELECT * FROM templates WHERE type = ? ORDER BY id ASC")
        .bind(kind.as_str())
        .fetch_all(pool)
        .await
}

pub async fn count_templates(pool: &SqlitePool, kind: TemplateKind) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM templates WHERE type = ?")
        .bind(kind.as_str())
        .fetch_one(pool)
        .await
}
