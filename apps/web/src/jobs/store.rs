use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::job::{JobApplication, NewJobApplication, DEFAULT_STATUS};

/// Inserts a new job with the default status and both timestamps set to `now`.
pub async fn insert_job(
    pool: &SqlitePool,
    new_job: NewJobApplication,
    now: DateTime<Utc>,
) -> Result<JobApplication, sqlx::Error> {
    let row = new_job.into_row(now);
    let job = sqlx::query_as::<_, JobApplication>(
        r#"
        INSERT INTO job_applications
            (title, company, description, status, category, tech_stack, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&row.title)
    .bind(&row.company)
    .bind(&row.description)
    .bind(&row.status)
    .bind(&row.category)
    .bind(&row.tech_stack)
    .bind(row.created_at)
    .bind(row.updated_at)
    .fetch_one(pool)
    .await?;

    info!("Created job {} ({job})", job.id);
    Ok(job)
}

pub async fn list_jobs(pool: &SqlitePool) -> Result<Vec<JobApplication>, sqlx::Error> {
    sqlx::query_as::<_, JobApplication>("SELECT * FROM job_applications ORDER BY id ASC")
        .fetch_all(pool)
        .await
}

pub async fn find_job(pool: &SqlitePool, id: i64) -> Result<Option<JobApplication>, sqlx::Error> {
    sqlx::query_as::<_, JobApplication>("SELECT * FROM job_applications WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Sets a job's status verbatim and stamps `updated_at`, which never moves backwards.
/// Returns `None` without writing anything when the job does not exist.
///
/// A single statement, so the write lock is taken up front instead of upgrading a read
/// transaction. Timestamps are RFC 3339 UTC text and compare chronologically.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: String,
    now: DateTime<Utc>,
) -> Result<Option<JobApplication>, sqlx::Error> {
    let updated = sqlx::query_as::<_, JobApplication>(
        r#"
        UPDATE job_applications
        SET status = ?, updated_at = MAX(updated_at, ?)
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&status)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match &updated {
        Some(job) => info!("Job {} status set to '{}'", job.id, job.status),
        None => info!("Ignored status update for unknown job {id}"),
    }
    Ok(updated)
}

pub async fn count_jobs(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM job_applications")
        .fetch_one(pool)
        .await
}

/// Jobs that have moved past the default status.
pub async fn count_jobs_past_applied(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM job_applications WHERE status != ?")
        .bind(DEFAULT_STATUS)
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, test_pool};
    use chrono::Duration;

    fn new_job(title: &str, company: &str) -> NewJobApplication {
        NewJobApplication {
            title: title.to_string(),
            company: company.to_string(),
            description: Some("Rust services".to_string()),
        }
    }

    #[tokio::test]
    async fn test_insert_defaults_to_applied() {
        let pool = test_pool().await;
        let job = insert_job(&pool, new_job("Platform Engineer", "Acme"), Utc::now())
            .await
            .unwrap();

        assert!(job.id > 0);
        assert_eq!(job.status, "Applied");
        assert!(job.created_at <= job.updated_at);
        assert_eq!(job.description.as_deref(), Some("Rust services"));
        assert!(job.category.is_none());
        assert!(job.tech_stack.is_none());
    }

    #[tokio::test]
    async fn test_insert_accepts_empty_title() {
        let pool = test_pool().await;
        let job = insert_job(&pool, new_job("", ""), Utc::now()).await.unwrap();

        let stored = find_job(&pool, job.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "");
        assert_eq!(stored.company, "");
    }

    #[tokio::test]
    async fn test_update_status_persists_verbatim() {
        let pool = test_pool().await;
        let created = Utc::now();
        let job = insert_job(&pool, new_job("SRE", "Initech"), created)
            .await
            .unwrap();

        let later = created + Duration::seconds(30);
        let updated = update_status(&pool, job.id, "Second round".to_string(), later)
            .await
            .unwrap()
            .expect("job exists");
        assert_eq!(updated.status, "Second round");

        let stored = find_job(&pool, job.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "Second round");
        assert_eq!(stored.updated_at, later);
        assert!(stored.updated_at > job.updated_at);
        assert_eq!(stored.created_at, job.created_at);
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_changes_nothing() {
        let pool = test_pool().await;
        let job = insert_job(&pool, new_job("SRE", "Initech"), Utc::now())
            .await
            .unwrap();

        let result = update_status(&pool, job.id + 100, "Offer".to_string(), Utc::now())
            .await
            .unwrap();
        assert!(result.is_none());

        let stored = find_job(&pool, job.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "Applied");
        assert_eq!(stored.updated_at, job.updated_at);
    }

    #[tokio::test]
    async fn test_update_status_never_rewinds_updated_at() {
        let pool = test_pool().await;
        let created = Utc::now();
        let job = insert_job(&pool, new_job("SRE", "Initech"), created)
            .await
            .unwrap();

        let earlier = created - Duration::minutes(5);
        let updated = update_status(&pool, job.id, "Offer".to_string(), earlier)
            .await
            .unwrap()
            .expect("job exists");
        assert_eq!(updated.status, "Offer");
        assert_eq!(updated.updated_at, created);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_status_updates_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("jobs.db").display());
        let pool = create_pool(&url).await.unwrap();
        let job = insert_job(&pool, new_job("SRE", "Initech"), Utc::now())
            .await
            .unwrap();

        let writers: Vec<_> = (0..64)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    update_status(&pool, job.id, format!("Round {i}"), Utc::now()).await
                })
            })
            .collect();

        for writer in writers {
            let updated = writer.await.unwrap().unwrap();
            assert!(updated.is_some());
        }

        let stored = find_job(&pool, job.id).await.unwrap().unwrap();
        assert!(stored.status.starts_with("Round "));
        assert!(stored.updated_at >= job.updated_at);
        pool.close().await;
    }

    #[tokio::test]
    async fn test_counts() {
        let pool = test_pool().await;
        let a = insert_job(&pool, new_job("A", "One"), Utc::now()).await.unwrap();
        insert_job(&pool, new_job("B", "Two"), Utc::now()).await.unwrap();
        let c = insert_job(&pool, new_job("C", "Three"), Utc::now()).await.unwrap();
        update_status(&pool, a.id, "Interview".to_string(), Utc::now())
            .await
            .unwrap();
        update_status(&pool, c.id, "Rejected".to_string(), Utc::now())
            .await
            .unwrap();

        assert_eq!(count_jobs(&pool).await.unwrap(), 3);
        assert_eq!(count_jobs_past_applied(&pool).await.unwrap(), 2);
        assert_eq!(list_jobs(&pool).await.unwrap().len(), 3);
    }
}
