use axum::{extract::State, response::Html};
use axum_extra::extract::SignedCookieJar;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::flash;
use crate::jobs::store::{count_jobs, count_jobs_past_applied};
use crate::models::template::TemplateKind;
use crate::state::AppState;
use crate::uploads::records::count_templates;
use crate::views::{render, DashboardPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_jobs: i64,
    /// Jobs whose status is anything other than "Applied".
    pub applied_jobs: i64,
    pub cv_templates: i64,
    pub coverletter_templates: i64,
}

impl DashboardStats {
    pub async fn load(pool: &SqlitePool) -> Result<Self, sqlx::Error> {
        Ok(DashboardStats {
            total_jobs: count_jobs(pool).await?,
            applied_jobs: count_jobs_past_applied(pool).await?,
            cv_templates: count_templates(pool, TemplateKind::Cv).await?,
            coverletter_templates: count_templates(pool, TemplateKind::CoverLetter).await?,
        })
    }
}

/// GET /
pub async fn handle_dashboard(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let stats = DashboardStats::load(&state.db).await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, render(DashboardPage { flash, stats })?))
}
