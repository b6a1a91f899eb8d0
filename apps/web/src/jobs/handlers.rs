use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use axum_extra::extract::SignedCookieJar;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::flash::{self, Flash};
use crate::jobs::store::{find_job, insert_job, list_jobs, update_status};
use crate::models::job::{NewJobApplication, KNOWN_STATUSES};
use crate::state::AppState;
use crate::views::{render, AddJobPage, ApplyJobDetailPage, ApplyJobListPage, StatusPage};

/// Fields of the add-job form. Missing text fields arrive as empty strings.
#[derive(Debug, Deserialize)]
pub struct AddJobForm {
    /// Collected by the form but not stored.
    #[serde(default)]
    #[allow(dead_code)]
    pub job_url: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateForm {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub status: String,
}

/// GET /add-job
pub async fn handle_add_job_form(
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let (jar, flash) = flash::take(jar);
    Ok((jar, render(AddJobPage { flash })?))
}

/// POST /add-job
///
/// Stores whatever was submitted; empty title or company are kept as empty strings.
pub async fn handle_add_job(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<AddJobForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    insert_job(
        &state.db,
        NewJobApplication {
            title: form.job_title,
            company: form.company,
            description: form.description,
        },
        Utc::now(),
    )
    .await?;

    Ok((flash::push(jar, Flash::JobAdded), Redirect::to("/add-job")))
}

/// GET /apply-job
pub async fn handle_apply_job_list(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let jobs = list_jobs(&state.db).await?;
    let (jar, flash) = flash::take(jar);
    Ok((jar, render(ApplyJobListPage { flash, jobs })?))
}

/// GET /apply-job/:job_id
pub async fn handle_apply_job_detail(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let not_found = || AppError::NotFound(format!("Job {job_id} not found"));

    let id = job_id.parse::<i64>().map_err(|_| not_found())?;
    let job = find_job(&state.db, id).await?.ok_or_else(not_found)?;

    let (jar, flash) = flash::take(jar);
    Ok((jar, render(ApplyJobDetailPage { flash, job })?))
}

/// GET /status
pub async fn handle_status_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let jobs = list_jobs(&state.db).await?;
    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        render(StatusPage {
            flash,
            jobs,
            statuses: KNOWN_STATUSES,
        })?,
    ))
}

/// POST /status
///
/// The status text is stored verbatim. An unknown or malformed job id is ignored and
/// the user is sent back to the status page without a message.
pub async fn handle_status_update(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<StatusUpdateForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let redirect = Redirect::to("/status");

    let Ok(id) = form.job_id.trim().parse::<i64>() else {
        info!("Ignoring status update for malformed job id '{}'", form.job_id);
        return Ok((jar, redirect));
    };

    match update_status(&state.db, id, form.status, Utc::now()).await? {
        Some(_) => Ok((flash::push(jar, Flash::StatusUpdated), redirect)),
        None => {
            info!("Ignoring status update for unknown job {id}");
            Ok((jar, redirect))
        }
    }
}
