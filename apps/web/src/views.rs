use askama::Template;
use axum::response::Html;

use crate::errors::AppError;
use crate::models::job::JobApplication;
use crate::models::template::TemplateRow;
use crate::routes::dashboard::DashboardStats;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub flash: Option<&'static str>,
    pub stats: DashboardStats,
}

#[derive(Template)]
#[template(path = "templates.html")]
pub struct TemplatesPage {
    pub flash: Option<&'static str>,
    pub cv_templates: Vec<TemplateRow>,
    pub coverletter_templates: Vec<TemplateRow>,
}

#[derive(Template)]
#[template(path = "add_job.html")]
pub struct AddJobPage {
    pub flash: Option<&'static str>,
}

#[derive(Template)]
#[template(path = "apply_job_list.html")]
pub struct ApplyJobListPage {
    pub flash: Option<&'static str>,
    pub jobs: Vec<JobApplication>,
}

/// Job detail. Matching against templates is not offered yet; the page says so.
#[derive(Template)]
#[template(path = "apply_job_detail.html")]
pub struct ApplyJobDetailPage {
    pub flash: Option<&'static str>,
    pub job: JobApplication,
}

#[derive(Template)]
#[template(path = "status.html")]
pub struct StatusPage {
    pub flash: Option<&'static str>,
    pub jobs: Vec<JobApplication>,
    pub statuses: &'static [&'static str],
}

pub fn render<T: Template>(page: T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}
