use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
};
use axum_extra::extract::SignedCookieJar;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::flash::{self, Flash};
use crate::models::template::TemplateKind;
use crate::state::AppState;
use crate::uploads::records::list_templates;
use crate::uploads::storage::{save_template, TemplateUpload};
use crate::views::{render, TemplatesPage};

/// The `file` part of an upload form.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub contents: Bytes,
}

/// Checks the submitted parts, in the order the user would fix them:
/// file present, file chosen, file non-empty, then the template type.
pub fn validate_upload(
    file: Option<FilePart>,
    template_type: Option<&str>,
) -> Result<TemplateUpload, Flash> {
    let file = file.ok_or(Flash::NoFilePart)?;
    let original_name = file
        .file_name
        .filter(|name| !name.is_empty())
        .ok_or(Flash::NoSelectedFile)?;
    if file.contents.is_empty() {
        return Err(Flash::EmptyFile);
    }
    let kind = template_type
        .unwrap_or_default()
        .parse::<TemplateKind>()
        .map_err(|_| Flash::InvalidTemplateType)?;

    Ok(TemplateUpload {
        original_name,
        kind,
        contents: file.contents,
    })
}

/// GET /templates
pub async fn handle_templates_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let cv_templates = list_templates(&state.db, TemplateKind::Cv).await?;
    let coverletter_templates = list_templates(&state.db, TemplateKind::CoverLetter).await?;
    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        render(TemplatesPage {
            flash,
            cv_templates,
            coverletter_templates,
        })?,
    ))
}

/// POST /templates
///
/// Multipart fields: `file` and `template_type`. Every rejection redirects back to the
/// templates page with a message and leaves no file or row behind.
pub async fn handle_template_upload(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut multipart: Multipart,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let mut file = None;
    let mut template_type = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_owned);
                let contents = field.bytes().await?;
                file = Some(FilePart {
                    file_name,
                    contents,
                });
            }
            Some("template_type") => template_type = Some(field.text().await?),
            _ => {}
        }
    }

    let redirect = Redirect::to("/templates");
    let upload = match validate_upload(file, template_type.as_deref()) {
        Ok(upload) => upload,
        Err(rejection) => {
            info!("Rejected template upload: {}", rejection.message());
            return Ok((flash::push(jar, rejection), redirect));
        }
    };

    save_template(&state.db, &state.config.upload_dir, upload).await?;
    Ok((flash::push(jar, Flash::TemplateUploaded), redirect))
}
