//! One-shot messages shown on the page rendered after a form submission.
//!
//! The message travels as a short key in a signed cookie; the next page render takes it
//! and clears the cookie.

use axum_extra::extract::cookie::{Cookie, Key, SignedCookieJar};
use tracing::warn;

pub const FLASH_COOKIE: &str = "jobflow_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    NoFilePart,
    NoSelectedFile,
    EmptyFile,
    InvalidTemplateType,
    TemplateUploaded,
    JobAdded,
    StatusUpdated,
}

impl Flash {
    const ALL: [Flash; 7] = [
        Flash::NoFilePart,
        Flash::NoSelectedFile,
        Flash::EmptyFile,
        Flash::InvalidTemplateType,
        Flash::TemplateUploaded,
        Flash::JobAdded,
        Flash::StatusUpdated,
    ];

    fn key(self) -> &'static str {
        match self {
            Flash::NoFilePart => "no_file_part",
            Flash::NoSelectedFile => "no_selected_file",
            Flash::EmptyFile => "empty_file",
            Flash::InvalidTemplateType => "invalid_template_type",
            Flash::TemplateUploaded => "template_uploaded",
            Flash::JobAdded => "job_added",
            Flash::StatusUpdated => "status_updated",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flash| flash.key() == key)
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::NoFilePart => "No file part",
            Flash::NoSelectedFile => "No selected file",
            Flash::EmptyFile => "The selected file is empty",
            Flash::InvalidTemplateType => "Template type must be CV or CoverLetter",
            Flash::TemplateUploaded => "Template uploaded successfully",
            Flash::JobAdded => "Job added successfully",
            Flash::StatusUpdated => "Job status updated",
        }
    }
}

/// Queues `flash` for the next page render.
pub fn push(jar: SignedCookieJar, flash: Flash) -> SignedCookieJar {
    jar.add(
        Cookie::build((FLASH_COOKIE, flash.key()))
            .path("/")
            .http_only(true),
    )
}

/// Takes the pending message, if any, and clears it.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Option<&'static str>) {
    let pending = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| Flash::from_key(cookie.value()));
    match pending {
        Some(flash) => (
            jar.remove(Cookie::build(FLASH_COOKIE).path("/")),
            Some(flash.message()),
        ),
        None => (jar, None),
    }
}

/// Shortest master secret the key derivation accepts.
const MIN_MASTER_LEN: usize = 32;

/// Signing key for the flash cookie, derived from `secret`.
///
/// Secrets shorter than 32 bytes are repeated up to that length first, so every
/// configured secret keys the signer; short ones are still weak and get a warning. Only an
/// empty secret falls back to a random per-process key.
pub fn cookie_key(secret: &str) -> Key {
    if secret.is_empty() {
        warn!("SECRET_KEY is empty; using a generated cookie key");
        return Key::generate();
    }
    if secret.len() < MIN_MASTER_LEN {
        warn!("SECRET_KEY is shorter than {MIN_MASTER_LEN} bytes; set a longer secret");
    }

    let master: Vec<u8> = secret
        .bytes()
        .cycle()
        .take(secret.len().max(MIN_MASTER_LEN))
        .collect();
    Key::derive_from(&master)
}
