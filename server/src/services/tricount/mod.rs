//! # Tricount service module
//!
//! Registers the two JSON endpoints of the exporter:
//! - `POST /download`: runs the export workflow and streams back a zip.
//! - `POST /preview`: summarizes the ledger without writing any file.
//!
//! Handlers only validate and translate; the workflow itself lives in
//! `crate::tricount`.

mod download;
mod preview;

use actix_web::web::{post, scope};
use actix_web::{HttpResponse, Scope};

use crate::error::{AppError, Result};

/// Configures the Actix scope for the exporter endpoints. Both routes sit
/// at the root so the embedded landing page can call them directly.
pub fn configure_routes() -> Scope {
    scope("")
        .route("/download", post().to(download::process))
        .route("/preview", post().to(preview::process))
}

/// Checks the caller-supplied key. Whitespace-only keys count as missing.
pub(crate) fn validate_key(raw: &str) -> Result<String> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(AppError::MissingKey);
    }
    Ok(key.to_string())
}

/// Maps an [`AppError`] onto the JSON error shape the landing page
/// expects.
pub(crate) fn error_response(err: &AppError) -> HttpResponse {
    HttpResponse::build(err.status_code()).json(serde_json::json!({ "error": err.to_string() }))
}
