//! # Download service
//!
//! `POST /download` turns a tricount key and a set of export flags into a
//! single zip archive.
//!
//! ## Workflow
//!
//! 1.  **HTTP request**: `process` receives a `DownloadRequest` with the
//!     tricount key and the four export flags.
//! 2.  **Validation**: the key is trimmed; a blank key fails fast with the
//!     missing-key message and the remote API is never contacted.
//! 3.  **Per-request directory**: each request exports into
//!     `<download-root>/tricount_<timestamp>_<id>` so concurrent requests
//!     never share a directory.
//! 4.  **Export**: `run_export` fetches the ledger once and writes the
//!     enabled exports in a fixed order (csv, spreadsheet, sesterce,
//!     attachments), collecting the produced paths.
//! 5.  **Archive**: the artifact list is folded into an in-memory zip on a
//!     blocking thread and streamed back as
//!     `Tricount_<title>_<timestamp>.zip`. The per-request directory is
//!     left in place for the deployment to reap.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use common::requests::DownloadRequest;
use log::info;
use uuid::Uuid;

use crate::archive::build_archive;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::services::tricount::{error_response, validate_key};
use crate::tricount::client::TricountHandler;
use crate::tricount::export::{run_export, ExportOptions, ExportOutcome};

/// Actix web handler for `POST /download`.
pub async fn process(
    config: web::Data<AppConfig>,
    payload: web::Json<DownloadRequest>,
) -> impl Responder {
    let request = payload.into_inner();
    let key = match validate_key(&request.tricount_key) {
        Ok(key) => key,
        Err(err) => return error_response(&err),
    };

    info!(
        "download request for key {} (csv={}, excel={}, sesterce={}, attachments={})",
        key, request.export_csv, request.export_excel, request.export_sesterce,
        request.download_attachments
    );

    let handler = TricountHandler::new(key, &config.tricount_api_url);
    let options = ExportOptions {
        csv: request.export_csv,
        spreadsheet: request.export_excel,
        sesterce: request.export_sesterce,
        attachments: request.download_attachments,
    };

    match run_download(&handler, &config, options).await {
        Ok((filename, archive)) => HttpResponse::Ok()
            .content_type("application/zip")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename)],
            })
            .body(archive),
        Err(err) => error_response(&err),
    }
}

/// Runs the export and archives the result, returning the download
/// filename and the zip bytes.
async fn run_download(
    source: &TricountHandler,
    config: &AppConfig,
    options: ExportOptions,
) -> Result<(String, Vec<u8>)> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let request_id = Uuid::new_v4().simple().to_string();
    let out_dir = config
        .download_root
        .join(format!("tricount_{}_{}", timestamp, &request_id[..8]));

    let ExportOutcome { title, artifacts } = run_export(source, &out_dir, options).await?;

    info!("archiving {} artifact(s) for '{}'", artifacts.len(), title);
    let archive = tokio::task::spawn_blocking(move || build_archive(&artifacts))
        .await
        .map_err(|err| AppError::Internal(format!("archive task failed: {err}")))??;

    Ok((format!("Tricount_{title}_{timestamp}.zip"), archive))
}
