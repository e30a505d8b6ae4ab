//! Export orchestration: fan a fetched tricount out into the selected
//! artifact files under a per-request directory.

pub mod attachments;
pub mod csv;
pub mod sesterce;
pub mod spreadsheet;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{AppError, Result};
use crate::tricount::client::TricountSource;

/// Which exports the caller asked for. Flags are independent; any subset
/// (including none) is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub spreadsheet: bool,
    pub sesterce: bool,
    pub attachments: bool,
}

/// A filesystem path produced by one export operation, destined for the
/// archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    File(PathBuf),
    Directory(PathBuf),
}

impl Artifact {
    pub fn path(&self) -> &Path {
        match self {
            Artifact::File(path) | Artifact::Directory(path) => path,
        }
    }
}

/// Result of a completed export run.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Sanitized ledger title, reused for the archive filename.
    pub title: String,
    /// Artifacts in archive order: csv, spreadsheet, sesterce,
    /// attachments.
    pub artifacts: Vec<Artifact>,
}

/// Runs the export workflow: fetch once, then write each enabled export
/// into `out_dir`. An artifact joins the outcome only if its path exists
/// after the corresponding call, so a writer that declines to produce
/// anything (an attachment-less ledger) is skipped silently.
///
/// `out_dir` is created here and intentionally left behind once the
/// response is gone; its lifecycle belongs to the deployment.
pub async fn run_export<S>(source: &S, out_dir: &Path, options: ExportOptions) -> Result<ExportOutcome>
where
    S: TricountSource + ?Sized,
{
    fs::create_dir_all(out_dir)?;

    let tricount = source.fetch().await?.ok_or(AppError::UpstreamFetch)?;
    let title = safe_component(&tricount.title);
    let mut artifacts = Vec::new();

    if options.csv {
        let path = out_dir.join(format!("Transactions_{title}.csv"));
        source.write_csv(&tricount, &path)?;
        push_existing(&mut artifacts, Artifact::File(path));
    }

    if options.spreadsheet {
        let path = out_dir.join(format!("Transactions_{title}.xlsx"));
        source.write_spreadsheet(&tricount, &path)?;
        push_existing(&mut artifacts, Artifact::File(path));
    }

    if options.sesterce {
        let path = out_dir.join(format!("Sesterce_{title}.csv"));
        source.write_sesterce_csv(&tricount, &path)?;
        push_existing(&mut artifacts, Artifact::File(path));
    }

    if options.attachments {
        let dir = out_dir.join(format!("Attachments_{title}"));
        source.download_attachments(&tricount, &dir).await?;
        push_existing(&mut artifacts, Artifact::Directory(dir));
    }

    info!("export of '{}' produced {} artifact(s)", title, artifacts.len());
    Ok(ExportOutcome { title, artifacts })
}

fn push_existing(artifacts: &mut Vec<Artifact>, artifact: Artifact) {
    if artifact.path().exists() {
        artifacts.push(artifact);
    }
}

/// Reduces a remote-controlled title to a single path component usable in
/// file names and the Content-Disposition header.
pub fn safe_component(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        "Tricount".to_string()
    } else {
        cleaned
    }
}
