use std::fs;
use std::path::Path;

use common::model::tricount::{Attachment, Tricount};
use log::info;
use reqwest::Client;

use crate::error::Result;
use crate::tricount::export::safe_component;

/// Downloads every expense attachment into `dir`.
///
/// The directory is only created when at least one attachment exists, so
/// callers can use its absence to skip the artifact entirely.
pub async fn download_all(http: &Client, tricount: &Tricount, dir: &Path) -> Result<()> {
    let attachments: Vec<&Attachment> = tricount
        .expenses
        .iter()
        .flat_map(|expense| expense.attachments.iter())
        .collect();

    if attachments.is_empty() {
        return Ok(());
    }

    fs::create_dir_all(dir)?;

    for (index, attachment) in attachments.iter().enumerate() {
        let bytes = http
            .get(&attachment.url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        fs::write(dir.join(file_name_for(attachment, index)), &bytes)?;
    }

    info!(
        "downloaded {} attachment(s) into {}",
        attachments.len(),
        dir.display()
    );
    Ok(())
}

/// File name for one attachment: its declared name, else the URL
/// basename, always prefixed with the running index so duplicates never
/// overwrite each other.
fn file_name_for(attachment: &Attachment, index: usize) -> String {
    let base = attachment
        .file_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .or_else(|| url_basename(&attachment.url))
        .unwrap_or_else(|| "attachment".to_string());

    format!("{:03}_{}", index + 1, safe_component(&base))
}

fn url_basename(url: &str) -> Option<String> {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(url: &str, file_name: Option<&str>) -> Attachment {
        Attachment {
            url: url.to_string(),
            file_name: file_name.map(str::to_string),
        }
    }

    #[test]
    fn declared_name_wins_over_the_url() {
        let att = attachment("https://cdn.example/raw/xyz?sig=1", Some("recu.jpg"));
        assert_eq!(file_name_for(&att, 0), "001_recu.jpg");
    }

    #[test]
    fn url_basename_ignores_query_and_fragment() {
        assert_eq!(
            url_basename("https://cdn.example/a/b/photo.png?token=t#top"),
            Some("photo.png".to_string())
        );
        assert_eq!(url_basename("https://cdn.example/"), None);
    }

    #[test]
    fn nameless_attachments_fall_back_to_an_index() {
        let att = attachment("https://cdn.example/", None);
        assert_eq!(file_name_for(&att, 4), "005_attachment");
    }

    #[actix_web::test]
    async fn no_attachments_means_no_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Attachments_Test");
        let http = Client::new();

        download_all(&http, &Tricount::default(), &target)
            .await
            .unwrap();

        assert!(!target.exists());
    }
}
