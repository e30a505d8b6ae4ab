//! # Preview service
//!
//! `POST /preview` fetches the ledger for a key and returns the summary
//! shown on the landing page before the user commits to a download. No
//! files are written.

use actix_web::{web, HttpResponse, Responder};
use common::model::preview::PreviewInfo;
use common::requests::PreviewRequest;

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::services::tricount::{error_response, validate_key};
use crate::tricount::client::{TricountHandler, TricountSource};
use crate::tricount::preview::summarize;

/// Actix web handler for `POST /preview`.
pub async fn process(
    config: web::Data<AppConfig>,
    payload: web::Json<PreviewRequest>,
) -> impl Responder {
    let key = match validate_key(&payload.tricount_key) {
        Ok(key) => key,
        Err(err) => return error_response(&err),
    };

    let handler = TricountHandler::new(key, &config.tricount_api_url);
    match fetch_summary(&handler).await {
        Ok(info) => HttpResponse::Ok().json(info),
        Err(err) => error_response(&err),
    }
}

/// Fetches the ledger once and reduces it; an empty fetch is the same
/// upstream failure the download path reports.
async fn fetch_summary<S: TricountSource>(source: &S) -> Result<PreviewInfo> {
    let tricount = source.fetch().await?.ok_or(AppError::UpstreamFetch)?;
    Ok(summarize(&tricount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::model::tricount::{Expense, Tricount};
    use std::path::Path;

    struct StubSource(Option<Tricount>);

    #[async_trait]
    impl TricountSource for StubSource {
        async fn fetch(&self) -> Result<Option<Tricount>> {
            Ok(self.0.clone())
        }

        fn write_csv(&self, _tricount: &Tricount, _path: &Path) -> Result<()> {
            unreachable!("preview never writes files")
        }

        fn write_spreadsheet(&self, _tricount: &Tricount, _path: &Path) -> Result<()> {
            unreachable!("preview never writes files")
        }

        fn write_sesterce_csv(&self, _tricount: &Tricount, _path: &Path) -> Result<()> {
            unreachable!("preview never writes files")
        }

        async fn download_attachments(&self, _tricount: &Tricount, _dir: &Path) -> Result<()> {
            unreachable!("preview never writes files")
        }
    }

    #[actix_web::test]
    async fn summary_reflects_the_fetched_ledger() {
        let source = StubSource(Some(Tricount {
            title: "Colocation".to_string(),
            currency_code: "EUR".to_string(),
            users: Vec::new(),
            expenses: vec![Expense {
                amount: Some("10.5".to_string()),
                ..Expense::default()
            }],
        }));

        let info = fetch_summary(&source).await.unwrap();
        assert_eq!(info.title, "Colocation");
        assert_eq!(info.transactions, 1);
        assert_eq!(info.total_amount, 10.5);
    }

    #[actix_web::test]
    async fn empty_fetch_is_an_upstream_failure() {
        let err = fetch_summary(&StubSource(None)).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamFetch));
    }
}
