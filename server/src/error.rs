//! Error taxonomy for the export server.
//!
//! The two 400 variants carry the exact messages the landing page
//! displays; everything else surfaces as a 500 with the underlying error
//! text.

use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The caller did not provide a tricount key (empty after trimming).
    #[error("Veuillez fournir une clé Tricount")]
    MissingKey,

    /// The Tricount API answered but holds no ledger for the key.
    #[error("Impossible de récupérer les données Tricount")]
    UpstreamFetch,

    #[error("erreur réseau: {0}")]
    Http(#[from] reqwest::Error),

    #[error("erreur d'E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("erreur d'archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("erreur d'export CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("erreur d'export Excel: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status the error maps to at the service boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingKey | AppError::UpstreamFetch => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_map_to_400() {
        assert_eq!(AppError::MissingKey.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::UpstreamFetch.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn everything_else_maps_to_500() {
        let err = AppError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn localized_messages_are_stable() {
        assert_eq!(
            AppError::MissingKey.to_string(),
            "Veuillez fournir une clé Tricount"
        );
        assert_eq!(
            AppError::UpstreamFetch.to_string(),
            "Impossible de récupérer les données Tricount"
        );
    }
}
