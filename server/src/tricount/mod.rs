//! Tricount domain logic: the API client, the export pipeline and the
//! preview summarizer. Everything HTTP-facing lives in `crate::services`.

pub mod client;
pub mod export;
pub mod preview;
