use serde::{Deserialize, Serialize};

/// Reduced view of a tricount for the `/preview` endpoint. Derived on
/// demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewInfo {
    pub title: String,
    pub currency: String,
    pub participants: usize,
    pub transactions: usize,
    pub total_amount: f64,
}
