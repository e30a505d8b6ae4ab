//! Client for the public Tricount API.
//!
//! The API is the one the mobile apps talk to: an anonymous "app
//! installation" is registered first, and the returned session token
//! authenticates the registry fetch. A tricount share key maps to a
//! registry through its `public_identifier_token`.
//!
//! Wire structs stay private to this module; everything leaving it is the
//! model from `common`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use common::model::tricount::{Attachment, Expense, Participant, Tricount};
use log::{info, warn};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::tricount::export;

/// Operations the export workflow needs from the outside world. The
/// orchestrator and the preview path are generic over this trait so the
/// network and filesystem sides can be stubbed in tests.
#[async_trait]
pub trait TricountSource: Send + Sync {
    /// Fetches the ledger once. `Ok(None)` means the API answered but has
    /// no data for the key.
    async fn fetch(&self) -> Result<Option<Tricount>>;

    fn write_csv(&self, tricount: &Tricount, path: &Path) -> Result<()>;

    fn write_spreadsheet(&self, tricount: &Tricount, path: &Path) -> Result<()>;

    fn write_sesterce_csv(&self, tricount: &Tricount, path: &Path) -> Result<()>;

    async fn download_attachments(&self, tricount: &Tricount, dir: &Path) -> Result<()>;
}

/// Concrete [`TricountSource`] backed by the Tricount API and the writers
/// in [`crate::tricount::export`].
pub struct TricountHandler {
    key: String,
    base_url: String,
    http: Client,
}

impl TricountHandler {
    pub fn new(key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");

        Self {
            key: key.into(),
            base_url: base_url.into(),
            http,
        }
    }

    /// Registers an anonymous app installation and returns its session
    /// token.
    async fn register_installation(&self) -> Result<String> {
        let url = format!("{}/v1/session-registry-installation", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("X-Bunq-Client-Request-Id", Uuid::new_v4().to_string())
            .json(&serde_json::json!({
                "app_installation_uuid": Uuid::new_v4().to_string(),
                "device_description": "Tricount Export",
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: InstallationResponse = response.json().await?;
        body.into_token().ok_or(AppError::UpstreamFetch)
    }

    /// Fetches the registry for the share key. A 404 or an empty response
    /// body means the key does not resolve to a tricount.
    async fn fetch_registry(&self, token: &str) -> Result<Option<RegistryWire>> {
        let url = format!("{}/v1/registry", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("public_identifier_token", self.key.as_str())])
            .header("X-Bunq-Client-Authentication", token)
            .header("X-Bunq-Client-Request-Id", Uuid::new_v4().to_string())
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: RegistryEnvelope = response.error_for_status()?.json().await?;
        Ok(body.into_registry())
    }
}

#[async_trait]
impl TricountSource for TricountHandler {
    async fn fetch(&self) -> Result<Option<Tricount>> {
        let token = self.register_installation().await?;
        let Some(wire) = self.fetch_registry(&token).await? else {
            warn!("no registry found for key {}", self.key);
            return Ok(None);
        };

        let tricount = wire.into_tricount();
        info!(
            "fetched tricount '{}' ({} participants, {} expenses)",
            tricount.title,
            tricount.users.len(),
            tricount.expenses.len()
        );
        Ok(Some(tricount))
    }

    fn write_csv(&self, tricount: &Tricount, path: &Path) -> Result<()> {
        export::csv::write_transactions(tricount, path)
    }

    fn write_spreadsheet(&self, tricount: &Tricount, path: &Path) -> Result<()> {
        export::spreadsheet::write_transactions(tricount, path)
    }

    fn write_sesterce_csv(&self, tricount: &Tricount, path: &Path) -> Result<()> {
        export::sesterce::write_shares(tricount, path)
    }

    async fn download_attachments(&self, tricount: &Tricount, dir: &Path) -> Result<()> {
        export::attachments::download_all(&self.http, tricount, dir).await
    }
}

/// Wire shape of the installation call. The session token sits somewhere
/// in the `Response` array.
#[derive(Deserialize)]
struct InstallationResponse {
    #[serde(rename = "Response", default)]
    response: Vec<InstallationItem>,
}

#[derive(Deserialize)]
struct InstallationItem {
    #[serde(rename = "Token")]
    token: Option<TokenWire>,
}

#[derive(Deserialize)]
struct TokenWire {
    token: String,
}

impl InstallationResponse {
    fn into_token(self) -> Option<String> {
        self.response
            .into_iter()
            .find_map(|item| item.token)
            .map(|wire| wire.token)
    }
}

#[derive(Deserialize)]
struct RegistryEnvelope {
    #[serde(rename = "Response", default)]
    response: Vec<RegistryItem>,
}

#[derive(Deserialize)]
struct RegistryItem {
    #[serde(rename = "Registry")]
    registry: Option<RegistryWire>,
}

impl RegistryEnvelope {
    fn into_registry(self) -> Option<RegistryWire> {
        self.response.into_iter().find_map(|item| item.registry)
    }
}

#[derive(Deserialize)]
struct RegistryWire {
    #[serde(default)]
    title: String,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    memberships: Vec<MembershipItem>,
    #[serde(default)]
    all_registry_entry: Vec<EntryItem>,
}

#[derive(Deserialize)]
struct MembershipItem {
    #[serde(rename = "RegistryMembershipNonUser")]
    membership: Option<MembershipWire>,
}

#[derive(Deserialize)]
struct MembershipWire {
    #[serde(default)]
    id: i64,
    alias: Option<AliasWire>,
}

#[derive(Deserialize)]
struct AliasWire {
    #[serde(default)]
    display_name: String,
}

#[derive(Deserialize)]
struct EntryItem {
    #[serde(rename = "RegistryEntry")]
    entry: Option<EntryWire>,
}

#[derive(Deserialize)]
struct EntryWire {
    #[serde(default)]
    description: String,
    amount: Option<AmountWire>,
    created: Option<String>,
    membership_owned: Option<MembershipItem>,
    #[serde(default)]
    allocations: Vec<AllocationWire>,
    #[serde(default)]
    attachment: Vec<AttachmentWire>,
}

#[derive(Deserialize)]
struct AmountWire {
    #[serde(default)]
    value: String,
}

#[derive(Deserialize)]
struct AllocationWire {
    membership: Option<MembershipItem>,
}

#[derive(Deserialize)]
struct AttachmentWire {
    description: Option<String>,
    #[serde(default)]
    urls: Vec<UrlWire>,
}

#[derive(Deserialize)]
struct UrlWire {
    url: String,
}

impl MembershipItem {
    fn display_name(self) -> Option<String> {
        self.membership
            .and_then(|wire| wire.alias)
            .map(|alias| alias.display_name)
    }
}

impl RegistryWire {
    fn into_tricount(self) -> Tricount {
        let users: Vec<Participant> = self
            .memberships
            .into_iter()
            .filter_map(|item| item.membership)
            .map(|wire| Participant {
                id: wire.id,
                name: wire
                    .alias
                    .map(|alias| alias.display_name)
                    .unwrap_or_default(),
            })
            .collect();

        let expenses: Vec<Expense> = self
            .all_registry_entry
            .into_iter()
            .filter_map(|item| item.entry)
            .map(|entry| Expense {
                description: entry.description,
                amount: entry.amount.map(|amount| amount.value),
                paid_by: entry.membership_owned.and_then(MembershipItem::display_name),
                date: entry.created,
                impacted: entry
                    .allocations
                    .into_iter()
                    .filter_map(|allocation| allocation.membership)
                    .filter_map(MembershipItem::display_name)
                    .collect(),
                attachments: entry
                    .attachment
                    .into_iter()
                    .filter_map(|wire| {
                        let file_name = wire.description;
                        wire.urls.into_iter().next().map(|link| Attachment {
                            url: link.url,
                            file_name,
                        })
                    })
                    .collect(),
            })
            .collect();

        Tricount {
            title: self.title,
            currency_code: self.currency.unwrap_or_else(|| "EUR".to_string()),
            users,
            expenses,
        }
    }
}
