use serde::{Deserialize, Serialize};

/// In-memory snapshot of a fetched tricount: ledger metadata plus its
/// participants and expenses. Produced by the API client, read by the
/// exporters and the preview summarizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tricount {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default)]
    pub users: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

fn default_currency() -> String {
    "EUR".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: i64,
    pub name: String,
}

/// A single ledger entry. `amount` stays a string as received from the
/// API; consumers that need a number go through [`Expense::amount_value`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub paid_by: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Display names of the participants the expense is split over.
    /// Empty means the whole group.
    #[serde(default)]
    pub impacted: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl Expense {
    /// Numeric value of the amount. Missing or unparsable amounts count
    /// as zero.
    pub fn amount_value(&self) -> f64 {
        self.amount
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense_with_amount(amount: Option<&str>) -> Expense {
        Expense {
            amount: amount.map(str::to_string),
            ..Expense::default()
        }
    }

    #[test]
    fn amount_value_parses_signed_decimals() {
        assert_eq!(expense_with_amount(Some("10.5")).amount_value(), 10.5);
        assert_eq!(expense_with_amount(Some("-2")).amount_value(), -2.0);
        assert_eq!(expense_with_amount(Some(" 3.25 ")).amount_value(), 3.25);
    }

    #[test]
    fn amount_value_treats_garbage_as_zero() {
        assert_eq!(expense_with_amount(None).amount_value(), 0.0);
        assert_eq!(expense_with_amount(Some("")).amount_value(), 0.0);
        assert_eq!(expense_with_amount(Some("douze")).amount_value(), 0.0);
    }

    #[test]
    fn currency_defaults_to_eur_when_missing() {
        let tricount: Tricount = serde_json::from_str(r#"{"title": "Colocation"}"#).unwrap();
        assert_eq!(tricount.currency_code, "EUR");
        assert!(tricount.users.is_empty());
        assert!(tricount.expenses.is_empty());
    }
}
