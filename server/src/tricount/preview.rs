use common::model::preview::PreviewInfo;
use common::model::tricount::{Expense, Tricount};

/// Reduces a fetched tricount to the fields the landing page shows before
/// the user commits to a download. Nothing is written to disk.
pub fn summarize(tricount: &Tricount) -> PreviewInfo {
    let title = if tricount.title.trim().is_empty() {
        "Sans titre".to_string()
    } else {
        tricount.title.clone()
    };

    PreviewInfo {
        title,
        currency: tricount.currency_code.clone(),
        participants: tricount.users.len(),
        transactions: tricount.expenses.len(),
        total_amount: tricount.expenses.iter().map(Expense::amount_value).sum(),
    }
}
