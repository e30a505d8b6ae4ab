//! Alternate CSV dialect for importing into Sesterce: one share column
//! per participant, each expense split evenly over its impacted members.

use std::path::Path;

use common::model::tricount::{Expense, Tricount};

use crate::error::Result;

pub fn write_shares(tricount: &Tricount, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let participants: Vec<&str> = tricount
        .users
        .iter()
        .map(|user| user.name.as_str())
        .collect();

    let mut header = vec!["Date", "Title", "Paid by", "Currency"];
    header.extend(&participants);
    writer.write_record(&header)?;

    for expense in &tricount.expenses {
        let mut record = vec![
            expense.date.clone().unwrap_or_default(),
            expense.description.clone(),
            expense.paid_by.clone().unwrap_or_default(),
            tricount.currency_code.clone(),
        ];
        record.extend(split_shares(expense, &participants));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Share of the expense per participant, two decimals, empty when the
/// participant is not impacted. An empty impacted list splits over the
/// whole group.
fn split_shares(expense: &Expense, participants: &[&str]) -> Vec<String> {
    let impacted: Vec<&str> = if expense.impacted.is_empty() {
        participants.to_vec()
    } else {
        expense.impacted.iter().map(String::as_str).collect()
    };

    if impacted.is_empty() {
        return vec![String::new(); participants.len()];
    }
    let share = expense.amount_value() / impacted.len() as f64;

    participants
        .iter()
        .map(|name| {
            if impacted.contains(name) {
                format!("{share:.2}")
            } else {
                String::new()
            }
        })
        .collect()
}
