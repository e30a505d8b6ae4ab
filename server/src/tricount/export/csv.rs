use std::path::Path;

use common::model::tricount::Tricount;

use crate::error::Result;

/// Column set shared by the CSV and spreadsheet transaction tables.
pub(crate) const TRANSACTION_HEADER: [&str; 6] = [
    "Date",
    "Description",
    "Paid by",
    "Amount",
    "Currency",
    "Impacted members",
];

/// Writes the transaction table for `tricount` to `path`.
pub fn write_transactions(tricount: &Tricount, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(TRANSACTION_HEADER)?;

    for expense in &tricount.expenses {
        writer.write_record([
            expense.date.as_deref().unwrap_or(""),
            expense.description.as_str(),
            expense.paid_by.as_deref().unwrap_or(""),
            expense.amount.as_deref().unwrap_or("0"),
            tricount.currency_code.as_str(),
            expense.impacted.join(", ").as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::tricount::Expense;

    #[test]
    fn writes_header_and_one_row_per_expense() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Transactions_Test.csv");

        let tricount = Tricount {
            title: "Test".to_string(),
            currency_code: "EUR".to_string(),
            users: Vec::new(),
            expenses: vec![
                Expense {
                    description: "Essence".to_string(),
                    amount: Some("42.50".to_string()),
                    paid_by: Some("Alice".to_string()),
                    date: Some("2024-07-01".to_string()),
                    impacted: vec!["Alice".to_string(), "Bob".to_string()],
                    ..Expense::default()
                },
                Expense::default(),
            ],
        };

        write_transactions(&tricount, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Date,Description,Paid by,Amount,Currency,Impacted members"
        );
        assert_eq!(lines[1], "2024-07-01,Essence,Alice,42.50,EUR,\"Alice, Bob\"");
        assert_eq!(lines[2], ",,,0,EUR,");
    }

    #[test]
    fn empty_ledger_still_produces_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_transactions(&Tricount::default(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
