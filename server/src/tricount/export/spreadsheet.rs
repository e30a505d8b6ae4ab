use std::path::Path;

use common::model::tricount::Tricount;
use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;

use super::csv::TRANSACTION_HEADER;

/// Writes the transaction table as a single-sheet workbook. Amounts are
/// written as numbers so spreadsheet formulas work on them directly.
pub fn write_transactions(tricount: &Tricount, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Transactions")?;

    for (col, header) in TRANSACTION_HEADER.iter().enumerate() {
        sheet.write_with_format(0, col as u16, *header, &bold)?;
    }

    for (index, expense) in tricount.expenses.iter().enumerate() {
        let row = (index + 1) as u32;
        sheet.write(row, 0, expense.date.as_deref().unwrap_or(""))?;
        sheet.write(row, 1, expense.description.as_str())?;
        sheet.write(row, 2, expense.paid_by.as_deref().unwrap_or(""))?;
        sheet.write(row, 3, expense.amount_value())?;
        sheet.write(row, 4, tricount.currency_code.as_str())?;
        sheet.write(row, 5, expense.impacted.join(", "))?;
    }

    sheet.autofit();
    workbook.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::tricount::Expense;
    use std::fs::File;

    #[test]
    fn produces_a_readable_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Transactions_Test.xlsx");

        let tricount = Tricount {
            title: "Test".to_string(),
            currency_code: "EUR".to_string(),
            users: Vec::new(),
            expenses: vec![Expense {
                description: "Essence".to_string(),
                amount: Some("42.50".to_string()),
                ..Expense::default()
            }],
        };

        write_transactions(&tricount, &path).unwrap();

        // An xlsx file is itself a zip container; check the sheet exists.
        let mut archive = zip::ZipArchive::new(File::open(&path).unwrap()).unwrap();
        assert!(archive.by_name("xl/worksheets/sheet1.xml").is_ok());
    }
}
