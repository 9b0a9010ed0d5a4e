use crate::models::{Loan, LoanStatus};

pub const EMPTY_TABLE: &str = "No loans available.";

const RESET: &str = "\x1b[0m";

fn badge_color(status: LoanStatus) -> &'static str {
    match status {
        LoanStatus::Approved => "\x1b[1;32m",
        LoanStatus::Rejected => "\x1b[1;31m",
        LoanStatus::Pending => "\x1b[1;33m",
    }
}

pub fn format_amount(amount: f64) -> String {
    format!("${}", amount)
}

/// Renders loans as a numbered text table. Row numbers start at 1 and are
/// what the dashboard prompt refers to.
pub fn loan_table(loans: &[Loan], color: bool) -> String {
    const HEADERS: [&str; 4] = ["#", "BORROWER", "AMOUNT", "STATUS"];

    if loans.is_empty() {
        return format!("{}\n", EMPTY_TABLE);
    }

    let rows: Vec<[String; 4]> = loans
        .iter()
        .enumerate()
        .map(|(i, loan)| {
            [
                (i + 1).to_string(),
                loan.borrower.clone(),
                format_amount(loan.amount),
                loan.status.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{:<w$}", h, w = w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for (row, loan) in rows.iter().zip(loans) {
        let mut cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = w))
            .collect();
        if color {
            cells[3] = format!("{}{}{}", badge_color(loan.status), loan.status, RESET);
        }
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }

    out
}
