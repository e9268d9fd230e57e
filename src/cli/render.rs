//! Text formatting for dashboard output

use crate::types::{Book, Loan, LoanStatus};

/// One line per search hit: `ISBN: Title (N available)`
pub fn book_line(book: &Book) -> String {
    format!(
        "{}: {} ({} available)",
        book.isbn, book.title, book.copies_available
    )
}

/// One line per loan in a member's history
pub fn loan_line(loan: &Loan) -> String {
    let status = match loan.status() {
        LoanStatus::Returned(_) => "Returned".to_string(),
        LoanStatus::Outstanding => format!("Due {}", loan.due_date),
    };
    format!("Loan {}: {} → {}", loan.loan_id, loan.isbn, status)
}

/// Render rows as a boxed grid with a `=` rule under the header
///
/// Columns whose every cell is a number are right-aligned, header included;
/// all others are left-aligned.
///
/// ```text
/// +--------+-------+
/// | LoanID | Email |
/// +========+=======+
/// |      4 | a@b.c |
/// +--------+-------+
/// ```
pub fn grid_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let numeric: Vec<bool> = (0..headers.len())
        .map(|col| {
            !rows.is_empty()
                && rows
                    .iter()
                    .all(|row| row.get(col).is_some_and(|cell| is_number(cell)))
        })
        .collect();

    let rule = |fill: char| {
        let mut line = String::from("+");
        for width in &widths {
            line.extend(std::iter::repeat(fill).take(width + 2));
            line.push('+');
        }
        line
    };
    let cells = |values: &mut dyn Iterator<Item = &str>| {
        let mut line = String::from("|");
        for ((value, width), right) in values.zip(&widths).zip(&numeric) {
            let pad = " ".repeat(width - value.chars().count());
            if *right {
                line.push_str(&format!(" {}{} |", pad, value));
            } else {
                line.push_str(&format!(" {}{} |", value, pad));
            }
        }
        line
    };

    let mut out = vec![rule('-'), cells(&mut headers.iter().copied()), rule('=')];
    for row in rows {
        out.push(cells(&mut row.iter().map(String::as_str)));
        out.push(rule('-'));
    }
    out.join("\n")
}

fn is_number(cell: &str) -> bool {
    let digits = cell.strip_prefix('-').unwrap_or(cell);
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && cell.parse::<f64>().is_ok()
}
