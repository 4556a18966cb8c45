use super::numeric::{parse_date, parse_number};
use super::tokenizer::cell;
use crate::core::model::Expense;
use tracing::debug;

/// Column positions of the ledger, resolved from its header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LedgerColumns {
    date: usize,
    category: usize,
    subcategory: usize,
    description: Option<usize>,
    amount: usize,
}

impl Default for LedgerColumns {
    fn default() -> Self {
        Self {
            date: 0,
            category: 1,
            subcategory: 2,
            description: None,
            amount: 4,
        }
    }
}

impl LedgerColumns {
    fn from_header(header: &[String]) -> Self {
        let defaults = Self::default();
        let lowered: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();
        // Earlier prefixes win over later ones, whatever the column order.
        let find = |prefixes: &[&str]| {
            prefixes
                .iter()
                .find_map(|p| lowered.iter().position(|h| h.starts_with(p)))
        };
        let position = |prefixes: &[&str], fallback: usize| find(prefixes).unwrap_or(fallback);

        Self {
            date: position(&["fecha", "date"], defaults.date),
            category: position(&["categor", "category"], defaults.category),
            subcategory: position(&["subcategor", "sub-categor"], defaults.subcategory),
            // Optional column: only read when the header names it.
            description: find(&["concepto", "descrip", "detalle"]),
            amount: position(&["monto", "importe", "amount", "total"], defaults.amount),
        }
    }
}

/// Reads the expense ledger. Row 0 is the header; rows without a category
/// and without an amount are dropped.
pub fn parse_expenses(rows: &[Vec<String>]) -> Vec<Expense> {
    let Some(header) = rows.first() else {
        return Vec::new();
    };
    let columns = LedgerColumns::from_header(header);
    debug!(?columns, "Resolved ledger columns");

    let expenses: Vec<Expense> = (1..rows.len())
        .filter_map(|row| {
            let category = cell(rows, row, columns.category);
            let amount = parse_number(cell(rows, row, columns.amount));
            if category.is_empty() && amount == 0.0 {
                return None;
            }
            let raw_date = cell(rows, row, columns.date);
            Some(Expense {
                raw_date: raw_date.to_string(),
                date: parse_date(raw_date),
                category: category.to_string(),
                subcategory: cell(rows, row, columns.subcategory).to_string(),
                description: columns
                    .description
                    .map(|col| cell(rows, row, col).to_string())
                    .unwrap_or_default(),
                amount,
            })
        })
        .collect();

    debug!("Parsed {} expenses", expenses.len());
    expenses
}
