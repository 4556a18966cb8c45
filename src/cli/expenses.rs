use super::ui;
use crate::core::analytics::{ExpenseFilter, filter_expenses};
use crate::core::model::Expense;
use comfy_table::Cell;

fn date_cell(expense: &Expense) -> Cell {
    match expense.date {
        Some(date) => Cell::new(date.format("%Y-%m-%d")),
        // Keep whatever the sheet had so unparsed dates are still visible.
        None if !expense.raw_date.trim().is_empty() => Cell::new(expense.raw_date.trim()),
        None => Cell::new("-"),
    }
}

/// Renders the expenses matching `filter`, newest first.
///
/// `limit` caps the number of rows shown; the total always covers every
/// matching expense.
pub fn display_expenses(expenses: &[Expense], filter: &ExpenseFilter, limit: Option<usize>) -> String {
    let matching = filter_expenses(expenses, filter);
    let total: f64 = matching.iter().map(|e| e.amount).sum();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Subcategory"),
        ui::header_cell("Description"),
        ui::header_cell("Amount"),
    ]);

    let shown = limit.unwrap_or(matching.len()).min(matching.len());
    for expense in matching.iter().take(shown) {
        table.add_row(vec![
            date_cell(expense),
            Cell::new(expense.normalized_category()),
            Cell::new(&expense.subcategory),
            Cell::new(&expense.description),
            ui::money_cell(expense.amount),
        ]);
    }

    let mut output = format!("{}\n\n", ui::style_text("Expenses", ui::StyleType::Title));
    if matching.is_empty() {
        output.push_str(&ui::style_text(
            "No expenses match the given filters",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    output.push_str(&table.to_string());
    if shown < matching.len() {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Showing {} of {} expenses", shown, matching.len()),
                ui::StyleType::Subtle
            )
        ));
    }
    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text(
            &format!("Total ({} expenses):", matching.len()),
            ui::StyleType::TotalLabel
        ),
        ui::style_text(&ui::format_money(total), ui::StyleType::TotalValue)
    ));
    output
}
