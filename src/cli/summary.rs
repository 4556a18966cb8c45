use super::ui;
use crate::core::analytics::{self, DashboardSummary};
use crate::core::model::ProjectSnapshot;
use comfy_table::Cell;

impl DashboardSummary {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);

        table.add_row(vec![
            Cell::new("Total budget"),
            ui::format_optional_cell(self.total_budget, ui::format_money),
        ]);
        table.add_row(vec![Cell::new("Spent"), ui::money_cell(self.total_spent)]);
        table.add_row(vec![
            Cell::new("Remaining"),
            ui::format_optional_cell(self.remaining, ui::format_money),
        ]);
        table.add_row(vec![Cell::new("Progress"), ui::progress_cell(self.progress)]);
        table.add_row(vec![
            Cell::new("Expenses recorded"),
            Cell::new(self.expense_count),
        ]);
        table.add_row(vec![
            Cell::new("Latest expense"),
            ui::format_optional_cell(self.latest_expense, |d| d.format("%Y-%m-%d").to_string()),
        ]);
        table.add_row(vec![Cell::new("Houses"), Cell::new(self.house_count)]);
        table.add_row(vec![Cell::new("Investors"), Cell::new(self.investor_count)]);
        table.add_row(vec![
            Cell::new("Capital raised"),
            ui::money_cell(self.capital_raised),
        ]);

        table.to_string()
    }
}

pub fn render(snapshot: &ProjectSnapshot, photos_folder: Option<&str>) -> String {
    let summary = analytics::dashboard_summary(&snapshot.data);

    let mut output = format!(
        "Project: {}\n",
        ui::style_text(&snapshot.name, ui::StyleType::Title)
    );
    output.push_str(&ui::style_text(
        &format!(
            "Updated {}",
            snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        ui::StyleType::Subtle,
    ));
    output.push_str("\n\n");
    output.push_str(&summary.display_as_table());
    if let Some(over) = summary.remaining.filter(|r| *r < 0.0) {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                &format!("Over budget by {}", ui::format_money(-over)),
                ui::StyleType::Error
            )
        ));
    }

    let mut by_category = ui::new_styled_table();
    by_category.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Spent"),
        ui::header_cell("Share (%)"),
    ]);
    let total = snapshot.data.summary.total;
    for (category, spent) in &snapshot.data.summary.by_category {
        let share = (total != 0.0).then(|| spent / total * 100.0);
        by_category.add_row(vec![
            Cell::new(category),
            ui::money_cell(*spent),
            ui::format_optional_cell(share, |s| format!("{s:.1}%")),
        ]);
    }
    if !snapshot.data.summary.by_category.is_empty() {
        output.push_str("\n\n");
        output.push_str(&by_category.to_string());
    }

    if let Some(folder) = photos_folder {
        output.push_str(&format!(
            "\n\nPhotos: {}",
            ui::style_text(folder, ui::StyleType::Subtle)
        ));
    }

    output
}
