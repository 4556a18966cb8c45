use super::ui;
use crate::core::analytics::{BudgetLine, CategoryProgress};
use comfy_table::{Attribute, Cell};

fn line_cells(line: &BudgetLine, name: Cell) -> Vec<Cell> {
    vec![
        name,
        ui::format_optional_cell(line.budget, ui::format_money),
        ui::money_cell(line.spent),
        ui::format_optional_cell(line.remaining, ui::format_money),
        ui::progress_cell(line.progress),
    ]
}

pub fn display_budget(rows: &[CategoryProgress]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Concept"),
        ui::header_cell("Budget"),
        ui::header_cell("Spent"),
        ui::header_cell("Remaining"),
        ui::header_cell("Progress"),
    ]);

    for row in rows {
        let name = Cell::new(row.category.to_string()).add_attribute(Attribute::Bold);
        table.add_row(line_cells(&row.total, name));
        for item in &row.items {
            table.add_row(line_cells(item, Cell::new(format!("  {}", item.name))));
        }
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Budget vs actual", ui::StyleType::Title)
    );
    output.push_str(&table.to_string());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::budget_vs_actual;
    use crate::core::parser::{fixtures, parse_project};

    #[test]
    fn test_display_budget() {
        let data = parse_project(&fixtures::sheets());
        let output = display_budget(&budget_vs_actual(&data));

        assert!(output.contains("Hard Cost"));
        assert!(output.contains("  Construcción"));
        assert!(output.contains("$2,000,000.00"));
        assert!(output.contains("$500,000.00"));
        assert!(output.contains("25.0%"));
        assert!(output.contains("Terreno"));
    }

    #[test]
    fn test_overspent_line_shows_raw_figure() {
        let line = BudgetLine {
            name: "Legal".to_string(),
            budget: Some(100.0),
            spent: 130.0,
            remaining: Some(-30.0),
            progress: Some(130.0),
        };
        let rows = vec![CategoryProgress {
            category: crate::core::model::Category::SoftCost,
            total: line.clone(),
            items: vec![line],
        }];
        let output = display_budget(&rows);
        assert!(output.contains("130.0%"));
        assert!(output.contains("-$30.00"));
    }
}
