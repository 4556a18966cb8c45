use super::ui;
use crate::core::analytics::SalesSummary;
use crate::core::model::House;
use comfy_table::{Cell, CellAlignment};

pub fn display_houses(houses: &[House]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("House"),
        ui::header_cell("Area (m²)"),
        ui::header_cell("Price / m²"),
        ui::header_cell("Price"),
        ui::header_cell("Net income"),
    ]);

    for house in houses {
        table.add_row(vec![
            Cell::new(&house.name),
            Cell::new(format!("{:.2}", house.square_meters)).set_alignment(CellAlignment::Right),
            ui::money_cell(house.price_per_m2),
            ui::money_cell(house.total_price),
            ui::money_cell(house.net_income),
        ]);
    }

    let mut output = format!("{}\n\n", ui::style_text("Houses", ui::StyleType::Title));
    if houses.is_empty() {
        output.push_str(&ui::style_text(
            "No houses found in the budget sheet",
            ui::StyleType::Subtle,
        ));
    } else {
        output.push_str(&table.to_string());
    }
    output
}

impl SalesSummary {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![ui::header_cell("Sales"), ui::header_cell("Value")]);
        table.add_row(vec![Cell::new("Units"), Cell::new(self.units)]);
        table.add_row(vec![
            Cell::new("Sellable area (m²)"),
            Cell::new(format!("{:.2}", self.total_m2)).set_alignment(CellAlignment::Right),
        ]);
        table.add_row(vec![
            Cell::new("Average price / m²"),
            ui::format_optional_cell(self.average_price_per_m2, ui::format_money),
        ]);
        table.add_row(vec![
            Cell::new("Net income"),
            ui::money_cell(self.total_net_income),
        ]);

        let mut output = format!("{}\n\n", ui::style_text("Sales", ui::StyleType::Title));
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} {}",
            ui::style_text("Projected sales:", ui::StyleType::TotalLabel),
            ui::style_text(&ui::format_money(self.total_price), ui::StyleType::TotalValue)
        ));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analytics::sales_summary;
    use crate::core::model::Budget;
    use crate::core::parser::{fixtures, parse_project};

    #[test]
    fn test_display_houses() {
        let data = parse_project(&fixtures::sheets());
        let output = display_houses(&data.budget.houses);
        assert!(output.contains("Casa Jacaranda"));
        assert!(output.contains("180.00"));
        assert!(output.contains("$25,000.00"));
        assert!(output.contains("$4,500,000.00"));
        assert!(output.contains("$900,000.00"));
    }

    #[test]
    fn test_display_houses_empty() {
        assert!(display_houses(&[]).contains("No houses found"));
    }

    #[test]
    fn test_sales_table() {
        let data = parse_project(&fixtures::sheets());
        let output = sales_summary(&data.budget).display_as_table();
        assert!(output.contains("$25,000.00"));
        assert!(output.contains("$4,500,000.00"));

        let empty = sales_summary(&Budget::default()).display_as_table();
        assert!(empty.contains("N/A"));
    }
}
