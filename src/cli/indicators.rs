use super::ui;
use crate::core::model::{Capital, Indicator};
use comfy_table::Cell;

/// Published text wins; a value without text is formatted with `fallback`.
fn indicator_cell(indicator: &Indicator, fallback: impl Fn(f64) -> String) -> Cell {
    if !indicator.label.trim().is_empty() {
        return Cell::new(indicator.label.trim()).set_alignment(comfy_table::CellAlignment::Right);
    }
    ui::format_optional_cell(indicator.value, fallback)
}

fn percent(v: f64) -> String {
    format!("{v:.1}%")
}

pub fn display_indicators(capital: &Capital) -> String {
    let mut project = ui::new_styled_table();
    project.set_header(vec![ui::header_cell("Project"), ui::header_cell("Value")]);
    project.add_row(vec![
        Cell::new("Income"),
        indicator_cell(&capital.project.income, ui::format_money),
    ]);
    project.add_row(vec![
        Cell::new("Cost"),
        indicator_cell(&capital.project.cost, ui::format_money),
    ]);
    project.add_row(vec![
        Cell::new("Profit"),
        indicator_cell(&capital.project.profit, ui::format_money),
    ]);
    project.add_row(vec![
        Cell::new("Margin"),
        indicator_cell(&capital.project.margin, percent),
    ]);

    let mut returns = ui::new_styled_table();
    returns.set_header(vec![ui::header_cell("Capital"), ui::header_cell("Value")]);
    returns.add_row(vec![
        Cell::new("Capital contributed"),
        indicator_cell(&capital.capital.capital_contributed, ui::format_money),
    ]);
    returns.add_row(vec![
        Cell::new("Total return"),
        indicator_cell(&capital.capital.total_return, ui::format_money),
    ]);
    returns.add_row(vec![
        Cell::new("ROI"),
        indicator_cell(&capital.capital.roi, percent),
    ]);
    let multiple = Indicator {
        value: capital.capital_multiple(),
        label: capital.capital.capital_multiple.label.clone(),
    };
    returns.add_row(vec![
        Cell::new("Capital multiple"),
        indicator_cell(&multiple, |m| format!("{m:.2}x")),
    ]);

    let mut uses = ui::new_styled_table();
    uses.set_header(vec![
        ui::header_cell("Use of capital"),
        ui::header_cell("Amount"),
        ui::header_cell("Share (%)"),
    ]);
    for allocation in &capital.uses {
        uses.add_row(vec![
            Cell::new(&allocation.name),
            ui::money_cell(allocation.amount),
            ui::format_optional_cell(Some(allocation.percent), percent),
        ]);
    }

    let mut investors = ui::new_styled_table();
    investors.set_header(vec![ui::header_cell("Investor"), ui::header_cell("Amount")]);
    for investor in &capital.investors {
        investors.add_row(vec![Cell::new(&investor.name), ui::money_cell(investor.amount)]);
    }

    let mut output = format!(
        "{}\n\n",
        ui::style_text("Financial indicators", ui::StyleType::Title)
    );
    output.push_str(&project.to_string());
    output.push_str("\n\n");
    output.push_str(&returns.to_string());
    output.push_str("\n\n");
    output.push_str(&uses.to_string());
    output.push_str("\n\n");
    output.push_str(&investors.to_string());
    output.push_str(&format!(
        "\n\n{} {}",
        ui::style_text("Total invested:", ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_money(capital.total_invested()),
            ui::StyleType::TotalValue
        )
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::{fixtures, parse_project};

    #[test]
    fn test_display_indicators_fixture() {
        let data = parse_project(&fixtures::sheets());
        let output = display_indicators(&data.capital);

        assert!(output.contains("27.8%"));
        assert!(output.contains("38.5%"));
        assert!(output.contains("1.38x"));
        assert!(output.contains("Ana Torres"));
        assert!(output.contains("Grupo Alameda"));
        assert!(output.contains("$3,250,000.00"));
    }

    #[test]
    fn test_derived_multiple_is_formatted() {
        let mut capital = Capital::default();
        capital.capital.total_return.value = Some(300.0);
        capital.capital.capital_contributed.value = Some(200.0);
        let output = display_indicators(&capital);
        assert!(output.contains("1.50x"));
        assert!(output.contains("N/A"));
    }
}
