use super::labels::LabelIndex;
use super::numeric::parse_number;
use super::tokenizer::cell;
use crate::core::model::{Budget, CostSection, House, LineItem};
use tracing::debug;

const LABEL_COL: usize = 0;
const AMOUNT_COL: usize = 1;

const HOUSES_HEADER: &str = "Casas";
const TOTAL_PREFIX: &str = "total";

struct SectionLabels {
    header: &'static str,
    total: &'static str,
}

const HARD_COST: SectionLabels = SectionLabels {
    header: "Hard Cost",
    total: "Total de Hard Cost",
};
const SOFT_COST: SectionLabels = SectionLabels {
    header: "Soft Cost",
    total: "Total de Soft Cost",
};
const TERRENO: SectionLabels = SectionLabels {
    header: "Terreno",
    total: "Total de Terreno",
};

pub fn parse_budget(rows: &[Vec<String>]) -> Budget {
    let index = LabelIndex::new(rows, LABEL_COL);
    let budget = Budget {
        houses: parse_houses(rows, &index),
        hard_costs: parse_section(rows, &index, &HARD_COST),
        soft_costs: parse_section(rows, &index, &SOFT_COST),
        terreno: parse_section(rows, &index, &TERRENO),
    };
    debug!(
        houses = budget.houses.len(),
        hard_items = budget.hard_costs.items.len(),
        soft_items = budget.soft_costs.items.len(),
        terreno_items = budget.terreno.items.len(),
        "Parsed budget sheet"
    );
    budget
}

fn parse_houses(rows: &[Vec<String>], index: &LabelIndex) -> Vec<House> {
    let Some(header) = index.find(HOUSES_HEADER) else {
        return Vec::new();
    };

    (header + 1..rows.len())
        .take_while(|&row| {
            let label = index.label(row);
            !label.is_empty() && !label.starts_with(TOTAL_PREFIX)
        })
        .map(|row| House {
            name: cell(rows, row, 0).to_string(),
            square_meters: parse_number(cell(rows, row, 1)),
            price_per_m2: parse_number(cell(rows, row, 2)),
            total_price: parse_number(cell(rows, row, 3)),
            net_income: parse_number(cell(rows, row, 4)),
        })
        .collect()
}

fn parse_section(rows: &[Vec<String>], index: &LabelIndex, labels: &SectionLabels) -> CostSection {
    let total = index
        .find(labels.total)
        .map(|row| parse_number(cell(rows, row, AMOUNT_COL)));

    let items = match index.find(labels.header) {
        Some(header) => {
            let end = index
                .find_from(labels.total, header + 1)
                .unwrap_or(rows.len());
            (header + 1..end)
                .filter(|&row| !index.label(row).is_empty())
                .map(|row| LineItem {
                    name: cell(rows, row, LABEL_COL).to_string(),
                    amount: parse_number(cell(rows, row, AMOUNT_COL)),
                })
                .collect()
        }
        None => Vec::new(),
    };

    CostSection { total, items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::fixtures::BUDGET_CSV;
    use crate::core::parser::tokenizer::tokenize;

    #[test]
    fn test_parse_houses() {
        let budget = parse_budget(&tokenize(BUDGET_CSV));
        assert_eq!(budget.houses.len(), 1);
        let house = &budget.houses[0];
        assert_eq!(house.name, "Casa Jacaranda");
        assert_eq!(house.square_meters, 180.0);
        assert_eq!(house.price_per_m2, 25000.0);
        assert_eq!(house.total_price, 4500000.0);
        assert_eq!(house.net_income, 900000.0);
    }

    #[test]
    fn test_parse_sections() {
        let budget = parse_budget(&tokenize(BUDGET_CSV));

        assert_eq!(budget.hard_costs.total, Some(2000000.0));
        assert_eq!(budget.hard_costs.items.len(), 2);
        assert_eq!(budget.hard_costs.items[0].name, "Construcción");
        assert_eq!(budget.hard_costs.items[0].amount, 1700000.0);

        assert_eq!(budget.soft_costs.total, Some(250000.0));
        let names: Vec<_> = budget
            .soft_costs
            .items
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Proyecto arquitectónico", "Licencias", "Legal"]);

        assert_eq!(budget.terreno.total, Some(1000000.0));
        assert_eq!(budget.terreno.items.len(), 2);
    }

    #[test]
    fn test_missing_labels_are_absent_not_zero() {
        let rows = tokenize("Presupuesto,,\nHard Cost,,\nCimentación,$100,\n");
        let budget = parse_budget(&rows);

        assert!(budget.houses.is_empty());
        assert_eq!(budget.hard_costs.total, None);
        // Without a total row the section runs to the end of the sheet.
        assert_eq!(budget.hard_costs.items.len(), 1);
        assert_eq!(budget.soft_costs, CostSection::default());
        assert_eq!(budget.terreno.total, None);
    }

    #[test]
    fn test_houses_stop_at_total_row() {
        let rows = tokenize(
            "Casas,m2,Precio m2,Precio Total,Utilidad\nA,100,$10,$1000,$200\nB,abc,,,\nTotal Casas,100,,$1000,\nC,1,1,1,1\n",
        );
        let budget = parse_budget(&rows);
        assert_eq!(budget.houses.len(), 2);
        assert_eq!(budget.houses[1].name, "B");
        assert_eq!(budget.houses[1].square_meters, 0.0);
    }

    #[test]
    fn test_empty_sheet() {
        assert_eq!(parse_budget(&[]), Budget::default());
    }
}
