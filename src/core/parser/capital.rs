use super::labels::LabelIndex;
use super::numeric::{parse_multiple, parse_number, parse_percent};
use super::tokenizer::cell;
use crate::core::model::{
    Allocation, Capital, CapitalIndicators, Indicator, Investor, ProjectIndicators,
};
use tracing::{debug, warn};

const LABEL_COL: usize = 0;
const VALUE_COL: usize = 1;

// Fixed positions. These blocks are read by offset rather than by label, so
// a restructured sheet silently yields wrong values; a header mismatch is
// only logged.
const USES_HEADER: (usize, &str) = (0, "usos");
const USES_ROWS: std::ops::RangeInclusive<usize> = 1..=3;
const INVESTORS_HEADER: (usize, &str) = (5, "inversionistas");
const INVESTORS_START: usize = 6;

#[derive(Clone, Copy)]
enum Kind {
    Currency,
    Percent,
    Multiple,
}

pub fn parse_capital(rows: &[Vec<String>]) -> Capital {
    let index = LabelIndex::new(rows, LABEL_COL);
    let indicator = |label: &str, kind: Kind| read_indicator(rows, &index, label, kind);

    let capital = Capital {
        uses: parse_uses(rows, &index),
        investors: parse_investors(rows, &index),
        project: ProjectIndicators {
            income: indicator("Ingresos", Kind::Currency),
            cost: indicator("Costo", Kind::Currency),
            profit: indicator("Utilidad", Kind::Currency),
            margin: indicator("Margen", Kind::Percent),
        },
        capital: CapitalIndicators {
            capital_contributed: indicator("Capital Aportado", Kind::Currency),
            total_return: indicator("Retorno Total", Kind::Currency),
            roi: indicator("ROI", Kind::Percent),
            capital_multiple: indicator("Múltiplo", Kind::Multiple),
        },
    };
    debug!(
        uses = capital.uses.len(),
        investors = capital.investors.len(),
        "Parsed capital sheet"
    );
    capital
}

fn check_header(index: &LabelIndex, (row, expected): (usize, &str)) {
    if !index.is_empty() && !index.label(row).starts_with(expected) {
        warn!(
            "Capital sheet row {} expected to start with '{}', found '{}'",
            row,
            expected,
            index.label(row)
        );
    }
}

fn parse_uses(rows: &[Vec<String>], index: &LabelIndex) -> Vec<Allocation> {
    check_header(index, USES_HEADER);
    USES_ROWS
        .filter(|&row| row < rows.len())
        .map(|row| Allocation {
            name: cell(rows, row, 0).to_string(),
            amount: parse_number(cell(rows, row, 1)),
            percent: parse_percent(cell(rows, row, 2)),
        })
        .collect()
}

fn parse_investors(rows: &[Vec<String>], index: &LabelIndex) -> Vec<Investor> {
    check_header(index, INVESTORS_HEADER);
    (INVESTORS_START..rows.len())
        .take_while(|&row| !cell(rows, row, 0).is_empty())
        .map(|row| Investor {
            name: cell(rows, row, 0).to_string(),
            amount: parse_number(cell(rows, row, 1)),
        })
        .collect()
}

fn read_indicator(rows: &[Vec<String>], index: &LabelIndex, label: &str, kind: Kind) -> Indicator {
    match index.find(label) {
        Some(row) => {
            let raw = cell(rows, row, VALUE_COL);
            let value = match kind {
                Kind::Currency => parse_number(raw),
                Kind::Percent => parse_percent(raw),
                Kind::Multiple => parse_multiple(raw),
            };
            Indicator {
                value: Some(value),
                label: raw.to_string(),
            }
        }
        None => Indicator::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::fixtures::CAPITAL_CSV;
    use crate::core::parser::tokenizer::tokenize;

    #[test]
    fn test_parse_uses_and_investors() {
        let capital = parse_capital(&tokenize(CAPITAL_CSV));

        assert_eq!(capital.uses.len(), 3);
        assert_eq!(capital.uses[0].name, "Terreno");
        assert_eq!(capital.uses[0].amount, 1000000.0);
        assert_eq!(capital.uses[0].percent, 30.8);
        assert_eq!(capital.uses[2].name, "Soft Cost");

        assert_eq!(capital.investors.len(), 2);
        assert_eq!(capital.investors[0].name, "Ana Torres");
        assert_eq!(capital.investors[1].amount, 1250000.0);
        assert_eq!(capital.total_invested(), 3250000.0);
    }

    #[test]
    fn test_parse_indicators() {
        let capital = parse_capital(&tokenize(CAPITAL_CSV));

        assert_eq!(capital.project.income.value, Some(4500000.0));
        assert_eq!(capital.project.income.label, "$4,500,000.00");
        assert_eq!(capital.project.cost.value, Some(3250000.0));
        assert_eq!(capital.project.profit.value, Some(1250000.0));
        assert_eq!(capital.project.margin.value, Some(27.8));
        assert_eq!(capital.project.margin.label, "27.8%");

        assert_eq!(capital.capital.capital_contributed.value, Some(3250000.0));
        assert_eq!(capital.capital.total_return.value, Some(4500000.0));
        assert_eq!(capital.capital.roi.value, Some(38.5));
        assert_eq!(capital.capital.capital_multiple.value, Some(1.38));
        assert_eq!(capital.capital.capital_multiple.label, "1.38x");
    }

    #[test]
    fn test_missing_indicator_is_absent() {
        let capital = parse_capital(&tokenize("Usos de Capital,Monto,Porcentaje\n"));
        assert_eq!(capital.project.income, Indicator::default());
        assert!(capital.capital.roi.value.is_none());
        assert!(capital.uses.is_empty());
        assert!(capital.investors.is_empty());
    }

    #[test]
    fn test_investor_run_stops_at_blank_name() {
        let text = "Usos,,\nA,1,1%\nB,2,2%\nC,3,3%\n,,\nInversionistas,,\nUno,$10,\n,$99,\nDos,$20,\n";
        let capital = parse_capital(&tokenize(text));
        assert_eq!(capital.investors.len(), 1);
        assert_eq!(capital.investors[0].amount, 10.0);
    }

    #[test]
    fn test_blank_line_before_investors_keeps_offsets() {
        let text = "Usos de Capital,Monto,Porcentaje\nTerreno,$1,10%\nHard,$2,20%\nSoft,$3,30%\n\nInversionistas,Monto\nAna,$100\nLuis,$200\n";
        let capital = parse_capital(&tokenize(text));

        assert_eq!(capital.uses.len(), 3);
        assert_eq!(capital.uses[2].name, "Soft");
        assert_eq!(capital.investors.len(), 2);
        assert_eq!(capital.investors[0].name, "Ana");
        assert_eq!(capital.investors[0].amount, 100.0);
        assert_eq!(capital.investors[1].name, "Luis");
    }

    #[test]
    fn test_empty_sheet() {
        assert_eq!(parse_capital(&[]), Capital::default());
    }
}
