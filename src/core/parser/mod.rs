//! Sheet-to-model parsing
//!
//! Turns the three published CSV exports into [`ProjectData`]. Parsing never
//! fails: anything missing or unreadable degrades to zero, an empty list or
//! `None`.

pub mod aggregate;
pub mod budget;
pub mod capital;
pub mod expenses;
pub mod labels;
pub mod numeric;
pub mod tokenizer;

use crate::core::model::ProjectData;

/// Raw text of the three sheets of a project.
#[derive(Debug, Clone)]
pub struct SheetTexts {
    pub budget: String,
    pub expenses: String,
    pub capital: String,
}

pub fn parse_project(sheets: &SheetTexts) -> ProjectData {
    let expenses = expenses::parse_expenses(&tokenizer::tokenize(&sheets.expenses));
    let summary = aggregate::summarize(&expenses);
    ProjectData {
        budget: budget::parse_budget(&tokenizer::tokenize(&sheets.budget)),
        capital: capital::parse_capital(&tokenizer::tokenize(&sheets.capital)),
        expenses,
        summary,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_project_is_idempotent() {
        let sheets = fixtures::sheets();
        assert_eq!(parse_project(&sheets), parse_project(&sheets));
    }

    #[test]
    fn test_parse_project_fixture() {
        let data = parse_project(&fixtures::sheets());
        assert_eq!(data.budget.houses.len(), 1);
        assert_eq!(data.budget.soft_costs.items.len(), 3);
        assert_eq!(data.expenses.len(), 5);
        assert_eq!(
            data.summary.total,
            400000.0 + 100000.0 + 60000.0 + 25500.5 + 90000.0
        );
        assert_eq!(data.summary.by_category.len(), 2);
        assert_eq!(data.summary.by_category["Hard Cost"], 500000.0);
        assert_eq!(data.summary.by_category["Soft Cost"], 175500.5);
        assert_eq!(data.capital.investors.len(), 2);
    }

    #[test]
    fn test_parse_project_empty_sheets() {
        let data = parse_project(&SheetTexts {
            budget: String::new(),
            expenses: String::new(),
            capital: String::new(),
        });
        assert_eq!(data, ProjectData::default());
    }
}
