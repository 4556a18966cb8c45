//! Project data model produced by one parse pass over the three sheets

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Canonical expense/budget bucket.
///
/// Free-text labels from the ledger are folded by case-insensitive prefix so
/// that "Hard Costs", "hard cost" and "HARD" all land in the same bucket.
/// Anything unknown stays as its trimmed label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    HardCost,
    SoftCost,
    Terreno,
    Other(String),
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with("hard") {
            Category::HardCost
        } else if lower.starts_with("soft") {
            Category::SoftCost
        } else if lower.starts_with("terreno") {
            Category::Terreno
        } else {
            Category::Other(trimmed.to_string())
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::HardCost => write!(f, "Hard Cost"),
            Category::SoftCost => write!(f, "Soft Cost"),
            Category::Terreno => write!(f, "Terreno"),
            Category::Other(label) => write!(f, "{label}"),
        }
    }
}

impl Category {
    /// The three buckets the budget sheet is organised by.
    pub const BUDGETED: [Category; 3] = [Category::HardCost, Category::SoftCost, Category::Terreno];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub name: String,
    pub square_meters: f64,
    pub price_per_m2: f64,
    pub total_price: f64,
    pub net_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: f64,
}

/// A budget section: a total row plus the line items listed above it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostSection {
    /// `None` when the sheet has no total row for the section.
    pub total: Option<f64>,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub houses: Vec<House>,
    /// Items of the hard cost section are the construction breakdown.
    pub hard_costs: CostSection,
    pub soft_costs: CostSection,
    pub terreno: CostSection,
}

impl Budget {
    pub fn section(&self, category: &Category) -> Option<&CostSection> {
        match category {
            Category::HardCost => Some(&self.hard_costs),
            Category::SoftCost => Some(&self.soft_costs),
            Category::Terreno => Some(&self.terreno),
            Category::Other(_) => None,
        }
    }

    /// Sum of the three section totals, `None` when none of them was found.
    pub fn total(&self) -> Option<f64> {
        [
            self.hard_costs.total,
            self.soft_costs.total,
            self.terreno.total,
        ]
        .into_iter()
        .flatten()
        .fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub raw_date: String,
    pub date: Option<NaiveDate>,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub amount: f64,
}

impl Expense {
    pub fn normalized_category(&self) -> Category {
        Category::from(self.category.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
    /// Keyed by `"<normalized category>|<subcategory>"`.
    pub by_subcategory: BTreeMap<String, f64>,
}

impl ExpenseSummary {
    pub fn subcategory_key(category: &Category, subcategory: &str) -> String {
        format!("{category}|{}", subcategory.trim())
    }

    pub fn spent_in(&self, category: &Category) -> f64 {
        self.by_category
            .get(&category.to_string())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn spent_in_subcategory(&self, category: &Category, subcategory: &str) -> f64 {
        self.by_subcategory
            .get(&Self::subcategory_key(category, subcategory))
            .copied()
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: String,
    pub amount: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub name: String,
    pub amount: f64,
}

/// A single figure from the indicator blocks of the capital sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub value: Option<f64>,
    /// The cell text as published, e.g. `"$1,000,000.00"` or `"25.0%"`.
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectIndicators {
    pub income: Indicator,
    pub cost: Indicator,
    pub profit: Indicator,
    pub margin: Indicator,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalIndicators {
    pub capital_contributed: Indicator,
    pub total_return: Indicator,
    pub roi: Indicator,
    pub capital_multiple: Indicator,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capital {
    pub uses: Vec<Allocation>,
    pub investors: Vec<Investor>,
    pub project: ProjectIndicators,
    pub capital: CapitalIndicators,
}

impl Capital {
    pub fn total_invested(&self) -> f64 {
        self.investors.iter().map(|i| i.amount).sum()
    }

    /// Capital multiple as published, or total return over capital
    /// contributed when the sheet leaves it out.
    pub fn capital_multiple(&self) -> Option<f64> {
        if let Some(multiple) = self.capital.capital_multiple.value {
            return Some(multiple);
        }
        match (
            self.capital.total_return.value,
            self.capital.capital_contributed.value,
        ) {
            (Some(ret), Some(contributed)) if contributed != 0.0 => Some(ret / contributed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectData {
    pub budget: Budget,
    pub expenses: Vec<Expense>,
    pub capital: Capital,
    pub summary: ExpenseSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub key: String,
    pub name: String,
    pub fetched_at: DateTime<Utc>,
    pub data: ProjectData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_normalization() {
        assert_eq!(Category::from("Hard Costs"), Category::HardCost);
        assert_eq!(Category::from("  hard cost "), Category::HardCost);
        assert_eq!(Category::from("SOFT"), Category::SoftCost);
        assert_eq!(Category::from("Terreno y escrituras"), Category::Terreno);
        assert_eq!(
            Category::from("  Comisiones "),
            Category::Other("Comisiones".to_string())
        );
        assert_eq!(Category::HardCost.to_string(), "Hard Cost");
        assert_eq!(Category::from("Varios").to_string(), "Varios");
    }

    #[test]
    fn test_budget_total_ignores_missing_sections() {
        let mut budget = Budget::default();
        assert_eq!(budget.total(), None);

        budget.hard_costs.total = Some(100.0);
        budget.terreno.total = Some(50.0);
        assert_eq!(budget.total(), Some(150.0));
    }

    #[test]
    fn test_capital_multiple_falls_back_to_ratio() {
        let mut capital = Capital::default();
        assert_eq!(capital.capital_multiple(), None);

        capital.capital.total_return.value = Some(300.0);
        capital.capital.capital_contributed.value = Some(200.0);
        assert_eq!(capital.capital_multiple(), Some(1.5));

        capital.capital.capital_multiple.value = Some(1.4);
        assert_eq!(capital.capital_multiple(), Some(1.4));
    }

    #[test]
    fn test_summary_lookup_defaults_to_zero() {
        let summary = ExpenseSummary::default();
        assert_eq!(summary.spent_in(&Category::SoftCost), 0.0);
        assert_eq!(
            summary.spent_in_subcategory(&Category::SoftCost, "Legal"),
            0.0
        );
    }
}
