//! View models derived from a parsed project

use crate::core::model::{Budget, Category, Expense, ProjectData};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Spent over budget as a percentage. `None` without a usable budget.
///
/// The value is not clamped: overspending shows as more than 100.
pub fn progress(spent: f64, budget: Option<f64>) -> Option<f64> {
    match budget {
        Some(b) if b != 0.0 => Some(spent / b * 100.0),
        _ => None,
    }
}

/// Clamps a progress percentage into 0..=100 for bars and gauges.
pub fn display_progress(progress: f64) -> f64 {
    progress.clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub name: String,
    pub budget: Option<f64>,
    pub spent: f64,
    pub remaining: Option<f64>,
    pub progress: Option<f64>,
}

impl BudgetLine {
    fn new(name: String, budget: Option<f64>, spent: f64) -> Self {
        Self {
            name,
            budget,
            spent,
            remaining: budget.map(|b| b - spent),
            progress: progress(spent, budget),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProgress {
    pub category: Category,
    pub total: BudgetLine,
    pub items: Vec<BudgetLine>,
}

/// Budget against actual spend for each budget bucket and its line items.
///
/// Line items are matched to expenses by subcategory name within the
/// normalized category.
pub fn budget_vs_actual(data: &ProjectData) -> Vec<CategoryProgress> {
    Category::BUDGETED
        .iter()
        .map(|category| {
            let section = data.budget.section(category);
            let total = BudgetLine::new(
                category.to_string(),
                section.and_then(|s| s.total),
                data.summary.spent_in(category),
            );
            let items = section
                .map(|s| {
                    s.items
                        .iter()
                        .map(|item| {
                            BudgetLine::new(
                                item.name.clone(),
                                Some(item.amount),
                                data.summary.spent_in_subcategory(category, &item.name),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default();
            CategoryProgress {
                category: category.clone(),
                total,
                items,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub total_budget: Option<f64>,
    pub total_spent: f64,
    pub remaining: Option<f64>,
    pub progress: Option<f64>,
    pub expense_count: usize,
    pub latest_expense: Option<NaiveDate>,
    pub investor_count: usize,
    pub capital_raised: f64,
    pub house_count: usize,
}

pub fn dashboard_summary(data: &ProjectData) -> DashboardSummary {
    let total_budget = data.budget.total();
    let total_spent = data.summary.total;
    DashboardSummary {
        total_budget,
        total_spent,
        remaining: total_budget.map(|b| b - total_spent),
        progress: progress(total_spent, total_budget),
        expense_count: data.expenses.len(),
        latest_expense: data.expenses.iter().filter_map(|e| e.date).max(),
        investor_count: data.capital.investors.len(),
        capital_raised: data.capital.total_invested(),
        house_count: data.budget.houses.len(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesSummary {
    pub units: usize,
    pub total_m2: f64,
    pub total_price: f64,
    pub total_net_income: f64,
    /// Total price over total area, `None` when no area is recorded.
    pub average_price_per_m2: Option<f64>,
}

pub fn sales_summary(budget: &Budget) -> SalesSummary {
    let total_m2: f64 = budget.houses.iter().map(|h| h.square_meters).sum();
    let total_price: f64 = budget.houses.iter().map(|h| h.total_price).sum();
    SalesSummary {
        units: budget.houses.len(),
        total_m2,
        total_price,
        total_net_income: budget.houses.iter().map(|h| h.net_income).sum(),
        average_price_per_m2: (total_m2 != 0.0).then(|| total_price / total_m2),
    }
}

/// Criteria for the expense table. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    pub subcategory: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Case-insensitive text searched in description, subcategory and
    /// category.
    pub search: Option<String>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = &self.category {
            if expense.normalized_category() != *category {
                return false;
            }
        }
        if let Some(sub) = &self.subcategory {
            if !expense.subcategory.trim().eq_ignore_ascii_case(sub.trim()) {
                return false;
            }
        }
        if self.from.is_some() || self.to.is_some() {
            let Some(date) = expense.date else {
                return false;
            };
            if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let haystack = [&expense.description, &expense.subcategory, &expense.category];
            if !haystack.iter().any(|h| h.to_lowercase().contains(&needle)) {
                return false;
            }
        }
        true
    }
}

/// Filters expenses and sorts them newest first, undated ones last.
pub fn filter_expenses<'a>(expenses: &'a [Expense], filter: &ExpenseFilter) -> Vec<&'a Expense> {
    let mut matching: Vec<&Expense> = expenses.iter().filter(|e| filter.matches(e)).collect();
    matching.sort_by(|a, b| match (a.date, b.date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::{fixtures, parse_project};

    fn expense(date: Option<(i32, u32, u32)>, category: &str, sub: &str, amount: f64) -> Expense {
        Expense {
            raw_date: String::new(),
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            category: category.to_string(),
            subcategory: sub.to_string(),
            description: format!("{sub} payment"),
            amount,
        }
    }

    #[test]
    fn test_progress_is_not_clamped() {
        assert_eq!(progress(150.0, Some(100.0)), Some(150.0));
        assert_eq!(progress(-10.0, Some(100.0)), Some(-10.0));
        assert_eq!(progress(10.0, Some(0.0)), None);
        assert_eq!(progress(10.0, None), None);
        assert_eq!(display_progress(150.0), 100.0);
        assert_eq!(display_progress(-10.0), 0.0);
        assert_eq!(display_progress(42.5), 42.5);
    }

    #[test]
    fn test_budget_vs_actual_fixture() {
        let data = parse_project(&fixtures::sheets());
        let rows = budget_vs_actual(&data);
        assert_eq!(rows.len(), 3);

        let hard = &rows[0];
        assert_eq!(hard.category, Category::HardCost);
        assert_eq!(hard.total.budget, Some(2000000.0));
        assert_eq!(hard.total.spent, 500000.0);
        assert_eq!(hard.total.progress, Some(500000.0 / 2000000.0 * 100.0));
        assert_eq!(hard.total.remaining, Some(1500000.0));

        let soft = &rows[1];
        assert_eq!(soft.total.spent, 175500.5);
        assert_eq!(soft.total.progress, Some(175500.5 / 250000.0 * 100.0));
        assert_eq!(soft.items.len(), 3);
        let legal = soft.items.iter().find(|i| i.name == "Legal").unwrap();
        assert_eq!(legal.spent, 25500.5);
        let proyecto = &soft.items[0];
        assert_eq!(proyecto.spent, 90000.0);
        assert_eq!(proyecto.progress, Some(75.0));

        let terreno = &rows[2];
        assert_eq!(terreno.total.spent, 0.0);
        assert_eq!(terreno.total.progress, Some(0.0));
    }

    #[test]
    fn test_overspending_keeps_raw_progress() {
        let mut data = ProjectData::default();
        data.budget.hard_costs.total = Some(100.0);
        data.summary.by_category.insert("Hard Cost".to_string(), 250.0);
        let rows = budget_vs_actual(&data);
        assert_eq!(rows[0].total.progress, Some(250.0));
        assert_eq!(rows[0].total.remaining, Some(-150.0));
        assert_eq!(display_progress(rows[0].total.progress.unwrap()), 100.0);
        // Missing sections have no budget and no progress.
        assert_eq!(rows[1].total.budget, None);
        assert_eq!(rows[1].total.progress, None);
    }

    #[test]
    fn test_dashboard_summary_fixture() {
        let data = parse_project(&fixtures::sheets());
        let summary = dashboard_summary(&data);
        assert_eq!(summary.total_budget, Some(3250000.0));
        assert_eq!(summary.total_spent, 675500.5);
        assert_eq!(summary.remaining, Some(3250000.0 - 675500.5));
        assert_eq!(summary.expense_count, 5);
        assert_eq!(summary.latest_expense, NaiveDate::from_ymd_opt(2024, 4, 15));
        assert_eq!(summary.investor_count, 2);
        assert_eq!(summary.capital_raised, 3250000.0);
        assert_eq!(summary.house_count, 1);
    }

    #[test]
    fn test_sales_summary() {
        let data = parse_project(&fixtures::sheets());
        let sales = sales_summary(&data.budget);
        assert_eq!(sales.units, 1);
        assert_eq!(sales.total_m2, 180.0);
        assert_eq!(sales.total_price, 4500000.0);
        assert_eq!(sales.total_net_income, 900000.0);
        assert_eq!(sales.average_price_per_m2, Some(25000.0));

        let empty = sales_summary(&Budget::default());
        assert_eq!(empty.units, 0);
        assert_eq!(empty.average_price_per_m2, None);
    }

    #[test]
    fn test_filter_by_normalized_category() {
        let expenses = vec![
            expense(Some((2024, 1, 1)), "Hard Costs", "Obra", 1.0),
            expense(Some((2024, 1, 2)), "hard", "Obra", 2.0),
            expense(Some((2024, 1, 3)), "Soft", "Legal", 3.0),
        ];
        let filter = ExpenseFilter {
            category: Some(Category::HardCost),
            ..Default::default()
        };
        let result = filter_expenses(&expenses, &filter);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].amount, 2.0);
    }

    #[test]
    fn test_filter_by_date_excludes_undated() {
        let expenses = vec![
            expense(Some((2024, 1, 1)), "Hard", "A", 1.0),
            expense(None, "Hard", "B", 2.0),
            expense(Some((2024, 3, 1)), "Hard", "C", 3.0),
            expense(Some((2024, 5, 1)), "Hard", "D", 4.0),
        ];
        let filter = ExpenseFilter {
            from: NaiveDate::from_ymd_opt(2024, 2, 1),
            to: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        };
        let amounts: Vec<f64> = filter_expenses(&expenses, &filter)
            .iter()
            .map(|e| e.amount)
            .collect();
        assert_eq!(amounts, vec![4.0, 3.0]);
    }

    #[test]
    fn test_sort_puts_undated_last() {
        let expenses = vec![
            expense(None, "Soft", "A", 1.0),
            expense(Some((2024, 1, 1)), "Soft", "B", 2.0),
            expense(Some((2024, 6, 1)), "Soft", "C", 3.0),
        ];
        let amounts: Vec<f64> = filter_expenses(&expenses, &ExpenseFilter::default())
            .iter()
            .map(|e| e.amount)
            .collect();
        assert_eq!(amounts, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_filter_by_subcategory_and_search() {
        let expenses = vec![
            expense(None, "Soft", "Legal", 1.0),
            expense(None, "Soft", "Licencias", 2.0),
        ];
        let by_sub = ExpenseFilter {
            subcategory: Some(" legal".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_expenses(&expenses, &by_sub).len(), 1);

        let by_text = ExpenseFilter {
            search: Some("LICEN".to_string()),
            ..Default::default()
        };
        let found = filter_expenses(&expenses, &by_text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 2.0);
    }
}
