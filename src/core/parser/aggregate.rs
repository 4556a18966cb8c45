use crate::core::model::{Expense, ExpenseSummary};

/// Totals expenses overall, per normalized category and per
/// category/subcategory pair.
pub fn summarize(expenses: &[Expense]) -> ExpenseSummary {
    let mut summary = ExpenseSummary::default();
    for expense in expenses {
        let category = expense.normalized_category();
        summary.total += expense.amount;
        *summary
            .by_category
            .entry(category.to_string())
            .or_insert(0.0) += expense.amount;
        *summary
            .by_subcategory
            .entry(ExpenseSummary::subcategory_key(&category, &expense.subcategory))
            .or_insert(0.0) += expense.amount;
    }
    summary
}
