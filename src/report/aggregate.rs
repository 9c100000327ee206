use rust_decimal::Decimal;

use crate::models::{Category, Expense};

/// Bucket name for expenses with no category.
pub const FALLBACK_CATEGORY: &str = "Other";
/// Display color for the fallback bucket.
pub const FALLBACK_COLOR: &str = "#6B7280";

/// Spend total for one category name this month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpend {
    pub name: String,
    pub color: String,
    pub spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardTotals {
    pub total_spent: Decimal,
    pub transaction_count: usize,
    pub average_transaction: Decimal,
    pub total_budget: Decimal,
    /// May be negative when spending exceeds the combined budget.
    pub budget_remaining: Decimal,
}

/// Group expenses into per-category-name buckets in first-seen order.
///
/// Each bucket keeps the color of the first expense that opened it.
/// Malformed records (negative amounts) are skipped entirely so they can
/// never skew a bucket or the totals.
pub fn spend_by_category(expenses: &[Expense]) -> Vec<CategorySpend> {
    let mut buckets: Vec<CategorySpend> = Vec::new();

    for expense in expenses.iter().filter(|e| e.is_valid()) {
        let (name, color) = match &expense.category {
            Some(cat) => (cat.name.as_str(), cat.color.as_str()),
            None => (FALLBACK_CATEGORY, FALLBACK_COLOR),
        };

        match buckets.iter_mut().find(|b| b.name == name) {
            Some(bucket) => bucket.spent += expense.amount,
            None => buckets.push(CategorySpend {
                name: name.to_string(),
                color: color.to_string(),
                spent: expense.amount,
            }),
        }
    }

    buckets
}

/// Whole-dashboard scalars for the stat cards.
pub fn dashboard_totals(expenses: &[Expense], categories: &[Category]) -> DashboardTotals {
    let mut total_spent = Decimal::ZERO;
    let mut transaction_count = 0usize;
    for expense in expenses.iter().filter(|e| e.is_valid()) {
        total_spent += expense.amount;
        transaction_count += 1;
    }

    let average_transaction = if transaction_count > 0 {
        total_spent / Decimal::from(transaction_count as u64)
    } else {
        Decimal::ZERO
    };

    let total_budget: Decimal = categories.iter().map(|c| c.monthly_budget).sum();

    DashboardTotals {
        total_spent,
        transaction_count,
        average_transaction,
        total_budget,
        budget_remaining: total_budget - total_spent,
    }
}
