use rust_decimal::Decimal;

use super::aggregate::CategorySpend;
use super::classify::{classify, BudgetTier};
use crate::models::Category;

/// One wedge of the category spending chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSlice {
    pub name: String,
    pub value: Decimal,
    pub color: String,
}

/// One row of the budget progress list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetStatus {
    pub category_id: Option<i64>,
    pub name: String,
    pub color: String,
    pub spent: Decimal,
    pub budget: Decimal,
    pub tier: BudgetTier,
    pub display_percentage: Option<Decimal>,
}

/// Chart projection: one slice per bucket that actually saw spending.
/// Configured categories with zero expenses this month do not appear.
pub fn chart_data(spend: &[CategorySpend]) -> Vec<ChartSlice> {
    spend
        .iter()
        .map(|bucket| ChartSlice {
            name: bucket.name.clone(),
            value: bucket.spent,
            color: bucket.color.clone(),
        })
        .collect()
}

/// Progress projection: exactly one row per configured category, in the
/// input order, with spend looked up by name (0 when nothing matched).
pub fn budget_progress(categories: &[Category], spend: &[CategorySpend]) -> Vec<BudgetStatus> {
    categories
        .iter()
        .map(|category| {
            let spent = spend
                .iter()
                .find(|b| b.name == category.name)
                .map(|b| b.spent)
                .unwrap_or(Decimal::ZERO);
            let classification = classify(spent, category.monthly_budget);
            BudgetStatus {
                category_id: category.id,
                name: category.name.clone(),
                color: category.color.clone(),
                spent,
                budget: category.monthly_budget,
                tier: classification.tier,
                display_percentage: classification.display_percentage,
            }
        })
        .collect()
}
