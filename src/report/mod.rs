//! Budget aggregation and classification for a single reporting month.
//!
//! Everything here is pure computation over an in-memory snapshot of
//! `(expenses, categories)`. The caller rebuilds the whole report whenever a
//! new snapshot arrives; nothing is cached between invocations.

mod aggregate;
mod classify;
mod project;

pub use aggregate::{
    dashboard_totals, spend_by_category, CategorySpend, DashboardTotals, FALLBACK_CATEGORY,
    FALLBACK_COLOR,
};
pub use classify::{classify, remaining_variant, spent_variant, BudgetTier, Classification, StatVariant};
pub use project::{budget_progress, chart_data, BudgetStatus, ChartSlice};

use crate::models::{Category, Expense};

/// All derived dashboard data for one month, recomputed from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthlyReport {
    pub totals: DashboardTotals,
    pub spend: Vec<CategorySpend>,
    pub chart: Vec<ChartSlice>,
    pub progress: Vec<BudgetStatus>,
}

impl MonthlyReport {
    pub fn build(expenses: &[Expense], categories: &[Category]) -> Self {
        let spend = spend_by_category(expenses);
        let totals = dashboard_totals(expenses, categories);
        let chart = chart_data(&spend);
        let progress = budget_progress(categories, &spend);
        Self {
            totals,
            spend,
            chart,
            progress,
        }
    }
}

#[cfg(test)]
mod tests;
