#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{Category, CategoryRef, Expense};

fn make_expense(amount: Decimal, category: Option<(&str, &str)>) -> Expense {
    Expense {
        id: None,
        date: "2024-03-10".into(),
        description: "Test".into(),
        merchant: "Test Merchant".into(),
        amount,
        category: category.map(|(name, color)| CategoryRef {
            name: name.into(),
            color: color.into(),
        }),
    }
}

fn make_category(id: i64, name: &str, color: &str, budget: Decimal) -> Category {
    Category {
        id: Some(id),
        name: name.into(),
        color: color.into(),
        monthly_budget: budget,
    }
}

// ── spend_by_category ─────────────────────────────────────────

#[test]
fn test_grouping_by_name() {
    let expenses = vec![
        make_expense(dec!(10.00), Some(("Food", "#EF4444"))),
        make_expense(dec!(25.50), Some(("Food", "#EF4444"))),
        make_expense(dec!(5.00), Some(("Transit", "#3B82F6"))),
    ];
    let spend = spend_by_category(&expenses);
    assert_eq!(spend.len(), 2);
    assert_eq!(spend[0].name, "Food");
    assert_eq!(spend[0].spent, dec!(35.50));
    assert_eq!(spend[1].name, "Transit");
    assert_eq!(spend[1].spent, dec!(5.00));
}

#[test]
fn test_buckets_in_first_seen_order() {
    let expenses = vec![
        make_expense(dec!(1), Some(("B", "#222222"))),
        make_expense(dec!(1), Some(("A", "#111111"))),
        make_expense(dec!(1), Some(("B", "#222222"))),
    ];
    let spend = spend_by_category(&expenses);
    let names: Vec<&str> = spend.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A"]);
}

#[test]
fn test_bucket_color_first_write_wins() {
    let expenses = vec![
        make_expense(dec!(1), Some(("Food", "#EF4444"))),
        make_expense(dec!(1), Some(("Food", "#00FF00"))),
    ];
    let spend = spend_by_category(&expenses);
    assert_eq!(spend.len(), 1);
    assert_eq!(spend[0].color, "#EF4444");
}

#[test]
fn test_missing_category_falls_back_to_other() {
    let expenses = vec![make_expense(dec!(12.34), None)];
    let spend = spend_by_category(&expenses);
    assert_eq!(spend.len(), 1);
    assert_eq!(spend[0].name, FALLBACK_CATEGORY);
    assert_eq!(spend[0].color, FALLBACK_COLOR);
    assert_eq!(spend[0].color, "#6B7280");
    assert_eq!(spend[0].spent, dec!(12.34));
}

#[test]
fn test_category_names_are_case_sensitive() {
    let expenses = vec![
        make_expense(dec!(1), Some(("food", "#111111"))),
        make_expense(dec!(1), Some(("Food", "#222222"))),
    ];
    let spend = spend_by_category(&expenses);
    assert_eq!(spend.len(), 2);
}

#[test]
fn test_negative_amount_skipped() {
    let expenses = vec![
        make_expense(dec!(10.00), Some(("Food", "#EF4444"))),
        make_expense(dec!(-99.00), Some(("Food", "#EF4444"))),
    ];
    let spend = spend_by_category(&expenses);
    assert_eq!(spend.len(), 1);
    assert_eq!(spend[0].spent, dec!(10.00));
}

#[test]
fn test_negative_amount_never_opens_bucket() {
    let expenses = vec![make_expense(dec!(-1.00), Some(("Food", "#EF4444")))];
    assert!(spend_by_category(&expenses).is_empty());
}

#[test]
fn test_empty_expenses() {
    assert!(spend_by_category(&[]).is_empty());
}

// ── dashboard_totals ──────────────────────────────────────────

#[test]
fn test_totals_basic() {
    let expenses = vec![
        make_expense(dec!(10.00), Some(("Food", "#EF4444"))),
        make_expense(dec!(30.00), None),
    ];
    let categories = vec![
        make_category(1, "Food", "#EF4444", dec!(100)),
        make_category(2, "Transit", "#3B82F6", dec!(50)),
    ];
    let totals = dashboard_totals(&expenses, &categories);
    assert_eq!(totals.total_spent, dec!(40.00));
    assert_eq!(totals.transaction_count, 2);
    assert_eq!(totals.average_transaction, dec!(20.00));
    assert_eq!(totals.total_budget, dec!(150));
    assert_eq!(totals.budget_remaining, dec!(110.00));
}

#[test]
fn test_totals_empty_inputs() {
    let totals = dashboard_totals(&[], &[]);
    assert_eq!(totals.total_spent, Decimal::ZERO);
    assert_eq!(totals.transaction_count, 0);
    // Zero transactions must not divide by zero
    assert_eq!(totals.average_transaction, Decimal::ZERO);
    assert_eq!(totals.total_budget, Decimal::ZERO);
    assert_eq!(totals.budget_remaining, Decimal::ZERO);
}

#[test]
fn test_budget_remaining_can_go_negative() {
    let expenses = vec![make_expense(dec!(200), Some(("Food", "#EF4444")))];
    let categories = vec![make_category(1, "Food", "#EF4444", dec!(100))];
    let totals = dashboard_totals(&expenses, &categories);
    assert_eq!(totals.budget_remaining, dec!(-100));
}

#[test]
fn test_totals_skip_malformed_records() {
    let expenses = vec![
        make_expense(dec!(10.00), None),
        make_expense(dec!(-5.00), None),
    ];
    let totals = dashboard_totals(&expenses, &[]);
    assert_eq!(totals.total_spent, dec!(10.00));
    assert_eq!(totals.transaction_count, 1);
    assert_eq!(totals.average_transaction, dec!(10.00));
}

#[test]
fn test_sum_invariant() {
    // Every dollar counted exactly once, in exactly one bucket
    let expenses = vec![
        make_expense(dec!(12.34), Some(("Food", "#EF4444"))),
        make_expense(dec!(0.01), Some(("Food", "#EF4444"))),
        make_expense(dec!(99.99), Some(("Transit", "#3B82F6"))),
        make_expense(dec!(7.00), None),
        make_expense(dec!(-3.00), None),
    ];
    let spend = spend_by_category(&expenses);
    let totals = dashboard_totals(&expenses, &[]);
    let bucket_sum: Decimal = spend.iter().map(|b| b.spent).sum();
    assert_eq!(bucket_sum, totals.total_spent);
}

// ── classify ──────────────────────────────────────────────────

#[test]
fn test_classify_no_budget() {
    let c = classify(dec!(50), Decimal::ZERO);
    assert_eq!(c.tier, BudgetTier::NoBudget);
    assert!(c.display_percentage.is_none());
}

#[test]
fn test_classify_on_track_below_boundary() {
    let c = classify(dec!(79.99), dec!(100));
    assert_eq!(c.tier, BudgetTier::OnTrack);
    assert_eq!(c.display_percentage, Some(dec!(79.99)));
}

#[test]
fn test_classify_near_limit_at_boundary() {
    let c = classify(dec!(80), dec!(100));
    assert_eq!(c.tier, BudgetTier::NearLimit);
    assert_eq!(c.display_percentage, Some(dec!(80)));
}

#[test]
fn test_classify_over_budget_at_boundary() {
    let c = classify(dec!(100), dec!(100));
    assert_eq!(c.tier, BudgetTier::OverBudget);
    assert_eq!(c.display_percentage, Some(dec!(100)));
}

#[test]
fn test_classify_display_capped_at_150() {
    let c = classify(dec!(300), dec!(100));
    assert_eq!(c.tier, BudgetTier::OverBudget);
    // Capped for rendering, but still over-budget
    assert_eq!(c.display_percentage, Some(dec!(150)));
}

#[test]
fn test_classify_cap_never_changes_tier() {
    let c = classify(dec!(150), dec!(100));
    assert_eq!(c.tier, BudgetTier::OverBudget);
    assert_eq!(c.display_percentage, Some(dec!(150)));
}

#[test]
fn test_classify_zero_spent() {
    let c = classify(Decimal::ZERO, dec!(100));
    assert_eq!(c.tier, BudgetTier::OnTrack);
    assert_eq!(c.display_percentage, Some(Decimal::ZERO));
}

#[test]
fn test_classify_fractional_budget() {
    let c = classify(dec!(1), dec!(3));
    assert_eq!(c.tier, BudgetTier::OnTrack);
    let pct = c.display_percentage.unwrap();
    assert!(pct > dec!(33.3) && pct < dec!(33.4));
}

#[test]
fn test_classify_is_idempotent() {
    let a = classify(dec!(85), dec!(100));
    let b = classify(dec!(85), dec!(100));
    assert_eq!(a, b);
}

#[test]
fn test_tier_labels() {
    assert_eq!(BudgetTier::OnTrack.label(), "On track");
    assert_eq!(BudgetTier::NearLimit.label(), "Near limit");
    assert_eq!(BudgetTier::OverBudget.label(), "Over budget");
    assert_eq!(BudgetTier::NoBudget.label(), "No budget set");
}

// ── Stat card variants ────────────────────────────────────────

fn totals_with(spent: Decimal, budget: Decimal) -> DashboardTotals {
    DashboardTotals {
        total_spent: spent,
        transaction_count: 1,
        average_transaction: spent,
        total_budget: budget,
        budget_remaining: budget - spent,
    }
}

#[test]
fn test_spent_variant() {
    assert_eq!(
        spent_variant(&totals_with(dec!(50), dec!(100))),
        StatVariant::Default
    );
    assert_eq!(
        spent_variant(&totals_with(dec!(100), dec!(100))),
        StatVariant::Default
    );
    assert_eq!(
        spent_variant(&totals_with(dec!(100.01), dec!(100))),
        StatVariant::Danger
    );
}

#[test]
fn test_remaining_variant_danger_when_negative() {
    assert_eq!(
        remaining_variant(&totals_with(dec!(150), dec!(100))),
        StatVariant::Danger
    );
}

#[test]
fn test_remaining_variant_warning_below_twenty_percent() {
    // remaining = 15 < 100 * 0.2
    assert_eq!(
        remaining_variant(&totals_with(dec!(85), dec!(100))),
        StatVariant::Warning
    );
}

#[test]
fn test_remaining_variant_success_at_twenty_percent() {
    // remaining = 20, strictly-less-than comparison
    assert_eq!(
        remaining_variant(&totals_with(dec!(80), dec!(100))),
        StatVariant::Success
    );
}

#[test]
fn test_remaining_variant_no_budget_at_all() {
    // 0 remaining of 0 budget: neither negative nor below the threshold
    assert_eq!(
        remaining_variant(&totals_with(Decimal::ZERO, Decimal::ZERO)),
        StatVariant::Success
    );
}

// ── Projections ───────────────────────────────────────────────

#[test]
fn test_chart_one_slice_per_bucket() {
    let expenses = vec![
        make_expense(dec!(10), Some(("Food", "#EF4444"))),
        make_expense(dec!(20), Some(("Transit", "#3B82F6"))),
        make_expense(dec!(5), Some(("Food", "#EF4444"))),
    ];
    let chart = chart_data(&spend_by_category(&expenses));
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0].name, "Food");
    assert_eq!(chart[0].value, dec!(15));
    assert_eq!(chart[0].color, "#EF4444");
}

#[test]
fn test_chart_sparsity() {
    // A configured category with zero expenses does not appear in the chart
    let expenses = vec![make_expense(dec!(10), Some(("Food", "#EF4444")))];
    let chart = chart_data(&spend_by_category(&expenses));
    assert!(!chart.iter().any(|s| s.name == "Travel"));
    assert_eq!(chart.len(), 1);
}

#[test]
fn test_progress_completeness() {
    // One row per configured category, even with no spend
    let expenses = vec![make_expense(dec!(10), Some(("Food", "#EF4444")))];
    let categories = vec![
        make_category(1, "Food", "#EF4444", dec!(100)),
        make_category(2, "Travel", "#6366F1", dec!(300)),
    ];
    let progress = budget_progress(&categories, &spend_by_category(&expenses));
    assert_eq!(progress.len(), 2);

    let travel = &progress[1];
    assert_eq!(travel.name, "Travel");
    assert_eq!(travel.spent, Decimal::ZERO);
    assert_eq!(travel.budget, dec!(300));
    assert_eq!(travel.tier, BudgetTier::OnTrack);
}

#[test]
fn test_progress_preserves_category_order() {
    let categories = vec![
        make_category(3, "Zebra", "#111111", dec!(10)),
        make_category(1, "Apple", "#222222", dec!(10)),
        make_category(2, "Mango", "#333333", dec!(10)),
    ];
    let progress = budget_progress(&categories, &[]);
    let names: Vec<&str> = progress.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Zebra", "Apple", "Mango"]);
}

#[test]
fn test_progress_attaches_classification() {
    let expenses = vec![make_expense(dec!(90), Some(("Food", "#EF4444")))];
    let categories = vec![make_category(1, "Food", "#EF4444", dec!(100))];
    let progress = budget_progress(&categories, &spend_by_category(&expenses));
    assert_eq!(progress[0].tier, BudgetTier::NearLimit);
    assert_eq!(progress[0].display_percentage, Some(dec!(90)));
    assert_eq!(progress[0].category_id, Some(1));
}

#[test]
fn test_progress_no_budget_category() {
    let categories = vec![make_category(1, "Misc", "#999999", Decimal::ZERO)];
    let progress = budget_progress(&categories, &[]);
    assert_eq!(progress[0].tier, BudgetTier::NoBudget);
    assert!(progress[0].display_percentage.is_none());
}

// ── MonthlyReport ─────────────────────────────────────────────

#[test]
fn test_report_build_ties_everything_together() {
    let expenses = vec![
        make_expense(dec!(30), Some(("Food", "#EF4444"))),
        make_expense(dec!(70), None),
    ];
    let categories = vec![make_category(1, "Food", "#EF4444", dec!(50))];

    let report = MonthlyReport::build(&expenses, &categories);
    assert_eq!(report.totals.total_spent, dec!(100));
    assert_eq!(report.spend.len(), 2);
    assert_eq!(report.chart.len(), 2);
    assert_eq!(report.progress.len(), 1);
    assert_eq!(report.progress[0].tier, BudgetTier::OnTrack);
}

#[test]
fn test_report_build_is_idempotent() {
    let expenses = vec![
        make_expense(dec!(40), Some(("Food", "#EF4444"))),
        make_expense(dec!(60), None),
        make_expense(dec!(12.50), Some(("Transit", "#3B82F6"))),
    ];
    let categories = vec![
        make_category(1, "Food", "#EF4444", dec!(50)),
        make_category(2, "Transit", "#3B82F6", Decimal::ZERO),
    ];

    let first = MonthlyReport::build(&expenses, &categories);
    let second = MonthlyReport::build(&expenses, &categories);
    assert_eq!(first, second);
}

#[test]
fn test_report_build_empty_snapshot() {
    let report = MonthlyReport::build(&[], &[]);
    assert_eq!(report, MonthlyReport::default());
}
