use rust_decimal::Decimal;

use super::DashboardTotals;

/// Per-category budget health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    OnTrack,
    NearLimit,
    OverBudget,
    NoBudget,
}

impl BudgetTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "On track",
            Self::NearLimit => "Near limit",
            Self::OverBudget => "Over budget",
            Self::NoBudget => "No budget set",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: BudgetTier,
    /// Spent/budget ratio as a percentage, capped at 150 for bounded
    /// progress-bar rendering. None when no budget is configured. The cap is
    /// purely visual and never feeds back into the tier.
    pub display_percentage: Option<Decimal>,
}

/// Classify spending against a budget. Thresholds: 80% and 100%, checked in
/// that order after the zero-budget guard.
pub fn classify(spent: Decimal, budget: Decimal) -> Classification {
    if budget <= Decimal::ZERO {
        return Classification {
            tier: BudgetTier::NoBudget,
            display_percentage: None,
        };
    }

    let raw = spent / budget * Decimal::ONE_HUNDRED;

    if raw >= Decimal::ONE_HUNDRED {
        Classification {
            tier: BudgetTier::OverBudget,
            display_percentage: Some(raw.min(Decimal::from(150))),
        }
    } else if raw >= Decimal::from(80) {
        Classification {
            tier: BudgetTier::NearLimit,
            display_percentage: Some(raw),
        }
    } else {
        Classification {
            tier: BudgetTier::OnTrack,
            display_percentage: Some(raw),
        }
    }
}

/// Severity coloring for the top-level stat cards. Distinct thresholds and
/// vocabulary from the per-category tier; keep them separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatVariant {
    Default,
    Success,
    Warning,
    Danger,
}

pub fn spent_variant(totals: &DashboardTotals) -> StatVariant {
    if totals.total_spent > totals.total_budget {
        StatVariant::Danger
    } else {
        StatVariant::Default
    }
}

pub fn remaining_variant(totals: &DashboardTotals) -> StatVariant {
    if totals.budget_remaining < Decimal::ZERO {
        StatVariant::Danger
    } else if totals.budget_remaining < totals.total_budget * Decimal::new(2, 1) {
        StatVariant::Warning
    } else {
        StatVariant::Success
    }
}
