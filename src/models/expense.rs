use rust_decimal::Decimal;

/// Category attributes carried on an expense row (resolved at fetch time).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: Option<i64>,
    /// Format: "YYYY-MM-DD"
    pub date: String,
    pub description: String,
    pub merchant: String,
    pub amount: Decimal,
    pub category: Option<CategoryRef>,
}

impl Expense {
    /// Text shown for this expense: description, falling back to merchant.
    pub fn display_label(&self) -> &str {
        if self.description.is_empty() {
            &self.merchant
        } else {
            &self.description
        }
    }

    /// Negative amounts are malformed and must not reach the totals.
    pub fn is_valid(&self) -> bool {
        self.amount >= Decimal::ZERO
    }
}
