#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Expense ───────────────────────────────────────────────────

fn make_expense(description: &str, merchant: &str) -> Expense {
    Expense {
        id: None,
        date: "2024-03-15".into(),
        description: description.into(),
        merchant: merchant.into(),
        amount: dec!(12.50),
        category: None,
    }
}

#[test]
fn test_display_label_prefers_description() {
    let e = make_expense("Lunch", "Cafe Rio");
    assert_eq!(e.display_label(), "Lunch");
}

#[test]
fn test_display_label_falls_back_to_merchant() {
    let e = make_expense("", "Cafe Rio");
    assert_eq!(e.display_label(), "Cafe Rio");
}

#[test]
fn test_display_label_both_empty() {
    let e = make_expense("", "");
    assert_eq!(e.display_label(), "");
}

#[test]
fn test_is_valid() {
    let mut e = make_expense("Lunch", "");
    assert!(e.is_valid());
    e.amount = Decimal::ZERO;
    assert!(e.is_valid());
    e.amount = dec!(-0.01);
    assert!(!e.is_valid());
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_new_defaults() {
    let cat = Category::new("Food".into(), "#EF4444".into());
    assert!(cat.id.is_none());
    assert_eq!(cat.name, "Food");
    assert_eq!(cat.color, "#EF4444");
    assert_eq!(cat.monthly_budget, Decimal::ZERO);
}

#[test]
fn test_category_display() {
    let cat = Category::new("Groceries".into(), String::new());
    assert_eq!(format!("{cat}"), "Groceries");
}

#[test]
fn test_category_find_by_name_case_insensitive() {
    let cats = vec![
        Category::new("Food".into(), String::new()),
        Category::new("Travel".into(), String::new()),
    ];
    assert!(Category::find_by_name(&cats, "food").is_some());
    assert!(Category::find_by_name(&cats, "TRAVEL").is_some());
    assert!(Category::find_by_name(&cats, "Rent").is_none());
}

#[test]
fn test_category_find_by_id() {
    let mut cat = Category::new("Food".into(), String::new());
    cat.id = Some(7);
    let cats = vec![cat];
    assert!(Category::find_by_id(&cats, 7).is_some());
    assert!(Category::find_by_id(&cats, 8).is_none());
}
