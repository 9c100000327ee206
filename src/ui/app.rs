use anyhow::Result;
use chrono::Local;

use crate::db::Database;
use crate::models::{Category, Expense};
use crate::report::MonthlyReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Categories,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Expenses, Self::Categories]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Categories => write!(f, "Categories"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteExpense { id: i64, label: String },
    DeleteCategory { id: i64, name: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    /// Format: "YYYY-MM"
    pub(crate) current_month: String,

    // Dashboard snapshot + derived report, rebuilt together
    pub(crate) expenses: Vec<Expense>,
    pub(crate) categories: Vec<Category>,
    pub(crate) report: MonthlyReport,

    // List cursors
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let current_month = Local::now().format("%Y-%m").to_string();

        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            current_month,

            expenses: Vec::new(),
            categories: Vec::new(),
            report: MonthlyReport::default(),

            expense_index: 0,
            expense_scroll: 0,
            category_index: 0,
            category_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Pull a fresh `(expenses, categories)` snapshot for the current month
    /// and rebuild the whole report from it. The previous report is fully
    /// superseded.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.expenses = db.get_expenses(Some(&self.current_month))?;
        self.categories = db.get_categories()?;
        self.report = MonthlyReport::build(&self.expenses, &self.categories);

        if self.expense_index >= self.expenses.len() {
            self.expense_index = self.expenses.len().saturating_sub(1);
            self.expense_scroll = self.expense_scroll.min(self.expense_index);
        }
        if self.category_index >= self.categories.len() {
            self.category_index = self.categories.len().saturating_sub(1);
            self.category_scroll = self.category_scroll.min(self.category_index);
        }
        Ok(())
    }

    pub(crate) fn set_month(&mut self, month: String, db: &Database) -> Result<()> {
        self.current_month = month;
        self.expense_index = 0;
        self.expense_scroll = 0;
        self.refresh(db)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
