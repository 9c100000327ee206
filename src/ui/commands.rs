use std::collections::HashMap;
use std::str::FromStr;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use super::app::{App, InputMode, PendingAction, Screen};
use super::util::shift_month;
use crate::db::Database;
use crate::models::{Category, Expense};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendTUI", cmd_quit, r);
    register_command!("quit", "Quit SpendTUI", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("e", "Go to Expenses", cmd_expenses, r);
    register_command!("expenses", "Go to Expenses", cmd_expenses, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2024-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 2024-01-15 Coffee 4.50 @Food & Dining)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :a 2024-01-15 Coffee 4.50)",
        cmd_add,
        r
    );
    register_command!(
        "category",
        "Create category (e.g. :category Subscriptions #0EA5E9)",
        cmd_category,
        r
    );
    register_command!(
        "budget",
        "Set monthly budget (e.g. :budget Food & Dining 500)",
        cmd_budget,
        r
    );
    register_command!("b", "Set monthly budget", cmd_budget, r);
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!(
        "delete-category",
        "Delete selected category",
        cmd_delete_category,
        r
    );
    register_command!(
        "export",
        "Export expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!("refresh", "Reload data and rebuild report", cmd_refresh, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh(db)?;
    Ok(())
}

fn cmd_expenses(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Expenses;
    app.refresh(db)?;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh(db)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :month YYYY-MM (e.g. :month 2024-01)");
        return Ok(());
    }

    match super::util::normalize_month(args, &app.current_month) {
        Some(m) => {
            app.set_status(format!("Switched to month: {m}"));
            app.set_month(m, db)?;
        }
        None => app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-01)"),
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, db, 1)
}

fn cmd_prev_month(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    advance_month(app, db, -1)
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(
            "Usage: :add <date> <description> <amount> [@category]. Example: :add 2024-01-15 Coffee 4.50 @Food & Dining",
        );
        return Ok(());
    }

    // Optional trailing "@Category Name" picks the category
    let (body, category_name) = match args.split_once(" @") {
        Some((body, cat)) => (body.trim(), Some(cat.trim())),
        None => (args, None),
    };

    let parts: Vec<&str> = body.splitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :add <date> <description> <amount> [@category]");
        return Ok(());
    }
    let date = parts[0];

    // Last token of the remainder is the amount, everything before is the description
    let rest: Vec<&str> = parts[1].rsplitn(2, ' ').collect();
    if rest.len() < 2 {
        app.set_status("Usage: :add <date> <description> <amount> [@category]");
        return Ok(());
    }
    let amount_str = rest[0];
    let description = rest[1];

    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        app.set_status(format!("Invalid date: {date}. Use YYYY-MM-DD"));
        return Ok(());
    }

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };
    if amount < Decimal::ZERO {
        app.set_status("Amount must not be negative");
        return Ok(());
    }

    let category_id = match category_name {
        Some(name) => {
            let categories = db.get_categories()?;
            match Category::find_by_name(&categories, name) {
                Some(cat) => cat.id,
                None => {
                    app.set_status(format!("Category '{name}' not found"));
                    return Ok(());
                }
            }
        }
        None => None,
    };

    let expense = Expense {
        id: None,
        date: date.to_string(),
        description: description.to_string(),
        merchant: String::new(),
        amount,
        category: None,
    };
    db.insert_expense(&expense, category_id)?;
    app.refresh(db)?;
    app.set_status(format!("Added expense: {description} ${amount}"));
    Ok(())
}

fn cmd_category(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :category <name> [#RRGGBB]");
        return Ok(());
    }

    // Trailing hex token sets the color, otherwise fall back to the default gray
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    let (name, color) = if parts.len() == 2 && super::util::parse_hex_color(parts[0]).is_some() {
        (parts[1].to_string(), parts[0].to_string())
    } else {
        (args.to_string(), crate::report::FALLBACK_COLOR.to_string())
    };

    let cat = Category::new(name.clone(), color);
    db.insert_category(&cat)?;
    app.refresh(db)?;
    app.set_status(format!("Created category: {name}"));
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(
            "Usage: :budget <category_name> <amount>. Example: :budget Food & Dining 500",
        );
        return Ok(());
    }

    // Last token is the amount, everything before is the category name
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category_name> <amount>");
        return Ok(());
    }

    let amount_str = parts[0];
    let category_name = parts[1];

    let amount = match Decimal::from_str(amount_str) {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Invalid amount: {amount_str}"));
            return Ok(());
        }
    };

    let categories = db.get_categories()?;
    if let Some(cat) = Category::find_by_name(&categories, category_name) {
        let cat_id = match cat.id {
            Some(id) => id,
            None => {
                app.set_status("Category has no ID (this shouldn't happen)");
                return Ok(());
            }
        };
        db.set_monthly_budget(cat_id, amount)?;
        app.refresh(db)?;
        app.screen = Screen::Categories;
        app.set_status(format!("Budget set: {} = ${amount}/month", cat.name));
    } else {
        app.set_status(format!("Category '{category_name}' not found"));
    }

    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Expenses || app.expenses.is_empty() {
        app.set_status("Navigate to Expenses and select one first");
        return Ok(());
    }

    if let Some(expense) = app.expenses.get(app.expense_index) {
        if let Some(id) = expense.id {
            let label = expense.display_label().to_string();
            app.confirm_message = format!("Delete '{label}'?");
            app.pending_action = Some(PendingAction::DeleteExpense { id, label });
            app.input_mode = InputMode::Confirm;
        }
    }

    Ok(())
}

fn cmd_delete_category(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Categories || app.categories.is_empty() {
        app.set_status("Navigate to Categories and select one first");
        return Ok(());
    }

    if let Some(cat) = app.categories.get(app.category_index) {
        if let Some(id) = cat.id {
            let name = cat.name.clone();
            app.confirm_message = format!("Delete category '{name}'? Its expenses stay, uncategorized");
            app.pending_action = Some(PendingAction::DeleteCategory { id, name });
            app.input_mode = InputMode::Confirm;
        }
    }

    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/spendtui-export-{}.csv", app.current_month)
    } else {
        crate::run::shellexpand(args)
    };

    let count = db.export_to_csv(&path, Some(&app.current_month))?;
    if count == 0 {
        app.set_status("No expenses to export");
    } else {
        app.set_status(format!("Exported {count} expenses to {path}"));
    }
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.refresh(db)?;
    app.set_status("Refreshed");
    Ok(())
}

fn advance_month(app: &mut App, db: &mut Database, delta: i32) -> anyhow::Result<()> {
    if let Some(m) = shift_month(&app.current_month, delta) {
        app.set_status(format!("Month: {m}"));
        app.set_month(m, db)?;
    }
    Ok(())
}
