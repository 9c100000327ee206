use std::str::FromStr;

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{Category, Expense};
use crate::report::MonthlyReport;

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], db),
        "add" => cli_add(&args[2..], db),
        "categories" => cli_categories(db),
        "budget" => cli_budget(&args[2..], db),
        "export" => cli_export(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendTUI — local-only expense dashboard");
    println!();
    println!("Usage: spendtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM]             Print monthly spending summary");
    println!("  add <date> <desc> <amount>    Record an expense (append @<category> to file it)");
    println!("  categories                    List categories with budgets");
    println!("  budget <category> <amount>    Set a category's monthly budget");
    println!("  export [path]                 Export expenses to CSV");
    println!("    --month <YYYY-MM>           Month to export (default: current)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let month = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());

    let expenses = db.get_expenses(Some(&month))?;
    let categories = db.get_categories()?;
    let report = MonthlyReport::build(&expenses, &categories);

    println!("SpendTUI — {month}");
    println!("{}", "─".repeat(44));
    println!("  Total Spent:      ${:.2}", report.totals.total_spent);
    println!("  Transactions:     {}", report.totals.transaction_count);
    println!("  Avg/Transaction:  ${:.2}", report.totals.average_transaction);
    println!("  Total Budget:     ${:.2}", report.totals.total_budget);
    println!("  Remaining:        ${:.2}", report.totals.budget_remaining);

    if !report.chart.is_empty() {
        println!();
        println!("Spending by Category:");
        for slice in &report.chart {
            println!("  {:<24} ${:.2}", slice.name, slice.value);
        }
    }

    if !report.progress.is_empty() {
        println!();
        println!("Budget Progress:");
        for status in &report.progress {
            let pct = match status.display_percentage {
                Some(p) => format!("{p:.0}%"),
                None => "--".to_string(),
            };
            let bar = match status.display_percentage {
                Some(p) => text_bar(p.to_f64().unwrap_or(0.0) / 100.0, 20),
                None => text_bar(0.0, 20),
            };
            println!(
                "  {:<24} {bar} {pct:>4}  {}",
                status.name,
                status.tier.label()
            );
        }
    }

    Ok(())
}

fn cli_add(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 3 {
        anyhow::bail!("Usage: spendtui add <date> <description> <amount> [@category]");
    }

    let date = &args[0];
    if chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        anyhow::bail!("Invalid date: {date}. Use YYYY-MM-DD");
    }

    // Optional trailing "@Category Name" (may span several argv tokens)
    let rest = args[1..].join(" ");
    let (body, category_name) = match rest.split_once(" @") {
        Some((body, cat)) => (body.trim().to_string(), Some(cat.trim().to_string())),
        None => (rest, None),
    };

    let parts: Vec<&str> = body.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        anyhow::bail!("Usage: spendtui add <date> <description> <amount> [@category]");
    }
    let amount = Decimal::from_str(parts[0])
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", parts[0]))?;
    let description = parts[1];

    let category_id = match category_name {
        Some(ref name) => {
            let categories = db.get_categories()?;
            Some(
                Category::find_by_name(&categories, name)
                    .and_then(|c| c.id)
                    .ok_or_else(|| anyhow::anyhow!("Category '{name}' not found"))?,
            )
        }
        None => None,
    };

    let expense = Expense {
        id: None,
        date: date.clone(),
        description: description.to_string(),
        merchant: String::new(),
        amount,
        category: None,
    };
    db.insert_expense(&expense, category_id)?;
    println!("Added expense: {description} ${amount} on {date}");
    Ok(())
}

fn cli_categories(db: &mut Database) -> Result<()> {
    let categories = db.get_categories()?;
    if categories.is_empty() {
        println!("No categories");
        return Ok(());
    }

    println!("{:<4} {:<24} {:<10} Monthly Budget", "ID", "Name", "Color");
    println!("{}", "─".repeat(56));
    for cat in &categories {
        let budget = if cat.monthly_budget > Decimal::ZERO {
            format!("${:.2}", cat.monthly_budget)
        } else {
            "—".to_string()
        };
        println!(
            "{:<4} {:<24} {:<10} {budget}",
            cat.id.unwrap_or(0),
            cat.name,
            cat.color,
        );
    }
    Ok(())
}

fn cli_budget(args: &[String], db: &mut Database) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: spendtui budget <category_name> <amount>");
    }

    // Last token is the amount, everything before is the category name
    let joined = args.join(" ");
    let parts: Vec<&str> = joined.rsplitn(2, ' ').collect();
    let amount = Decimal::from_str(parts[0])
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", parts[0]))?;
    let name = parts[1];

    let categories = db.get_categories()?;
    let cat = Category::find_by_name(&categories, name)
        .ok_or_else(|| anyhow::anyhow!("Category '{name}' not found"))?;
    let cat_id = cat
        .id
        .ok_or_else(|| anyhow::anyhow!("Category has no ID"))?;

    db.set_monthly_budget(cat_id, amount)?;
    println!("Budget set: {} = ${amount}/month", cat.name);
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| chrono::Local::now().format("%Y-%m").to_string());

    // Output path is the first non-flag argument
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/spendtui-export-{month}.csv")
        });

    let count = db.export_to_csv(&output_path, Some(&month))?;
    if count == 0 {
        println!("No expenses for {month}");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

fn text_bar(ratio: f64, width: usize) -> String {
    let clamped = ratio.clamp(0.0, 1.0);
    let filled = (clamped * width as f64) as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
