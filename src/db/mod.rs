mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_default_categories()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_default_categories()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn seed_default_categories(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }

        let defaults = [
            ("Bills & Utilities", "#10B981"),
            ("Entertainment", "#8B5CF6"),
            ("Food & Dining", "#EF4444"),
            ("Groceries", "#F59E0B"),
            ("Health", "#14B8A6"),
            ("Shopping", "#EC4899"),
            ("Transportation", "#3B82F6"),
            ("Travel", "#6366F1"),
        ];

        let tx = self.conn.transaction()?;
        for (name, color) in &defaults {
            tx.execute(
                "INSERT OR IGNORE INTO categories (name, color, monthly_budget) VALUES (?1, ?2, '0')",
                params![name, color],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Expenses ──────────────────────────────────────────────

    pub(crate) fn insert_expense(&self, expense: &Expense, category_id: Option<i64>) -> Result<i64> {
        if expense.amount < Decimal::ZERO {
            anyhow::bail!("Expense amount must be non-negative: {}", expense.amount);
        }
        self.conn.execute(
            "INSERT INTO expenses (date, description, merchant, amount, category_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                expense.date,
                expense.description,
                expense.merchant,
                expense.amount.to_string(),
                category_id,
                chrono::Local::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Expenses for one month with category name/color resolved, newest first.
    /// The date-descending order is a contract the dashboard relies on.
    pub(crate) fn get_expenses(&self, month: Option<&str>) -> Result<Vec<Expense>> {
        let mut sql = String::from(
            "SELECT e.id, e.date, e.description, e.merchant, e.amount, c.name, c.color
             FROM expenses e LEFT JOIN categories c ON e.category_id = c.id
             WHERE 1=1",
        );
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(m) = month {
            sql.push_str(&format!(" AND e.date LIKE ?{}", param_values.len() + 1));
            param_values.push(Box::new(format!("{m}%")));
        }

        sql.push_str(" ORDER BY e.date DESC, e.id DESC");

        let params_ref: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_ref.as_slice(), |row| {
            let amount_str: String = row.get(4)?;
            let cat_name: Option<String> = row.get(5)?;
            let cat_color: Option<String> = row.get(6)?;
            Ok(Expense {
                id: Some(row.get(0)?),
                date: row.get(1)?,
                description: row.get(2)?,
                merchant: row.get(3)?,
                amount: Decimal::from_str(&amount_str).unwrap_or_default(),
                category: cat_name.map(|name| CategoryRef {
                    name,
                    color: cat_color.unwrap_or_default(),
                }),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_expense_count(&self, month: Option<&str>) -> Result<i64> {
        match month {
            Some(m) => Ok(self.conn.query_row(
                "SELECT COUNT(*) FROM expenses WHERE date LIKE ?1",
                params![format!("{m}%")],
                |row| row.get(0),
            )?),
            None => Ok(self
                .conn
                .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?),
        }
    }

    pub(crate) fn delete_expense(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Categories ────────────────────────────────────────────

    pub(crate) fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, monthly_budget FROM categories ORDER BY name")?;
        let rows = stmt.query_map([], |row| {
            let budget_str: String = row.get(3)?;
            Ok(Category {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                color: row.get(2)?,
                monthly_budget: Decimal::from_str(&budget_str).unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_category(&self, cat: &Category) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO categories (name, color, monthly_budget) VALUES (?1, ?2, ?3)",
            params![cat.name, cat.color, cat.monthly_budget.to_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn set_monthly_budget(&self, category_id: i64, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            anyhow::bail!("Budget amount must be non-negative: {amount}");
        }
        let changed = self.conn.execute(
            "UPDATE categories SET monthly_budget = ?1 WHERE id = ?2",
            params![amount.to_string(), category_id],
        )?;
        if changed == 0 {
            anyhow::bail!("No category with id {category_id}");
        }
        Ok(())
    }

    pub(crate) fn delete_category(&self, id: i64) -> Result<()> {
        // Expenses keep their rows; they fall back to the "Other" bucket
        self.conn.execute(
            "UPDATE expenses SET category_id = NULL WHERE category_id = ?1",
            params![id],
        )?;
        self.conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Export ────────────────────────────────────────────────

    pub(crate) fn export_to_csv(&self, path: &str, month: Option<&str>) -> Result<usize> {
        let expenses = self.get_expenses(month)?;
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {path}"))?;

        writer.write_record(["date", "description", "merchant", "amount", "category"])?;
        for e in &expenses {
            writer.write_record([
                e.date.as_str(),
                e.description.as_str(),
                e.merchant.as_str(),
                &e.amount.to_string(),
                e.category.as_ref().map(|c| c.name.as_str()).unwrap_or(""),
            ])?;
        }
        writer.flush()?;
        Ok(expenses.len())
    }
}
