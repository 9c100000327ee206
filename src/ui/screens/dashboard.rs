use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::report::{remaining_variant, spent_variant};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, parse_hex_color, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Chart + budget progress
            Constraint::Length(8), // Recent expenses
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_spending_chart(f, middle[0], app);
    render_budget_progress(f, middle[1], app);
    render_recent_expenses(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let totals = &app.report.totals;

    render_card(
        f,
        cards[0],
        "Total Spent",
        format_amount(totals.total_spent),
        theme::variant_color(spent_variant(totals)),
        None,
    );
    render_card(
        f,
        cards[1],
        "Transactions",
        format!("{}", totals.transaction_count),
        theme::TEXT,
        None,
    );
    render_card(
        f,
        cards[2],
        "Avg / Transaction",
        format_amount(totals.average_transaction),
        theme::TEXT,
        None,
    );
    render_card(
        f,
        cards[3],
        "Budget Remaining",
        format_amount(totals.budget_remaining),
        theme::variant_color(remaining_variant(totals)),
        Some(format!("of {} budgeted", format_amount(totals.total_budget))),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    if app.report.chart.is_empty() {
        let block = chart_block();
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses for this month. Add one with :add",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .report
        .chart
        .iter()
        .take(12)
        .map(|slice| {
            let val = slice.value.to_u64().unwrap_or(0);
            let color = parse_hex_color(&slice.color).unwrap_or(theme::ACCENT);
            let label = truncate(&slice.name, 10);
            Bar::default()
                .value(val)
                .label(Line::from(label))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block())
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn chart_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Spending by Category ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_budget_progress(f: &mut Frame, area: Rect, app: &App) {
    if app.report.progress.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No categories yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Create one with :category <name> [#RRGGBB]",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(progress_block());
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .report
        .progress
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|status| {
            let color = theme::tier_color(status.tier);
            let display_name = truncate(&status.name, 13);

            let (bar, pct_text) = match status.display_percentage {
                Some(pct) => {
                    let ratio = (pct.to_f64().unwrap_or(0.0) / 100.0).min(1.0);
                    (create_progress_bar(ratio, 16), format!("{pct:.0}%"))
                }
                None => (create_progress_bar(0.0, 16), "--".to_string()),
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{display_name:<14}"), theme::normal_style()),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_amount(status.spent),
                        if status.budget > Decimal::ZERO {
                            format_amount(status.budget)
                        } else {
                            "--".to_string()
                        }
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {pct_text:>4} "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(status.tier.label(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items).block(progress_block());
    f.render_widget(list, area);
}

fn progress_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Budget Progress ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_recent_expenses(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Recent Expenses ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.expenses.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Nothing recorded this month",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Expenses arrive newest-first, so the top of the list is the latest
    let items: Vec<ListItem> = app
        .expenses
        .iter()
        .take(5)
        .map(|expense| {
            let (dot_color, cat_name) = match &expense.category {
                Some(cat) => (
                    parse_hex_color(&cat.color).unwrap_or(theme::TEXT_DIM),
                    cat.name.as_str(),
                ),
                None => (theme::TEXT_DIM, "Uncategorized"),
            };

            ListItem::new(Line::from(vec![
                Span::styled("\u{25cf} ", Style::default().fg(dot_color)),
                Span::styled(format!("{} ", expense.date), theme::dim_style()),
                Span::styled(
                    format!("{:<30}", truncate(expense.display_label(), 29)),
                    theme::normal_style(),
                ),
                Span::styled(format!("{cat_name:<18}"), theme::dim_style()),
                Span::styled(format_amount(expense.amount), theme::normal_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn create_progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
