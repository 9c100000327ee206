use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, parse_hex_color, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.categories.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No categories yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Create one with :category <name> [#RRGGBB]",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Categories (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["", "Name", "Monthly Budget", "Spent", "Status"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, cat)| {
            // Progress rows are keyed by name, one per configured category
            let status = app.report.progress.iter().find(|s| s.name == cat.name);
            let spent = status.map(|s| s.spent).unwrap_or(Decimal::ZERO);

            let (tier_text, tier_fg) = match status {
                Some(s) => (s.tier.label(), theme::tier_color(s.tier)),
                None => ("", theme::TEXT_DIM),
            };

            let swatch_color = parse_hex_color(&cat.color).unwrap_or(theme::TEXT_DIM);

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let budget_text = if cat.monthly_budget > Decimal::ZERO {
                format_amount(cat.monthly_budget)
            } else {
                "\u{2014}".to_string()
            };

            Row::new(vec![
                Cell::from(Span::styled("\u{25cf}", Style::default().fg(swatch_color))),
                Cell::from(truncate(&cat.name, 24)),
                Cell::from(budget_text),
                Cell::from(format_amount(spent)),
                Cell::from(Span::styled(tier_text, Style::default().fg(tier_fg))),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Categories ({}) | :budget <name> <amount> to set a budget ",
                    app.categories.len()
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
