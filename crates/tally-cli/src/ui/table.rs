//! Row preview table and derived totals.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::{
  app::{App, PREVIEW_ROWS},
  ui::{format_amount, group_digits},
};

/// Row-limited preview table; `[f]` toggles the full table.
pub fn draw_table(f: &mut Frame, area: Rect, app: &App) {
  let total = app.records.len();
  let shown = if app.full_table {
    total
  } else {
    total.min(PREVIEW_ROWS)
  };

  let header = Row::new(["Date", "Name", "Qty", "Amount"])
    .style(Style::default().add_modifier(Modifier::BOLD));

  let rows = app.records.iter().take(shown).map(|r| {
    Row::new(vec![
      Cell::from(r.date.to_string()),
      Cell::from(r.name.clone()),
      Cell::from(r.quantity.to_string()),
      Cell::from(format_amount(r.amount)),
    ])
  });

  let title = format!(" Rows ({shown} of {total}) ");
  let table = Table::new(
    rows,
    [
      Constraint::Length(12),
      Constraint::Min(16),
      Constraint::Length(6),
      Constraint::Length(14),
    ],
  )
  .header(header)
  .block(Block::default().title(title).borders(Borders::ALL));

  f.render_widget(table, area);
}

/// Totals derived client-side from the fetched rows.
pub fn draw_totals(f: &mut Frame, area: Rect, app: &App) {
  let totals = &app.totals;
  let line = Line::from(vec![
    Span::styled("Total amount: ", Style::default().fg(Color::DarkGray)),
    Span::raw(format_amount(totals.amount)),
    Span::styled("   Total quantity: ", Style::default().fg(Color::DarkGray)),
    Span::raw(group_digits(totals.quantity)),
    Span::styled("   Avg unit price: ", Style::default().fg(Color::DarkGray)),
    Span::raw(format_amount(totals.unit_price)),
  ]);

  let block = Block::default().title(" Totals ").borders(Borders::ALL);
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}
