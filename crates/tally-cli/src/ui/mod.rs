//! TUI rendering — orchestrates all panes.

pub mod chart;
pub mod table;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, charts, totals, table, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),      // header
      Constraint::Percentage(50), // charts
      Constraint::Length(3),      // totals
      Constraint::Min(0),         // table
      Constraint::Length(1),      // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_charts(f, rows[1], app);
  table::draw_totals(f, rows[2], app);
  table::draw_table(f, rows[3], app);
  draw_status(f, rows[4], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let line = Line::from(Span::styled(
    " tally  [r] refresh  [f] table  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  ));
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Charts row ───────────────────────────────────────────────────────────────

fn draw_charts(f: &mut Frame, area: Rect, app: &App) {
  // Amount series on the left, category bars on the right.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
    .split(area);

  chart::draw_amounts(f, cols[0], app);
  chart::draw_categories(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let status = if app.status_msg.is_empty() {
    format!(
      "{} rows  ·  {} outliers flagged",
      app.records.len(),
      app.outliers.iter().filter(|p| p.outlier).count()
    )
  } else {
    app.status_msg.clone()
  };

  let line = Line::from(Span::styled(
    format!(" {status}"),
    Style::default().fg(Color::DarkGray),
  ));
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Number formatting ────────────────────────────────────────────────────────

/// Group an integer's digits in threes: 1234567 → "1,234,567".
pub fn group_digits(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

/// Format a currency amount with grouped digits and two decimals.
pub fn format_amount(amount: f64) -> String {
  let cents = (amount * 100.0).round() as u64;
  format!("{}.{:02}", group_digits(cents / 100), cents % 100)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn groups_digits_in_threes() {
    assert_eq!(group_digits(0), "0");
    assert_eq!(group_digits(999), "999");
    assert_eq!(group_digits(1_000), "1,000");
    assert_eq!(group_digits(1_234_567), "1,234,567");
  }

  #[test]
  fn formats_amounts_with_two_decimals() {
    assert_eq!(format_amount(0.0), "0.00");
    assert_eq!(format_amount(10.5), "10.50");
    assert_eq!(format_amount(1234.56), "1,234.56");
    // Rounds up across the integer boundary.
    assert_eq!(format_amount(1.999), "2.00");
  }
}
