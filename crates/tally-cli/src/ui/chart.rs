//! Amount and category charts.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  symbols,
  widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType},
};

use crate::{app::App, ui::format_amount};

// ─── Amount series ───────────────────────────────────────────────────────────

/// Line chart of the amount series. Outlier points are re-plotted as a red
/// scatter on top of the line; the forecast continues the x axis past the
/// last historical point.
pub fn draw_amounts(f: &mut Frame, area: Rect, app: &App) {
  let history = &app.outliers;
  let n = history.len();

  let line: Vec<(f64, f64)> = history
    .iter()
    .enumerate()
    .map(|(i, p)| (i as f64, p.amount))
    .collect();
  let flagged: Vec<(f64, f64)> = history
    .iter()
    .enumerate()
    .filter(|(_, p)| p.outlier)
    .map(|(i, p)| (i as f64, p.amount))
    .collect();
  let predicted: Vec<(f64, f64)> = app
    .forecast
    .forecast
    .iter()
    .enumerate()
    .map(|(i, p)| ((n + i) as f64, p.predicted))
    .collect();

  let x_max = (n + predicted.len()).saturating_sub(1).max(1) as f64;
  let y_max = line
    .iter()
    .chain(&predicted)
    .map(|&(_, y)| y)
    .fold(1.0_f64, f64::max)
    * 1.1;

  let datasets = vec![
    Dataset::default()
      .name("amount")
      .marker(symbols::Marker::Braille)
      .graph_type(GraphType::Line)
      .style(Style::default().fg(Color::Cyan))
      .data(&line),
    Dataset::default()
      .name("outlier")
      .marker(symbols::Marker::Dot)
      .graph_type(GraphType::Scatter)
      .style(Style::default().fg(Color::Red))
      .data(&flagged),
    Dataset::default()
      .name("forecast")
      .marker(symbols::Marker::Braille)
      .graph_type(GraphType::Line)
      .style(Style::default().fg(Color::Yellow))
      .data(&predicted),
  ];

  let chart = Chart::new(datasets)
    .block(Block::default().title(" Sales ").borders(Borders::ALL))
    .x_axis(
      Axis::default()
        .style(Style::default().fg(Color::DarkGray))
        .bounds([0.0, x_max])
        .labels(x_labels(app)),
    )
    .y_axis(
      Axis::default()
        .style(Style::default().fg(Color::DarkGray))
        .bounds([0.0, y_max])
        .labels(vec!["0".to_string(), format_amount(y_max)]),
    );

  f.render_widget(chart, area);
}

/// First historical date and last charted date (forecast end if present).
fn x_labels(app: &App) -> Vec<String> {
  let first = app.outliers.first().map(|p| p.date.to_string());
  let last = app
    .forecast
    .forecast
    .last()
    .map(|p| p.date.to_string())
    .or_else(|| app.outliers.last().map(|p| p.date.to_string()));

  match (first, last) {
    (Some(first), Some(last)) => vec![first, last],
    _ => Vec::new(),
  }
}

// ─── Category totals ─────────────────────────────────────────────────────────

/// Bar chart of summed amount per category.
pub fn draw_categories(f: &mut Frame, area: Rect, app: &App) {
  let bars: Vec<(&str, u64)> = app
    .summary
    .iter()
    .map(|c| (c.category.as_str(), c.total.max(0.0).round() as u64))
    .collect();

  let chart = BarChart::default()
    .block(Block::default().title(" Categories ").borders(Borders::ALL))
    .data(bars.as_slice())
    .bar_width(9)
    .bar_gap(1)
    .bar_style(Style::default().fg(Color::Green))
    .value_style(Style::default().fg(Color::Black).bg(Color::Green));

  f.render_widget(chart, area);
}
