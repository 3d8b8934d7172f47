//! `tally` — terminal dashboard and client for the tally sales API.
//!
//! # Usage
//!
//! ```
//! tally --url http://localhost:5000        # interactive dashboard
//! tally upload sales.csv
//! tally search widget
//! tally update Widget 99.5
//! tally delete Widget
//! tally summary
//! tally predict
//! ```

mod app;
mod client;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
  },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "tally", about = "Terminal dashboard for the tally sales API")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the tally server (default: http://localhost:5000).
  #[arg(long, env = "TALLY_URL")]
  url: Option<String>,

  /// With no subcommand, the interactive dashboard starts.
  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Upload a CSV of sales records.
  Upload { file: std::path::PathBuf },
  /// Search records by name substring (case-insensitive).
  Search { name: String },
  /// Overwrite the amount on every record with this exact name.
  Update { name: String, amount: f64 },
  /// Delete every record with this exact name.
  Delete { name: String },
  /// Print category totals.
  Summary,
  /// Print the forecast series.
  Predict,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| "http://localhost:5000".to_string()),
  };

  let client = ApiClient::new(api_config)?;

  match args.command {
    Some(command) => run_command(client, command).await,
    None => run_dashboard(client).await,
  }
}

// ─── One-shot subcommands ─────────────────────────────────────────────────────

async fn run_command(client: ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Upload { file } => {
      let report = client.upload_csv(&file).await?;
      println!(
        "{}: {} inserted, {} rejected",
        report.message,
        report.inserted,
        report.rejected.len()
      );
      for row in &report.rejected {
        eprintln!("  line {} ({}): {}", row.line, row.column, row.reason);
      }
    }
    Command::Search { name } => {
      for r in client.search(&name).await? {
        println!("{}  {}  qty {}  amount {}", r.date, r.name, r.quantity, r.amount);
      }
    }
    Command::Update { name, amount } => {
      let report = client.update_amount(&name, amount).await?;
      println!("{} ({} rows)", report.message, report.affected);
    }
    Command::Delete { name } => {
      let report = client.delete(&name).await?;
      println!("{} ({} rows)", report.message, report.affected);
    }
    Command::Summary => {
      for c in client.category_summary().await? {
        println!("{}: {}", c.category, c.total);
      }
    }
    Command::Predict => {
      for p in client.predict().await?.forecast {
        println!("{}: {}", p.date, p.predicted);
      }
    }
  }
  Ok(())
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

async fn run_dashboard(client: ApiClient) -> Result<()> {
  let mut app = App::new(client);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data.
  let load_result = app.refresh().await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
