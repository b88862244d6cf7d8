//! record-table - browse a JSON array of records in a terminal table.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, warn};

use record_table::app::{App, ViewerOptions};
use record_table::config::Settings;
use record_table::error::AppError;
use record_table::events::EventHandler;
use record_table::logging;
use record_table::record::parse_records;
use record_table::ui::components::table::SelectionMode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of objects.
    file: PathBuf,

    /// Module used for labels and hidden fields.
    #[arg(long, default_value = "records")]
    module: String,

    /// Selection mode.
    #[arg(long, value_enum, default_value_t = SelectArg::Multiple)]
    select: SelectArg,

    /// Comma-separated field names to show as columns.
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Rows per page; defaults to the first configured option.
    #[arg(long)]
    page_size: Option<usize>,

    /// Show a delete trigger on every row.
    #[arg(long)]
    delete: bool,

    /// Title drawn above the table.
    #[arg(long)]
    title: Option<String>,

    /// Settings file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectArg {
    None,
    Single,
    Multiple,
}

impl From<SelectArg> for SelectionMode {
    fn from(arg: SelectArg) -> Self {
        match arg {
            SelectArg::None => SelectionMode::None,
            SelectArg::Single => SelectionMode::Single,
            SelectArg::Multiple => SelectionMode::Multiple,
        }
    }
}

/// Restores the terminal when dropped.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("could not enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, AppError> {
    let settings = match path {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    Ok(settings)
}

fn run(args: Args) -> record_table::error::Result<()> {
    if args.page_size == Some(0) {
        return Err(AppError::other("--page-size must be at least 1"));
    }
    let settings = load_settings(args.config.as_ref())?;
    let content = std::fs::read_to_string(&args.file)?;
    let records = parse_records(&content)?;

    let options = ViewerOptions {
        module: args.module,
        mode: args.select.into(),
        columns: args.columns,
        page_size: args.page_size,
        delete: args.delete,
        title: args.title,
    };
    let mut app = App::new(records, options, &settings);

    let mut guard = TerminalGuard::new().map_err(|e| AppError::terminal(e.to_string()))?;
    let mut events = EventHandler::new();
    while !app.should_quit() {
        guard.terminal.draw(|frame| app.view(frame))?;
        app.update(events.next()?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {e}");
    }

    let result = run(args);
    logging::shutdown();

    if let Err(e) = result {
        error!(error = %e, critical = e.is_critical(), "record-table failed");
        if let Some(dir) = logging::log_directory() {
            eprintln!("Logs: {}", dir.display());
        }
        if let Some(action) = e.suggested_action() {
            warn!(action, "Suggested action");
            anyhow::bail!("{}\n{}", e.user_message(), action);
        }
        anyhow::bail!("{}", e.user_message());
    }
    Ok(())
}
