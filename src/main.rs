use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use policyview::{
    api::{PolicyApi, PolicySource},
    config::Config,
    filters::{filter_policies, FilterKind, TableFilters},
    policy_tui::App,
    report,
};

mod cli;

use cli::{Cli, Commands, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "policyview=info");
    }

    let command = cli.command.unwrap_or(Commands::Tui);
    init_logging(matches!(command, Commands::Tui));

    let config = Config::from_env()?.with_base_url(cli.api_url);
    config.validate()?;

    match command {
        Commands::Tui => run_tui(config).await,
        Commands::List {
            search,
            provider,
            insurance_type,
            status,
            page,
            rows_per_page,
            all,
            format,
            output,
        } => {
            let format = Commands::parse_output_format(&format)?;

            let mut filters = TableFilters::default();
            filters.set(FilterKind::Provider, &provider)?;
            filters.set(FilterKind::InsuranceType, &insurance_type)?;
            filters.set(FilterKind::Status, &status)?;

            let rows_per_page = rows_per_page.unwrap_or(config.ui.rows_per_page);

            info!("Listing policies (search: '{}')", search);
            let api = PolicyApi::new(&config)?;
            let rows = api
                .fetch_policies(&search)
                .await
                .context("Failed to fetch policies")?;

            let filtered = filter_policies(&rows, &filters, &search);
            let page = if all {
                report::whole_list(&filtered)
            } else {
                report::select_page(&filtered, rows_per_page, page)?
            };

            let mut writer: Box<dyn io::Write> = match &output {
                Some(path) => Box::new(
                    std::fs::File::create(path)
                        .with_context(|| format!("Cannot create output file: {}", path.display()))?,
                ),
                None => Box::new(io::stdout()),
            };

            match format {
                OutputFormat::Table => {
                    writer.write_all(report::format_table(&page, filtered.len()).as_bytes())?
                }
                OutputFormat::Csv => report::write_csv(&page, &mut writer)?,
            }
            writer.flush()?;

            if let Some(path) = output {
                info!("Wrote {} policies to {}", page.rows.len(), path.display());
            }
            Ok(())
        }
    }
}

/// Log to a file, and also to stderr unless the terminal UI owns the screen
fn init_logging(tui_mode: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let file_appender = tracing_appender::rolling::never(".", "policyview.log");

    let stderr_layer = (!tui_mode).then(|| {
        fmt::layer()
            .with_writer(io::stderr)
            .with_filter(EnvFilter::from_default_env())
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env()),
        )
        .init();
}

async fn run_tui(config: Config) -> Result<()> {
    info!("Launching policy TUI");

    let source: Arc<dyn PolicySource> = Arc::new(PolicyApi::new(&config)?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, source);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match result {
        Ok(_) => {
            info!("Policy TUI exited successfully");
            Ok(())
        }
        Err(e) => {
            error!("Policy TUI encountered an error: {}", e);
            Err(e)
        }
    }
}
