use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
    tty::IsTty,
};
use diffplot::{
    config::{Config, ConfigStore, FileConfigStore},
    error::Result,
    export,
    input::{self, ReadMode},
    runtime::{self, CrosstermEventSource, TerminalRestore},
    series::ChartSeries,
    stats::StatsTable,
    ui::ChartView,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    fs::File,
    io::{self, stdin, BufReader, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// plot per-difficulty Max/Avg statistics as a terminal line chart
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Reads a statistics mapping such as {17: {\"Max\": 120, \"Avg\": 80.5}, ...} and draws the Max and Avg series over the sorted difficulty keys."
)]
pub struct Cli {
    /// read the statistics mapping from a file instead of stdin
    #[clap(short = 'i', long)]
    input: Option<PathBuf>,

    /// read stdin until end of input
    #[clap(long, conflicts_with = "until_closed")]
    to_end: bool,

    /// stop reading stdin once the top-level mapping closes
    #[clap(long)]
    until_closed: bool,

    /// chart title
    #[clap(short = 't', long)]
    title: Option<String>,

    /// print the series as a table instead of charting them
    #[clap(long)]
    print: bool,

    /// write the series as CSV to this path
    #[clap(long)]
    csv: Option<PathBuf>,

    /// show the chart even when --print or --csv is given
    #[clap(long)]
    chart: bool,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// save the effective chart settings to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn read_mode(&self, stdin_is_tty: bool) -> ReadMode {
        if self.input.is_some() || self.to_end {
            ReadMode::ToEnd
        } else if self.until_closed || stdin_is_tty {
            ReadMode::UntilClosed
        } else {
            ReadMode::ToEnd
        }
    }

    fn wants_chart(&self) -> bool {
        self.chart || (!self.print && self.csv.is_none())
    }

    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Config from the store with command line overrides applied
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(title) = &self.title {
            config.title = title.clone();
        }
        config
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    if cli.wants_chart() && !io::stdout().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::Io,
            "stdout must be a tty to show the chart; use --print or --csv",
        )
        .exit();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(%err, "run failed");
            eprintln!("diffplot: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let store = cli.config_store();
    let config = cli.apply_overrides(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved config");
    }

    let mut stdout = io::stdout();
    writeln!(stdout, "{}", input::PROMPT)?;
    stdout.flush()?;

    let mode = cli.read_mode(stdin().is_tty());
    let text = match &cli.input {
        Some(path) => input::read_document(BufReader::new(File::open(path)?), mode)?,
        None => input::read_document(stdin().lock(), mode)?,
    };
    let table = input::parse_document(&text)?;
    info!(entries = table.len(), "loaded statistics");

    if cli.print {
        export::write_table(&table, stdout.lock())?;
    }
    if let Some(path) = &cli.csv {
        export::write_csv(&table, File::create(path)?)?;
        debug!(path = %path.display(), "wrote csv");
    }
    if cli.wants_chart() {
        show_chart(&table, &config)?;
    }

    Ok(())
}

fn show_chart(table: &StatsTable, config: &Config) -> Result<()> {
    let series = ChartSeries::from_table(table);
    let view = ChartView::new(&series, config);

    enable_raw_mode()?;
    let _restore = TerminalRestore;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    runtime::run_chart(&mut terminal, &view, &mut CrosstermEventSource)?;
    Ok(())
}
