//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use campusevents_core::{
    FilePageSource, HttpPageSource, PageSource, PopulateOptions, PopulateReport, ProgressReporter,
    ScrapeConfig,
};
use campusevents_extract::FetchOptions;
use campusevents_shared::{
    AppConfig, EventDraft, init_config, interchange, load_config, validate_store_secrets,
};
use campusevents_storage::Storage;
use chrono::Datelike;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// campusevents — scrape the Connections newsletter into the events store.
#[derive(Parser)]
#[command(
    name = "campusevents",
    version,
    about = "Scrape campus newsletter events, resolve their buildings, and load them into the events store.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Local database file; overrides store.local_path and the remote store.
    #[arg(long, global = true, env = "CAMPUSEVENTS_DB_PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Arguments shared by `scrape` and `run`.
#[derive(clap::Args)]
pub(crate) struct SourceArgs {
    /// Newsletter URL (defaults to source.url).
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Parse a saved HTML page instead of fetching.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Year applied to extracted dates (defaults to source.default_year, then the current year).
    #[arg(long)]
    pub year: Option<i32>,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract events from the newsletter page into the interchange file.
    Scrape {
        #[command(flatten)]
        source: SourceArgs,

        /// Output file (defaults to output.events_file).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Resolve buildings for saved events and insert them into the store.
    Populate {
        /// Interchange file to read (defaults to output.events_file).
        #[arg(short, long)]
        events: Option<PathBuf>,
    },

    /// Scrape and populate in one pass.
    Run {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Building catalog management.
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Stored event inspection.
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Catalog subcommands.
#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// Load buildings and rooms from a JSON file into the store.
    Import {
        /// JSON file with `buildings` and `rooms` arrays.
        file: PathBuf,
    },
    /// Print the building catalog.
    List,
}

/// Events subcommands.
#[derive(Subcommand)]
pub(crate) enum EventsAction {
    /// Print stored events in date order.
    List,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "campusevents=info",
        1 => "campusevents=debug",
        _ => "campusevents=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = load_config()?;
    let db = cli.db.as_deref();

    match cli.command {
        Command::Scrape { source, out } => cmd_scrape(&config, &source, out).await.map(|_| ()),
        Command::Populate { events } => cmd_populate(&config, db, events.as_deref()).await,
        Command::Run { source } => cmd_run(&config, db, &source).await,
        Command::Catalog { action } => match action {
            CatalogAction::Import { file } => cmd_catalog_import(&config, db, &file).await,
            CatalogAction::List => cmd_catalog_list(&config, db).await,
        },
        Command::Events { action } => match action {
            EventsAction::List => cmd_events_list(&config, db).await,
        },
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(&config).await,
        },
    }
}

// ---------------------------------------------------------------------------
// Store access
// ---------------------------------------------------------------------------

/// Open the local database if one is configured, else the remote store.
///
/// The remote endpoint and credential come from the environment and are
/// checked before any network traffic.
async fn open_store(config: &AppConfig, db: Option<&Path>, readonly: bool) -> Result<Storage> {
    let local = db
        .map(Path::to_path_buf)
        .or_else(|| config.store.local_path.as_ref().map(PathBuf::from));

    if let Some(path) = local {
        info!(path = %path.display(), readonly, "opening local store");
        let storage = if readonly {
            Storage::open_readonly(&path).await?
        } else {
            Storage::open(&path).await?
        };
        return Ok(storage);
    }

    let secrets = validate_store_secrets(config)?;
    info!("opening remote store");
    Ok(Storage::open_remote(&secrets.url, &secrets.token).await?)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn resolve_year(config: &AppConfig, flag: Option<i32>) -> i32 {
    flag.or(config.source.default_year)
        .unwrap_or_else(|| chrono::Local::now().year())
}

fn build_source(config: &AppConfig, args: &SourceArgs) -> Result<Box<dyn PageSource>> {
    let raw_url = args.url.as_deref().unwrap_or(&config.source.url);
    let url = Url::parse(raw_url).map_err(|e| eyre!("invalid URL '{raw_url}': {e}"))?;

    let source: Box<dyn PageSource> = match &args.input {
        Some(path) => Box::new(FilePageSource {
            path: path.clone(),
            base_url: Some(url),
        }),
        None => Box::new(HttpPageSource {
            url,
            options: FetchOptions::from(&config.source),
        }),
    };
    Ok(source)
}

async fn cmd_scrape(
    config: &AppConfig,
    args: &SourceArgs,
    out: Option<PathBuf>,
) -> Result<Vec<EventDraft>> {
    let source = build_source(config, args)?;
    let out = out.unwrap_or_else(|| PathBuf::from(&config.output.events_file));
    let scrape_config = ScrapeConfig {
        year: resolve_year(config, args.year),
        output: Some(out.clone()),
    };

    info!(year = scrape_config.year, input = ?args.input, "scraping newsletter");

    let events = campusevents_core::scrape(&scrape_config, source.as_ref()).await?;

    let dated = events.iter().filter(|e| e.date.is_some()).count();
    println!();
    println!("  Events extracted: {}", events.len());
    println!("  With dates:       {dated}");
    println!("  Saved to:         {}", out.display());
    println!();

    Ok(events)
}

async fn cmd_populate(config: &AppConfig, db: Option<&Path>, events: Option<&Path>) -> Result<()> {
    let path = events
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.output.events_file));
    let drafts = interchange::read_events(&path)?;
    info!(path = %path.display(), drafts = drafts.len(), "loaded events");

    populate_drafts(config, db, &drafts).await
}

async fn cmd_run(config: &AppConfig, db: Option<&Path>, args: &SourceArgs) -> Result<()> {
    let drafts = cmd_scrape(config, args, None).await?;
    populate_drafts(config, db, &drafts).await
}

async fn populate_drafts(config: &AppConfig, db: Option<&Path>, drafts: &[EventDraft]) -> Result<()> {
    let storage = open_store(config, db, false).await?;
    let options = PopulateOptions {
        exclude_categories: config.resolve.fallback_exclude_categories.clone(),
    };
    let reporter = CliProgress::new();
    let mut rng = rand::rng();

    let report = campusevents_core::populate(
        drafts,
        &storage,
        &storage,
        &options,
        &reporter,
        &mut rng,
    )
    .await?;

    print_report(&report);

    if report.inserts.processed > 0 && report.inserts.inserted == 0 {
        return Err(eyre!("no events were inserted ({} failed)", report.inserts.errors));
    }
    Ok(())
}

fn print_report(report: &PopulateReport) {
    let m = &report.matches;
    let i = &report.inserts;
    println!();
    println!("  Building matches");
    println!("    High confidence:   {}", m.high);
    println!("    Medium confidence: {}", m.medium);
    println!("    Random fallback:   {}", m.random);
    println!("    Skipped:           {}", m.skipped);
    println!();
    println!("  Events inserted: {}", i.inserted);
    println!("  Errors:          {}", i.errors);
    println!("  Total processed: {}", i.processed);
    println!("  Time:            {:.1}s", report.elapsed.as_secs_f64());
    println!();
}

async fn cmd_catalog_import(config: &AppConfig, db: Option<&Path>, file: &Path) -> Result<()> {
    let catalog = campusevents_core::read_catalog(file)?;
    let storage = open_store(config, db, false).await?;
    let result = campusevents_core::import_catalog(&storage, &catalog).await?;

    println!();
    println!("  Buildings:     {}", result.buildings);
    println!("  Rooms added:   {}", result.rooms_added);
    println!("  Rooms skipped: {}", result.rooms_skipped);
    println!();
    Ok(())
}

async fn cmd_catalog_list(config: &AppConfig, db: Option<&Path>) -> Result<()> {
    let storage = open_store(config, db, true).await?;
    let buildings = storage.list_buildings().await?;
    let rooms = storage.list_rooms().await?;

    if buildings.is_empty() {
        println!("No buildings in catalog. Load one with `campusevents catalog import <file>`.");
        return Ok(());
    }

    for b in &buildings {
        let count = rooms.iter().filter(|r| r.building_id == b.id).count();
        println!(
            "  {:<24} {:<40} {:<12} {:>3} rooms  ({:.4}, {:.4})",
            b.id, b.name, b.category, count, b.latitude, b.longitude
        );
    }
    println!();
    println!("  {} buildings, {} rooms", buildings.len(), rooms.len());
    Ok(())
}

async fn cmd_events_list(config: &AppConfig, db: Option<&Path>) -> Result<()> {
    let storage = open_store(config, db, true).await?;
    let events = storage.list_events().await?;

    for stored in &events {
        let e = &stored.event;
        println!(
            "  {} {}  {:<40} {} / {}  [{}]",
            e.event_date.format("%m/%d/%Y"),
            e.event_time.format("%H:%M"),
            e.title,
            e.location_name,
            e.room,
            e.category
        );
    }
    println!();
    println!("  {} events", events.len());
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn event_processed(&self, title: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Inserting [{current}/{total}] {title}"));
    }

    fn done(&self, _report: &PopulateReport) {
        self.spinner.finish_and_clear();
    }
}
