//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use matdoc_core::{
    BuildOptions, ProgressReporter, SilentProgress, build_database, inspect_database,
};
use matdoc_shared::{
    BuildConfig, BuildReport, PageSummary, PropertiesStatus, config_file_path, init_config,
    load_config, load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// matdoc: materials database page generator.
#[derive(Parser)]
#[command(
    name = "matdoc",
    version,
    about = "Generate material pages and the sidebar config from a folder-per-material database.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Where the site lives and which config to use.
#[derive(Args, Debug, Clone)]
pub(crate) struct SiteArgs {
    /// Site root holding the database folder, top-level pages and the sidebar file.
    #[arg(long, default_value = ".")]
    pub site_root: PathBuf,

    /// Database folder relative to the site root (overrides the config file).
    #[arg(long)]
    pub database: Option<String>,

    /// Config file (defaults to <site-root>/matdoc.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate every material page and the sidebar config.
    Build {
        #[command(flatten)]
        site: SiteArgs,

        /// Disable the progress spinner.
        #[arg(long)]
        no_progress: bool,
    },

    /// List materials and the inputs each one has, without writing anything.
    List {
        #[command(flatten)]
        site: SiteArgs,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a default matdoc.toml.
    Init {
        /// Target file (defaults to ./matdoc.toml).
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show resolved configuration.
    Show {
        #[command(flatten)]
        site: SiteArgs,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "matdoc=info",
        1 => "matdoc=debug",
        _ => "matdoc=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build { site, no_progress } => cmd_build(&site, no_progress),
        Command::List { site, json } => cmd_list(&site, json),
        Command::Config { action } => match action {
            ConfigAction::Init { path } => cmd_config_init(path.as_deref()),
            ConfigAction::Show { site } => cmd_config_show(&site),
        },
    }
}

/// Resolve the build options: config file, then CLI overrides.
fn resolve_options(site: &SiteArgs) -> Result<BuildOptions> {
    if !site.site_root.is_dir() {
        return Err(eyre!(
            "site root '{}' is not a directory",
            site.site_root.display()
        ));
    }

    let mut config = match &site.config {
        Some(path) => load_config_from(path)?,
        None => load_config(&site.site_root)?,
    };

    if let Some(database) = &site.database {
        config.output.database_dir = database.clone();
    }
    config.validate()?;

    Ok(BuildOptions {
        site_root: site.site_root.clone(),
        config,
    })
}

fn cmd_build(site: &SiteArgs, no_progress: bool) -> Result<()> {
    let options = resolve_options(site)?;

    info!(
        site_root = %options.site_root.display(),
        database = %options.config.output.database_dir,
        "building database pages"
    );

    let report = if no_progress {
        build_database(&options, &SilentProgress)?
    } else {
        build_database(&options, &CliProgress::new())?
    };

    println!();
    println!("  Database updated!");
    println!("  Pages:        {}", report.pages.len());
    println!("  Global pages: {}", report.global_page_count);
    println!("  Sidebar:      {}", report.sidebar_path.display());
    let malformed: Vec<&str> = report
        .pages
        .iter()
        .filter(|p| p.properties == PropertiesStatus::Malformed)
        .map(|p| p.name.as_str())
        .collect();
    if !malformed.is_empty() {
        println!("  Unreadable properties: {}", malformed.join(", "));
    }
    println!();

    Ok(())
}

fn cmd_list(site: &SiteArgs, json: bool) -> Result<()> {
    let options = resolve_options(site)?;
    let inventory = inspect_database(&options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&inventory)?);
        return Ok(());
    }

    if inventory.is_empty() {
        println!("No materials found in {}", options.database_root().display());
        return Ok(());
    }

    let width = inventory.iter().map(|m| m.name.len()).max().unwrap_or(0).max(8);
    println!("{:<width$}  {:<7}  {:<10}  {:>6}", "MATERIAL", "SUMMARY", "PROPERTIES", "IMAGES");
    for m in &inventory {
        println!(
            "{:<width$}  {:<7}  {:<10}  {:>6}",
            m.name,
            if m.has_summary { "yes" } else { "no" },
            m.properties.to_string(),
            m.image_count,
        );
    }

    Ok(())
}

fn cmd_config_init(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path(Path::new(".")),
    };
    init_config(&path)?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(site: &SiteArgs) -> Result<()> {
    let config: BuildConfig = resolve_options(site)?.config;
    let toml_str = toml::to_string_pretty(&config)?;
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
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn started(&self, material_count: usize) {
        self.spinner
            .set_message(format!("Found {material_count} materials"));
    }

    fn material_built(&self, page: &PageSummary, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Building [{current}/{total}] {}", page.name));
    }

    fn done(&self, _report: &BuildReport) {
        self.spinner.finish_and_clear();
    }
}
