use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sitebid::cli::{
    handle_cost_command, handle_export_command, handle_item_command, handle_payment_command,
    handle_project_command, handle_report_command,
};
use sitebid::config::{SiteBidPaths, Settings};
use sitebid::display::format_category_list;
use sitebid::storage::{initialize_storage, Storage};

/// Filter directives, e.g. `SITEBID_LOG=sitebid=debug`
const LOG_ENV: &str = "SITEBID_LOG";
const LOG_JSON_ENV: &str = "SITEBID_LOG_JSON";

#[derive(Parser)]
#[command(
    name = "sitebid",
    author = "Kaylee Beyene",
    version,
    about = "Construction estimating and project financial rollup",
    long_about = "SiteBid turns line-item estimates into contract totals and tracks \
                  orders, labor and expenses against them, with payment schedules \
                  and risk checks for each project."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config {
        /// Also show the most recent audit log entries
        #[arg(long, value_name = "COUNT")]
        history: Option<usize>,
    },

    /// List the trade categories line items can use
    Categories,

    /// Project management commands
    #[command(subcommand)]
    Project(sitebid::cli::ProjectCommands),

    /// Estimate line item commands
    #[command(subcommand)]
    Item(sitebid::cli::ItemCommands),

    /// Payment schedule commands
    #[command(subcommand)]
    Payment(sitebid::cli::PaymentCommands),

    /// Orders, labor and expenses
    #[command(subcommand)]
    Cost(sitebid::cli::CostCommands),

    /// Estimate, financial and portfolio reports
    #[command(subcommand)]
    Report(sitebid::cli::ReportCommands),

    /// Export a project with its records as JSON or YAML
    Export(sitebid::cli::ExportArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_json = std::env::var(LOG_JSON_ENV)
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);

    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SiteBidPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing SiteBid at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized; existing data was left untouched.");
            }
            println!();
            println!("Run 'sitebid project create <name>' to start an estimate.");
        }
        Some(Commands::Config { history }) => {
            println!("SiteBid Configuration");
            println!("=====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", if paths.is_initialized() { "yes" } else { "no" });
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Default profit:    {}%", settings.default_profit_percent);
            println!("  Default rounding:  {}", settings.default_rounding_policy);
            println!("  Low margin alert:  {}%", settings.risk.low_margin_percent);
            println!("  Budget warning:    {}%", settings.risk.budget_warning_percent);

            if let Some(count) = history {
                println!();
                println!("Recent changes:");
                let entries = storage.audit().read_recent(count)?;
                if entries.is_empty() {
                    println!("  (none)");
                }
                for entry in entries {
                    println!("{}", entry.format_human_readable());
                }
            }
        }
        Some(Commands::Categories) => {
            print!("{}", format_category_list());
        }
        Some(Commands::Project(cmd)) => {
            handle_project_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Item(cmd)) => {
            handle_item_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Payment(cmd)) => {
            handle_payment_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Cost(cmd)) => {
            handle_cost_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, &settings, args)?;
        }
        None => {
            println!("SiteBid - construction estimating and project financials");
            println!();
            println!("Run 'sitebid --help' for usage information.");
        }
    }

    Ok(())
}
