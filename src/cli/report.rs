//! CLI commands for reports
//!
//! Every report prints to the terminal, or to a CSV file with `--output`.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use super::{parse_optional_date, today};
use crate::config::Settings;
use crate::error::{SiteBidError, SiteBidResult};
use crate::reports::{EstimateReport, FinancialReport, PortfolioReport};
use crate::services::{AnalysisService, ProjectService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Estimate breakdown by category with indirect costs and rounding
    Estimate {
        /// Project name or ID
        project: String,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Contract, estimated and actual cost, collections and risks
    #[command(alias = "financial")]
    Summary {
        /// Project name or ID
        project: String,

        /// Reference date for overdue payments (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detected risks only
    Risks {
        /// Project name or ID
        project: String,

        /// Reference date for overdue payments (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,
    },

    /// All projects side by side
    #[command(alias = "all")]
    Portfolio {
        /// Reference date for overdue payments (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> SiteBidResult<()> {
    let projects = ProjectService::new(storage);
    let analysis = AnalysisService::new(storage).with_thresholds(settings.risk);

    match cmd {
        ReportCommands::Estimate { project, output } => {
            let found = projects.require(&project)?;
            let report = EstimateReport::from_estimate(&found, analysis.estimate(&found));

            match output {
                Some(path) => {
                    report.export_csv(create_file(&path)?)?;
                    println!("Estimate report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(settings)),
            }
        }

        ReportCommands::Summary {
            project,
            as_of,
            output,
        } => {
            let found = projects.require(&project)?;
            let as_of = parse_optional_date(as_of)?.unwrap_or_else(today);
            let report = FinancialReport::generate(&analysis.analyze(&found, as_of)?, as_of);

            match output {
                Some(path) => {
                    report.export_csv(create_file(&path)?)?;
                    println!("Financial report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(settings)),
            }
        }

        ReportCommands::Risks { project, as_of } => {
            let found = projects.require(&project)?;
            let as_of = parse_optional_date(as_of)?.unwrap_or_else(today);
            let report = FinancialReport::generate(&analysis.analyze(&found, as_of)?, as_of);
            print!("{}", report.format_risks());
        }

        ReportCommands::Portfolio { as_of, output } => {
            let as_of = parse_optional_date(as_of)?.unwrap_or_else(today);
            let report = PortfolioReport::generate(&analysis.portfolio(as_of)?);

            match output {
                Some(path) => {
                    report.export_csv(create_file(&path)?)?;
                    println!("Portfolio report exported to: {}", path.display());
                }
                None => println!("{}", report.format_terminal(settings)),
            }
        }
    }

    Ok(())
}

fn create_file(path: &Path) -> SiteBidResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        SiteBidError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
