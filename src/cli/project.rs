//! Project CLI commands

use clap::Subcommand;

use super::{parse_optional_money, today};
use crate::config::Settings;
use crate::display::{format_cost_records, format_project_details, format_project_list};
use crate::error::{SiteBidError, SiteBidResult};
use crate::models::{ProjectStatus, RoundingPolicy};
use crate::services::{AnalysisService, ProjectService, ProjectUpdate};
use crate::storage::Storage;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// Project name
        name: String,
        /// Client name
        #[arg(short, long)]
        client: Option<String>,
    },
    /// List projects with their contract total and margin
    List {
        /// Filter by status (estimating, contracted, in_progress, completed, cancelled)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Show project details
    Show {
        /// Project name or ID
        project: String,
        /// Also list orders, labor and expenses
        #[arg(long)]
        records: bool,
    },
    /// Edit a project
    Edit {
        /// Project name or ID
        project: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New client name
        #[arg(short, long)]
        client: Option<String>,
        /// New status
        #[arg(short, long)]
        status: Option<String>,
        /// Profit percentage added on top of cost
        #[arg(short, long)]
        profit: Option<f64>,
        /// Rounding policy (ten_thousand, hundred_thousand, manual)
        #[arg(short, long)]
        rounding: Option<String>,
        /// Contract total used by the manual rounding policy
        #[arg(long)]
        manual_total: Option<String>,
    },
    /// Delete a project and all of its cost records
    Delete {
        /// Project name or ID
        project: String,
        /// Skip the confirmation notice
        #[arg(long)]
        force: bool,
    },
}

/// Handle a project command
pub fn handle_project_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ProjectCommands,
) -> SiteBidResult<()> {
    let service = ProjectService::new(storage);
    let analysis = AnalysisService::new(storage).with_thresholds(settings.risk);

    match cmd {
        ProjectCommands::Create { name, client } => {
            let project = service.create(&name, client.as_deref(), settings)?;

            println!("Created project: {}", project.name);
            if !project.client.is_empty() {
                println!("  Client: {}", project.client);
            }
            println!("  Profit: {}%", project.profit_percent);
            println!("  Rounding: {}", project.rounding_policy);
            println!("  ID: {}", project.id);
        }

        ProjectCommands::List { status } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let today = today();
            let analyses = service
                .list(status)?
                .iter()
                .map(|p| analysis.analyze(p, today))
                .collect::<SiteBidResult<Vec<_>>>()?;
            print!("{}", format_project_list(&analyses, settings));
            if analyses.is_empty() {
                println!();
            }
        }

        ProjectCommands::Show { project, records } => {
            let found = service.require(&project)?;
            let result = analysis.analyze(&found, today())?;
            print!("{}", format_project_details(&result, settings));
            if records {
                println!();
                print!("{}", format_cost_records(&result.records, settings));
            }
        }

        ProjectCommands::Edit {
            project,
            name,
            client,
            status,
            profit,
            rounding,
            manual_total,
        } => {
            let found = service.require(&project)?;

            let update = ProjectUpdate {
                name,
                client,
                status: status.as_deref().map(parse_status).transpose()?,
                profit_percent: profit,
                rounding_policy: rounding.as_deref().map(parse_rounding).transpose()?,
                manual_total: parse_optional_money(manual_total, "manual total")?,
            };

            if update.is_empty() {
                println!("No changes specified. Use --help to see editable fields.");
                return Ok(());
            }

            let updated = service.update(found.id, update)?;
            println!("Updated project: {}", updated.name);
        }

        ProjectCommands::Delete { project, force } => {
            let found = service.require(&project)?;

            if !force {
                let records = analysis.records(&found)?;
                println!(
                    "This deletes '{}' with {} line item(s), {} order(s), {} labor record(s) and {} expense(s).",
                    found.name,
                    found.line_items.len(),
                    records.orders.len(),
                    records.labor.len(),
                    records.expenses.len()
                );
                println!("To proceed, run again with --force flag:");
                println!("  sitebid project delete {} --force", found.id);
                return Ok(());
            }

            let deleted = service.delete(found.id)?;
            println!("Deleted project: {}", deleted.name);
        }
    }

    Ok(())
}

fn parse_status(text: &str) -> SiteBidResult<ProjectStatus> {
    ProjectStatus::parse(text).ok_or_else(|| {
        SiteBidError::Validation(format!(
            "Invalid status: '{}'. Valid statuses: estimating, contracted, in_progress, completed, cancelled",
            text
        ))
    })
}

fn parse_rounding(text: &str) -> SiteBidResult<RoundingPolicy> {
    RoundingPolicy::parse(text).ok_or_else(|| {
        SiteBidError::Validation(format!(
            "Invalid rounding policy: '{}'. Valid policies: ten_thousand, hundred_thousand, manual",
            text
        ))
    })
}
