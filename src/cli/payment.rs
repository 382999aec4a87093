//! Payment schedule CLI commands

use clap::Subcommand;

use super::{parse_optional_date, today};
use crate::config::Settings;
use crate::error::SiteBidResult;
use crate::services::{AnalysisService, ProjectService};
use crate::storage::Storage;

/// Payment schedule subcommands
#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Add an installment to the payment schedule
    Add {
        /// Project name or ID
        project: String,
        /// Installment label (e.g., "Deposit")
        label: String,
        /// Share of the contract total, in percent
        percent: f64,
        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// Mark an installment as received
    Paid {
        /// Project name or ID
        project: String,
        /// Installment label or ID
        payment: String,
        /// Date received (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Undo a received mark
    Unpaid {
        /// Project name or ID
        project: String,
        /// Installment label or ID
        payment: String,
    },
    /// Remove an installment
    Remove {
        /// Project name or ID
        project: String,
        /// Installment label or ID
        payment: String,
    },
}

/// Handle a payment schedule command
pub fn handle_payment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PaymentCommands,
) -> SiteBidResult<()> {
    let service = ProjectService::new(storage);

    match cmd {
        PaymentCommands::Add {
            project,
            label,
            percent,
            due,
        } => {
            let found = service.require(&project)?;
            let entry = service.add_payment(found.id, &label, percent, parse_optional_date(due)?)?;

            let contract_total = AnalysisService::new(storage).estimate(&found).final_total;
            println!(
                "Added payment: {} ({}% = {})",
                entry.label,
                entry.percent_of_total,
                settings.money(entry.amount_of(contract_total))
            );
            if let Some(due) = entry.due_date {
                println!("  Due: {}", settings.date(due));
            }
            println!("  ID: {}", entry.id);
        }

        PaymentCommands::Paid {
            project,
            payment,
            date,
        } => {
            let found = service.require(&project)?;
            let paid_date = parse_optional_date(date)?.unwrap_or_else(today);
            let entry = service.mark_paid(found.id, &payment, paid_date)?;
            println!("Marked paid: {} on {}", entry.label, settings.date(paid_date));
        }

        PaymentCommands::Unpaid { project, payment } => {
            let found = service.require(&project)?;
            let entry = service.mark_unpaid(found.id, &payment)?;
            println!("Marked unpaid: {}", entry.label);
        }

        PaymentCommands::Remove { project, payment } => {
            let found = service.require(&project)?;
            let entry = service.remove_payment(found.id, &payment)?;
            println!("Removed payment: {}", entry.label);
        }
    }

    Ok(())
}
