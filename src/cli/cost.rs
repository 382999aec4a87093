//! Cost record CLI commands
//!
//! Orders, labor and expenses are what a project actually spends; they are
//! compared against the estimate in the financial report.

use clap::Subcommand;

use super::{parse_money, parse_optional_date, parse_optional_money, today};
use crate::config::Settings;
use crate::display::format_cost_records;
use crate::error::SiteBidResult;
use crate::models::{Expense, ExpenseStatus, LaborRecord, Order};
use crate::services::{AnalysisService, CostService, ProjectService};
use crate::storage::Storage;

/// Cost record subcommands
#[derive(Subcommand)]
pub enum CostCommands {
    /// Record a material order
    Order {
        /// Project name or ID
        project: String,
        /// Vendor name
        vendor: String,
        /// Order amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// What was ordered
        #[arg(short, long, default_value = "")]
        description: String,
        /// Order date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Record a day-labor entry
    Labor {
        /// Project name or ID
        project: String,
        /// Worker name
        worker: String,
        /// Daily rate
        rate: String,
        /// Days worked (fractions allowed)
        #[arg(short, long, default_value = "1")]
        days: f64,
        /// Meal allowance
        #[arg(long)]
        meal: Option<String>,
        /// Transport allowance
        #[arg(long)]
        transport: Option<String>,
        /// Amount withheld from the worker
        #[arg(long)]
        deduction: Option<String>,
        /// Work date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Record a miscellaneous site expense
    Expense {
        /// Project name or ID
        project: String,
        /// What the money was spent on
        description: String,
        /// Expense amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Record as already approved
        #[arg(long)]
        approved: bool,
        /// Date spent (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Approve a pending expense so it counts as cost
    Approve {
        /// Expense ID
        expense: String,
    },
    /// Reject an expense
    Reject {
        /// Expense ID
        expense: String,
    },
    /// List the cost records of a project
    List {
        /// Project name or ID
        project: String,
    },
    /// Delete an order, labor record or expense
    Delete {
        /// Record ID (ord-, lab- or exp- prefix)
        record: String,
    },
}

/// Handle a cost record command
pub fn handle_cost_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CostCommands,
) -> SiteBidResult<()> {
    let projects = ProjectService::new(storage);
    let service = CostService::new(storage);

    match cmd {
        CostCommands::Order {
            project,
            vendor,
            amount,
            description,
            date,
        } => {
            let found = projects.require(&project)?;
            let mut order = Order::new(found.id, vendor, parse_money(&amount, "amount")?);
            order.description = description;
            order.ordered_on = parse_optional_date(date)?;

            let order = service.record_order(order)?;
            println!("Recorded order: {} {}", order.vendor, settings.money(order.amount));
            println!("  ID: {}", order.id);
        }

        CostCommands::Labor {
            project,
            worker,
            rate,
            days,
            meal,
            transport,
            deduction,
            date,
        } => {
            let found = projects.require(&project)?;
            let mut record = LaborRecord::new(found.id, worker, parse_money(&rate, "daily rate")?, days)
                .with_extras(
                    parse_optional_money(meal, "meal cost")?.unwrap_or_default(),
                    parse_optional_money(transport, "transport cost")?.unwrap_or_default(),
                    parse_optional_money(deduction, "deduction")?.unwrap_or_default(),
                );
            record.work_date = parse_optional_date(date)?;

            let record = service.record_labor(record)?;
            println!(
                "Recorded labor: {} x {} day(s) = {}",
                record.worker,
                record.days,
                settings.money(record.total())
            );
            println!("  ID: {}", record.id);
        }

        CostCommands::Expense {
            project,
            description,
            amount,
            approved,
            date,
        } => {
            let found = projects.require(&project)?;
            let mut expense = Expense::new(found.id, description, parse_money(&amount, "amount")?);
            if approved {
                expense = expense.with_status(ExpenseStatus::Approved);
            }
            expense.spent_on = parse_optional_date(date)?;

            let expense = service.record_expense(expense)?;
            println!(
                "Recorded expense: {} {} ({})",
                expense.description,
                settings.money(expense.amount),
                expense.status
            );
            println!("  ID: {}", expense.id);
        }

        CostCommands::Approve { expense } => {
            let expense = service.approve_expense(&expense)?;
            println!("Approved expense: {} {}", expense.description, settings.money(expense.amount));
        }

        CostCommands::Reject { expense } => {
            let expense = service.reject_expense(&expense)?;
            println!("Rejected expense: {} {}", expense.description, settings.money(expense.amount));
        }

        CostCommands::List { project } => {
            let found = projects.require(&project)?;
            let analysis = AnalysisService::new(storage)
                .with_thresholds(settings.risk)
                .analyze(&found, today())?;
            println!("Cost records of {}", found.name);
            println!();
            print!("{}", format_cost_records(&analysis.records, settings));
            println!();
            println!("Actual cost: {}", settings.money(analysis.summary.actual_cost.total));
        }

        CostCommands::Delete { record } => {
            let removed = service.delete(&record)?;
            println!("Deleted {}", removed.describe());
        }
    }

    Ok(())
}
