//! Line item CLI commands

use clap::Subcommand;

use super::{parse_category, parse_money, parse_optional_money};
use crate::config::Settings;
use crate::display::format_line_items;
use crate::error::SiteBidResult;
use crate::models::{LineItem, Money};
use crate::services::{LineItemUpdate, ProjectService};
use crate::storage::Storage;

/// Line item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a line item to a project's estimate
    Add {
        /// Project name or ID
        project: String,
        /// Trade category id (see `sitebid categories`)
        category: String,
        /// What the line covers
        description: String,
        /// Quantity in the given unit
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        quantity: f64,
        /// Unit of measure (m2, ea, set, ...)
        #[arg(short, long, default_value = "")]
        unit: String,
        /// Material price per unit
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        material: String,
        /// Labor price per unit
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        labor: String,
        /// Other expense per unit
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        expense: String,
    },
    /// List a project's line items
    List {
        /// Project name or ID
        project: String,
    },
    /// Edit a line item
    Edit {
        /// Project name or ID
        project: String,
        /// Line item ID
        item: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: Option<f64>,
        #[arg(short, long)]
        unit: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        material: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        labor: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        expense: Option<String>,
    },
    /// Remove a line item
    Remove {
        /// Project name or ID
        project: String,
        /// Line item ID
        item: String,
    },
}

/// Handle a line item command
pub fn handle_item_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ItemCommands,
) -> SiteBidResult<()> {
    let service = ProjectService::new(storage);

    match cmd {
        ItemCommands::Add {
            project,
            category,
            description,
            quantity,
            unit,
            material,
            labor,
            expense,
        } => {
            let found = service.require(&project)?;
            let item = LineItem::new(parse_category(&category)?, description)
                .with_quantity(quantity)
                .with_unit(unit)
                .with_prices(
                    parse_money(&material, "material price")?,
                    parse_money(&labor, "labor price")?,
                    parse_money(&expense, "expense price")?,
                );

            let item = service.add_line_item(found.id, item)?;
            println!("Added line item: {} ({})", item.description, item.category);
            println!("  Total: {}", settings.money(item.line_total()));
            println!("  ID: {}", item.id);
        }

        ItemCommands::List { project } => {
            let found = service.require(&project)?;
            let total: Money = found.line_items.iter().map(|i| i.line_total()).sum();
            println!("Line items of {}", found.name);
            print!("{}", format_line_items(&found, settings));
            println!("  Direct cost: {}", settings.money(total));
        }

        ItemCommands::Edit {
            project,
            item,
            category,
            description,
            quantity,
            unit,
            material,
            labor,
            expense,
        } => {
            let found = service.require(&project)?;
            let update = LineItemUpdate {
                category: category.as_deref().map(parse_category).transpose()?,
                description,
                unit,
                quantity,
                material_unit_price: parse_optional_money(material, "material price")?,
                labor_unit_price: parse_optional_money(labor, "labor price")?,
                expense_unit_price: parse_optional_money(expense, "expense price")?,
            };

            if update.is_empty() {
                println!("No changes specified. Use --help to see editable fields.");
                return Ok(());
            }

            let updated = service.update_line_item(found.id, &item, update)?;
            println!("Updated line item: {}", updated.description);
            println!("  Total: {}", settings.money(updated.line_total()));
        }

        ItemCommands::Remove { project, item } => {
            let found = service.require(&project)?;
            let removed = service.remove_line_item(found.id, &item)?;
            println!("Removed line item: {}", removed.description);
        }
    }

    Ok(())
}
