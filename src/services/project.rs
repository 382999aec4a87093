//! Project service
//!
//! Project lifecycle plus editing of the estimate rows and payment schedule
//! stored inside each project.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::{SiteBidError, SiteBidResult};
use crate::models::{
    scheduled_percent, Category, LineItem, Money, PaymentScheduleEntry, Project, ProjectId,
    ProjectStatus, RoundingPolicy,
};
use crate::storage::Storage;

/// Changes to a project's own fields; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    pub name: Option<String>,
    pub client: Option<String>,
    pub status: Option<ProjectStatus>,
    pub profit_percent: Option<f64>,
    pub rounding_policy: Option<RoundingPolicy>,
    pub manual_total: Option<Money>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.client.is_none()
            && self.status.is_none()
            && self.profit_percent.is_none()
            && self.rounding_policy.is_none()
            && self.manual_total.is_none()
    }
}

/// Changes to a line item; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct LineItemUpdate {
    pub category: Option<Category>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub quantity: Option<f64>,
    pub material_unit_price: Option<Money>,
    pub labor_unit_price: Option<Money>,
    pub expense_unit_price: Option<Money>,
}

impl LineItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.description.is_none()
            && self.unit.is_none()
            && self.quantity.is_none()
            && self.material_unit_price.is_none()
            && self.labor_unit_price.is_none()
            && self.expense_unit_price.is_none()
    }
}

pub struct ProjectService<'a> {
    storage: &'a Storage,
}

impl<'a> ProjectService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a project with the configured default profit and rounding
    pub fn create(&self, name: &str, client: Option<&str>, settings: &Settings) -> SiteBidResult<Project> {
        let name = name.trim();
        if self.storage.projects.name_exists(name, None)? {
            return Err(SiteBidError::Duplicate {
                entity_type: "Project",
                identifier: name.to_string(),
            });
        }

        let rounding = match settings.default_rounding_policy {
            RoundingPolicy::Manual => {
                warn!("manual rounding needs a total; new project uses ten_thousand");
                RoundingPolicy::TenThousand
            }
            policy => policy,
        };

        let project = Project::new(name)
            .with_client(client.unwrap_or_default().trim())
            .with_profit_percent(settings.default_profit_percent)
            .with_rounding(rounding, None);

        project
            .validate()
            .map_err(|e| SiteBidError::Validation(e.to_string()))?;

        self.storage.projects.upsert(project.clone())?;
        self.storage.projects.save()?;
        self.storage.log_create(
            EntityType::Project,
            project.id.short(),
            Some(project.name.clone()),
            &project,
        )?;

        info!(project = %project.id, name = %project.name, "created project");
        Ok(project)
    }

    pub fn get(&self, id: ProjectId) -> SiteBidResult<Option<Project>> {
        self.storage.projects.get(id)
    }

    /// Find by name or short id
    pub fn find(&self, identifier: &str) -> SiteBidResult<Option<Project>> {
        self.storage.projects.find(identifier)
    }

    /// Like [`find`](Self::find) but a miss is an error
    pub fn require(&self, identifier: &str) -> SiteBidResult<Project> {
        self.find(identifier)?
            .ok_or_else(|| SiteBidError::project_not_found(identifier))
    }

    pub fn list(&self, status: Option<ProjectStatus>) -> SiteBidResult<Vec<Project>> {
        let projects = self.storage.projects.get_all()?;
        Ok(match status {
            Some(status) => projects.into_iter().filter(|p| p.status == status).collect(),
            None => projects,
        })
    }

    pub fn update(&self, id: ProjectId, update: ProjectUpdate) -> SiteBidResult<Project> {
        let before = self.load(id)?;
        let mut project = before.clone();

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if self.storage.projects.name_exists(&name, Some(id))? {
                return Err(SiteBidError::Duplicate {
                    entity_type: "Project",
                    identifier: name,
                });
            }
            project.name = name;
        }
        if let Some(client) = update.client {
            project.client = client.trim().to_string();
        }
        if let Some(status) = update.status {
            project.status = status;
        }
        if let Some(percent) = update.profit_percent {
            project.profit_percent = percent;
        }
        if let Some(policy) = update.rounding_policy {
            project.rounding_policy = policy;
            if policy != RoundingPolicy::Manual {
                project.manual_total = None;
            }
        }
        if let Some(total) = update.manual_total {
            project.manual_total = Some(total);
        }

        self.persist(&before, project)
    }

    /// Delete a project together with its orders, labor and expenses
    pub fn delete(&self, id: ProjectId) -> SiteBidResult<Project> {
        let project = self
            .storage
            .projects
            .delete(id)?
            .ok_or_else(|| SiteBidError::project_not_found(id.short()))?;

        let orders = self.storage.orders.delete_by_project(id)?;
        let labor = self.storage.labor.delete_by_project(id)?;
        let expenses = self.storage.expenses.delete_by_project(id)?;
        self.storage.save_all()?;

        for order in &orders {
            self.storage
                .log_delete(EntityType::Order, order.id.short(), Some(order.vendor.clone()), order)?;
        }
        for record in &labor {
            self.storage
                .log_delete(EntityType::Labor, record.id.short(), Some(record.worker.clone()), record)?;
        }
        for expense in &expenses {
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.short(),
                Some(expense.description.clone()),
                expense,
            )?;
        }
        self.storage.log_delete(
            EntityType::Project,
            project.id.short(),
            Some(project.name.clone()),
            &project,
        )?;

        info!(
            project = %project.id,
            cost_records = orders.len() + labor.len() + expenses.len(),
            "deleted project"
        );
        Ok(project)
    }

    pub fn add_line_item(&self, id: ProjectId, item: LineItem) -> SiteBidResult<LineItem> {
        validate_line_item(&item)?;

        let before = self.load(id)?;
        let mut project = before.clone();
        project.line_items.push(item.clone());
        self.persist_quiet(project)?;

        self.storage.log_create(
            EntityType::LineItem,
            item.id.short(),
            Some(item.description.clone()),
            &item,
        )?;
        Ok(item)
    }

    pub fn update_line_item(
        &self,
        id: ProjectId,
        item_identifier: &str,
        update: LineItemUpdate,
    ) -> SiteBidResult<LineItem> {
        let mut project = self.load(id)?;
        let before = project
            .find_line_item(item_identifier)
            .cloned()
            .ok_or_else(|| SiteBidError::line_item_not_found(item_identifier))?;

        let mut item = before.clone();
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(unit) = update.unit {
            item.unit = unit;
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = update.material_unit_price {
            item.material_unit_price = price;
        }
        if let Some(price) = update.labor_unit_price {
            item.labor_unit_price = price;
        }
        if let Some(price) = update.expense_unit_price {
            item.expense_unit_price = price;
        }
        validate_line_item(&item)?;

        if let Some(slot) = project.line_item_mut(item.id) {
            *slot = item.clone();
        }
        self.persist_quiet(project)?;

        self.storage.log_update(
            EntityType::LineItem,
            item.id.short(),
            Some(item.description.clone()),
            &before,
            &item,
        )?;
        Ok(item)
    }

    pub fn remove_line_item(&self, id: ProjectId, item_identifier: &str) -> SiteBidResult<LineItem> {
        let mut project = self.load(id)?;
        let item = project
            .find_line_item(item_identifier)
            .cloned()
            .ok_or_else(|| SiteBidError::line_item_not_found(item_identifier))?;

        project.line_items.retain(|i| i.id != item.id);
        self.persist_quiet(project)?;

        self.storage.log_delete(
            EntityType::LineItem,
            item.id.short(),
            Some(item.description.clone()),
            &item,
        )?;
        Ok(item)
    }

    pub fn add_payment(
        &self,
        id: ProjectId,
        label: &str,
        percent_of_total: f64,
        due_date: Option<NaiveDate>,
    ) -> SiteBidResult<PaymentScheduleEntry> {
        let label = label.trim();
        if label.is_empty() {
            return Err(SiteBidError::Validation("Payment label cannot be empty".into()));
        }
        if !percent_of_total.is_finite() {
            return Err(SiteBidError::Validation(
                "Payment percentage must be a finite number".into(),
            ));
        }

        let mut project = self.load(id)?;
        if project.find_payment(label).is_some() {
            return Err(SiteBidError::Duplicate {
                entity_type: "Payment",
                identifier: label.to_string(),
            });
        }

        let mut entry = PaymentScheduleEntry::new(label, percent_of_total);
        entry.due_date = due_date;
        project.payment_schedule.push(entry.clone());

        let scheduled = scheduled_percent(&project.payment_schedule);
        if scheduled > 100.0 {
            warn!(project = %project.id, scheduled, "payment schedule exceeds 100%");
        }
        self.persist_quiet(project)?;

        self.storage.log_create(
            EntityType::Payment,
            entry.id.short(),
            Some(entry.label.clone()),
            &entry,
        )?;
        Ok(entry)
    }

    /// Record that an installment was received
    pub fn mark_paid(
        &self,
        id: ProjectId,
        payment_identifier: &str,
        paid_date: NaiveDate,
    ) -> SiteBidResult<PaymentScheduleEntry> {
        self.edit_payment(id, payment_identifier, |p| p.mark_paid(paid_date))
    }

    pub fn mark_unpaid(&self, id: ProjectId, payment_identifier: &str) -> SiteBidResult<PaymentScheduleEntry> {
        self.edit_payment(id, payment_identifier, |p| p.mark_unpaid())
    }

    pub fn remove_payment(&self, id: ProjectId, payment_identifier: &str) -> SiteBidResult<PaymentScheduleEntry> {
        let mut project = self.load(id)?;
        let entry = project
            .find_payment(payment_identifier)
            .cloned()
            .ok_or_else(|| SiteBidError::payment_not_found(payment_identifier))?;

        project.payment_schedule.retain(|p| p.id != entry.id);
        self.persist_quiet(project)?;

        self.storage.log_delete(
            EntityType::Payment,
            entry.id.short(),
            Some(entry.label.clone()),
            &entry,
        )?;
        Ok(entry)
    }

    fn edit_payment(
        &self,
        id: ProjectId,
        payment_identifier: &str,
        edit: impl FnOnce(&mut PaymentScheduleEntry),
    ) -> SiteBidResult<PaymentScheduleEntry> {
        let mut project = self.load(id)?;
        let before = project
            .find_payment(payment_identifier)
            .cloned()
            .ok_or_else(|| SiteBidError::payment_not_found(payment_identifier))?;

        let entry = match project.payment_mut(before.id) {
            Some(entry) => {
                edit(entry);
                entry.clone()
            }
            None => return Err(SiteBidError::payment_not_found(payment_identifier)),
        };
        self.persist_quiet(project)?;

        self.storage.log_update(
            EntityType::Payment,
            entry.id.short(),
            Some(entry.label.clone()),
            &before,
            &entry,
        )?;
        Ok(entry)
    }

    fn load(&self, id: ProjectId) -> SiteBidResult<Project> {
        self.storage
            .projects
            .get(id)?
            .ok_or_else(|| SiteBidError::project_not_found(id.short()))
    }

    /// Validate, save and audit a change to the project's own fields
    fn persist(&self, before: &Project, mut project: Project) -> SiteBidResult<Project> {
        project.touch();
        project
            .validate()
            .map_err(|e| SiteBidError::Validation(e.to_string()))?;

        self.storage.projects.upsert(project.clone())?;
        self.storage.projects.save()?;
        self.storage.log_update(
            EntityType::Project,
            project.id.short(),
            Some(project.name.clone()),
            before,
            &project,
        )?;
        Ok(project)
    }

    /// Save a change to a nested row; the row itself is audited by the caller
    fn persist_quiet(&self, mut project: Project) -> SiteBidResult<()> {
        project.touch();
        project
            .validate()
            .map_err(|e| SiteBidError::Validation(e.to_string()))?;

        self.storage.projects.upsert(project)?;
        self.storage.projects.save()
    }
}

fn validate_line_item(item: &LineItem) -> SiteBidResult<()> {
    if !item.quantity.is_finite() {
        return Err(SiteBidError::Validation("Quantity must be a finite number".into()));
    }
    if item.description.chars().count() > 200 {
        return Err(SiteBidError::Validation(
            "Line item description too long (max 200 chars)".into(),
        ));
    }
    Ok(())
}
