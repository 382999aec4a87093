//! Cost service
//!
//! Records orders, labor and expenses against a project. Only the project
//! link and basic sanity are checked; amounts may be negative (credits,
//! refunds) and the engine sums them as given.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{SiteBidError, SiteBidResult};
use crate::models::{Expense, ExpenseStatus, LaborRecord, Order, ProjectId};
use crate::storage::Storage;

/// A record removed by [`CostService::delete`]
#[derive(Debug, Clone)]
pub enum RemovedRecord {
    Order(Order),
    Labor(LaborRecord),
    Expense(Expense),
}

impl RemovedRecord {
    pub fn describe(&self) -> String {
        match self {
            Self::Order(o) => format!("order {} ({})", o.id, o.vendor),
            Self::Labor(l) => format!("labor {} ({})", l.id, l.worker),
            Self::Expense(e) => format!("expense {} ({})", e.id, e.description),
        }
    }
}

pub struct CostService<'a> {
    storage: &'a Storage,
}

impl<'a> CostService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn record_order(&self, order: Order) -> SiteBidResult<Order> {
        self.ensure_project(order.project_id)?;
        if order.vendor.trim().is_empty() {
            return Err(SiteBidError::Validation("Vendor cannot be empty".into()));
        }

        self.storage.orders.upsert(order.clone())?;
        self.storage.orders.save()?;
        self.storage
            .log_create(EntityType::Order, order.id.short(), Some(order.vendor.clone()), &order)?;

        info!(project = %order.project_id, order = %order.id, amount = order.amount.minor(), "recorded order");
        Ok(order)
    }

    pub fn record_labor(&self, record: LaborRecord) -> SiteBidResult<LaborRecord> {
        self.ensure_project(record.project_id)?;
        if record.worker.trim().is_empty() {
            return Err(SiteBidError::Validation("Worker name cannot be empty".into()));
        }
        if !record.days.is_finite() || record.days < 0.0 {
            return Err(SiteBidError::Validation(
                "Days worked must be a non-negative number".into(),
            ));
        }

        self.storage.labor.upsert(record.clone())?;
        self.storage.labor.save()?;
        self.storage
            .log_create(EntityType::Labor, record.id.short(), Some(record.worker.clone()), &record)?;

        info!(project = %record.project_id, labor = %record.id, total = record.total().minor(), "recorded labor");
        Ok(record)
    }

    pub fn record_expense(&self, expense: Expense) -> SiteBidResult<Expense> {
        self.ensure_project(expense.project_id)?;
        if expense.description.trim().is_empty() {
            return Err(SiteBidError::Validation(
                "Expense description cannot be empty".into(),
            ));
        }

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        self.storage.log_create(
            EntityType::Expense,
            expense.id.short(),
            Some(expense.description.clone()),
            &expense,
        )?;

        info!(project = %expense.project_id, expense = %expense.id, status = %expense.status, "recorded expense");
        Ok(expense)
    }

    pub fn list_orders(&self, project_id: ProjectId) -> SiteBidResult<Vec<Order>> {
        self.storage.orders.get_by_project(project_id)
    }

    pub fn list_labor(&self, project_id: ProjectId) -> SiteBidResult<Vec<LaborRecord>> {
        self.storage.labor.get_by_project(project_id)
    }

    pub fn list_expenses(&self, project_id: ProjectId) -> SiteBidResult<Vec<Expense>> {
        self.storage.expenses.get_by_project(project_id)
    }

    pub fn approve_expense(&self, identifier: &str) -> SiteBidResult<Expense> {
        self.set_expense_status(identifier, ExpenseStatus::Approved)
    }

    pub fn reject_expense(&self, identifier: &str) -> SiteBidResult<Expense> {
        self.set_expense_status(identifier, ExpenseStatus::Rejected)
    }

    fn set_expense_status(&self, identifier: &str, status: ExpenseStatus) -> SiteBidResult<Expense> {
        let before = self
            .storage
            .expenses
            .find(identifier)?
            .ok_or_else(|| SiteBidError::record_not_found("Expense", identifier))?;

        let expense = before.clone().with_status(status);
        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;
        self.storage.log_update(
            EntityType::Expense,
            expense.id.short(),
            Some(expense.description.clone()),
            &before,
            &expense,
        )?;

        info!(expense = %expense.id, status = %status, "changed expense status");
        Ok(expense)
    }

    /// Delete an order, labor record or expense by its short id
    ///
    /// The id prefix (`ord-`, `lab-`, `exp-`) tells the kinds apart.
    pub fn delete(&self, identifier: &str) -> SiteBidResult<RemovedRecord> {
        if let Some(order) = self.storage.orders.find(identifier)? {
            self.storage.orders.delete(order.id)?;
            self.storage.orders.save()?;
            self.storage
                .log_delete(EntityType::Order, order.id.short(), Some(order.vendor.clone()), &order)?;
            return Ok(RemovedRecord::Order(order));
        }

        if let Some(record) = self.storage.labor.find(identifier)? {
            self.storage.labor.delete(record.id)?;
            self.storage.labor.save()?;
            self.storage
                .log_delete(EntityType::Labor, record.id.short(), Some(record.worker.clone()), &record)?;
            return Ok(RemovedRecord::Labor(record));
        }

        if let Some(expense) = self.storage.expenses.find(identifier)? {
            self.storage.expenses.delete(expense.id)?;
            self.storage.expenses.save()?;
            self.storage.log_delete(
                EntityType::Expense,
                expense.id.short(),
                Some(expense.description.clone()),
                &expense,
            )?;
            return Ok(RemovedRecord::Expense(expense));
        }

        Err(SiteBidError::record_not_found("Cost record", identifier))
    }

    fn ensure_project(&self, project_id: ProjectId) -> SiteBidResult<()> {
        if self.storage.projects.get(project_id)?.is_none() {
            return Err(SiteBidError::project_not_found(project_id.short()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SiteBidPaths;
    use crate::models::{Money, Project};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Storage, ProjectId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SiteBidPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let project = Project::new("Cost target");
        let id = project.id;
        storage.projects.upsert(project).unwrap();
        (temp_dir, storage, id)
    }

    #[test]
    fn test_record_and_list() {
        let (_temp, storage, project) = setup();
        let service = CostService::new(&storage);

        service
            .record_order(Order::new(project, "Floor Mart", Money::from_major(50_000)))
            .unwrap();
        service
            .record_labor(LaborRecord::new(project, "Choi", Money::from_major(200_000), 1.5))
            .unwrap();
        service
            .record_expense(Expense::new(project, "Parking", Money::from_major(3_000)))
            .unwrap();

        assert_eq!(service.list_orders(project).unwrap().len(), 1);
        assert_eq!(service.list_labor(project).unwrap()[0].total(), Money::from_major(300_000));
        assert_eq!(
            service.list_expenses(project).unwrap()[0].status,
            ExpenseStatus::Pending
        );
    }

    #[test]
    fn test_unknown_project_rejected() {
        let (_temp, storage, _project) = setup();
        let service = CostService::new(&storage);

        let err = service
            .record_order(Order::new(ProjectId::new(), "Floor Mart", Money::from_major(1)))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation() {
        let (_temp, storage, project) = setup();
        let service = CostService::new(&storage);

        assert!(service
            .record_order(Order::new(project, " ", Money::from_major(1)))
            .unwrap_err()
            .is_validation());
        assert!(service
            .record_labor(LaborRecord::new(project, "Choi", Money::from_major(1), -1.0))
            .unwrap_err()
            .is_validation());
        assert!(service
            .record_expense(Expense::new(project, "", Money::from_major(1)))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_approve_and_reject() {
        let (_temp, storage, project) = setup();
        let service = CostService::new(&storage);
        let expense = service
            .record_expense(Expense::new(project, "Snacks", Money::from_major(3_000)))
            .unwrap();

        let approved = service.approve_expense(&expense.id.short()).unwrap();
        assert!(approved.is_approved());

        let rejected = service.reject_expense(&expense.id.short()).unwrap();
        assert_eq!(rejected.status, ExpenseStatus::Rejected);

        assert!(service.approve_expense("exp-ffffffff").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_by_prefixed_id() {
        let (_temp, storage, project) = setup();
        let service = CostService::new(&storage);
        let order = service
            .record_order(Order::new(project, "Floor Mart", Money::from_major(1)))
            .unwrap();
        let labor = service
            .record_labor(LaborRecord::new(project, "Park", Money::from_major(1), 1.0))
            .unwrap();

        assert!(matches!(
            service.delete(&labor.id.short()).unwrap(),
            RemovedRecord::Labor(_)
        ));
        assert!(matches!(
            service.delete(&order.id.short()).unwrap(),
            RemovedRecord::Order(_)
        ));
        assert!(service.delete(&order.id.short()).unwrap_err().is_not_found());
    }
}
