use async_trait::async_trait;
use entity::employee::{self, Employee, NewEmployee};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;

use crate::{DbPool, DbResult};

/// Access point for persisted employees.
///
/// Every call is a single unit of work against the backing database; callers
/// never see partially applied batches.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Insert every record in one transaction, returning them with their
    /// assigned ids in input order.
    async fn save_all(&self, records: Vec<NewEmployee>) -> DbResult<Vec<Employee>>;

    /// Insert when `id` is unset, update the changed columns otherwise.
    async fn save(&self, record: employee::ActiveModel) -> DbResult<Employee>;

    async fn find_all(&self) -> DbResult<Vec<Employee>>;

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Employee>>;

    /// Lowest-id employee carrying `last_name`.
    async fn find_by_last_name(&self, last_name: &str) -> DbResult<Option<Employee>>;

    async fn delete(&self, record: Employee) -> DbResult<()>;

    /// Remove every employee, returning how many rows went away.
    async fn delete_all(&self) -> DbResult<u64>;
}

/// [`EmployeeStore`] backed by a sea-orm connection pool.
#[derive(Clone, Debug)]
pub struct SeaOrmEmployeeStore {
    pool: DbPool,
}

impl SeaOrmEmployeeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for SeaOrmEmployeeStore {
    async fn save_all(&self, records: Vec<NewEmployee>) -> DbResult<Vec<Employee>> {
        let txn = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            saved.push(record.into_active_model().insert(&txn).await?);
        }
        txn.commit().await?;
        debug!(count = saved.len(), "employees inserted");
        Ok(saved)
    }

    async fn save(&self, record: employee::ActiveModel) -> DbResult<Employee> {
        let model = if matches!(record.id, ActiveValue::NotSet) {
            record.insert(&self.pool).await?
        } else {
            record.update(&self.pool).await?
        };
        Ok(model)
    }

    async fn find_all(&self) -> DbResult<Vec<Employee>> {
        let rows = employee::Entity::find()
            .order_by_asc(employee::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<Employee>> {
        let row = employee::Entity::find_by_id(id).one(&self.pool).await?;
        Ok(row)
    }

    async fn find_by_last_name(&self, last_name: &str) -> DbResult<Option<Employee>> {
        let row = employee::Entity::find()
            .filter(employee::Column::LastName.eq(last_name))
            .order_by_asc(employee::Column::Id)
            .one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, record: Employee) -> DbResult<()> {
        let result = record.delete(&self.pool).await?;
        debug!(rows = result.rows_affected, "employee deleted");
        Ok(())
    }

    async fn delete_all(&self) -> DbResult<u64> {
        let result = employee::Entity::delete_many().exec(&self.pool).await?;
        Ok(result.rows_affected)
    }
}

/// The fixed demo roster inserted by the seed route and CLI command.
pub fn seed_roster() -> Vec<NewEmployee> {
    vec![
        NewEmployee::new("Alex", "Behrman", "alex@email.com"),
        NewEmployee::new("Emily", "Davitt", "emily@email.com"),
        NewEmployee::new("Cal", "Notman", "cal@email.com"),
        NewEmployee::new("Shashank", "Singh", "shashank@email.com"),
    ]
}

pub async fn seed_employees(store: &dyn EmployeeStore) -> DbResult<Vec<Employee>> {
    store.save_all(seed_roster()).await
}
