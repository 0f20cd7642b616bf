use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::phone_number_type::TABLE_NAME;
use crate::database::models::{PhoneNumberType, PhoneNumberTypeColumn};
use crate::database::repository::Repository;
use crate::filter::QueryPlan;

pub type PhoneNumberTypePlan = QueryPlan<PhoneNumberTypeColumn>;

/// Persistence for phone number types. Each call is a single round trip.
#[async_trait]
pub trait PhoneNumberTypeStore: Send + Sync {
    /// Rows accepted by the plan's predicates, ordered and paginated.
    async fn select(&self, plan: &PhoneNumberTypePlan) -> Result<Vec<PhoneNumberType>, DatabaseError>;

    /// Number of rows accepted by the plan's predicates.
    async fn count(&self, plan: &PhoneNumberTypePlan) -> Result<i64, DatabaseError>;

    async fn find(&self, id: i32) -> Result<Option<PhoneNumberType>, DatabaseError>;

    /// Stores a new row and returns the id the store assigned.
    async fn insert(&self, name: &str, modified_date: DateTime<Utc>) -> Result<i32, DatabaseError>;

    /// Returns false when no row has that id.
    async fn update(&self, id: i32, name: &str, modified_date: DateTime<Utc>) -> Result<bool, DatabaseError>;

    /// Returns false when no row has that id.
    async fn delete(&self, id: i32) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

pub struct PgPhoneNumberTypeStore {
    repository: Repository<PhoneNumberType>,
}

impl PgPhoneNumberTypeStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: Repository::new(TABLE_NAME, pool),
        }
    }
}

#[async_trait]
impl PhoneNumberTypeStore for PgPhoneNumberTypeStore {
    async fn select(&self, plan: &PhoneNumberTypePlan) -> Result<Vec<PhoneNumberType>, DatabaseError> {
        self.repository.select_any(plan).await
    }

    async fn count(&self, plan: &PhoneNumberTypePlan) -> Result<i64, DatabaseError> {
        self.repository.count(plan).await
    }

    async fn find(&self, id: i32) -> Result<Option<PhoneNumberType>, DatabaseError> {
        self.repository.select_by_id(id).await
    }

    async fn insert(&self, name: &str, modified_date: DateTime<Utc>) -> Result<i32, DatabaseError> {
        let sql = format!(
            "INSERT INTO \"{}\" (\"name\", \"modified_date\") VALUES ($1, $2) RETURNING \"id\"",
            self.repository.table_name()
        );
        let id = sqlx::query_scalar::<_, i32>(&sql)
            .bind(name)
            .bind(modified_date)
            .fetch_one(self.repository.pool())
            .await?;
        Ok(id)
    }

    async fn update(&self, id: i32, name: &str, modified_date: DateTime<Utc>) -> Result<bool, DatabaseError> {
        let sql = format!(
            "UPDATE \"{}\" SET \"name\" = $1, \"modified_date\" = $2 WHERE \"id\" = $3",
            self.repository.table_name()
        );
        let result = sqlx::query(&sql)
            .bind(name)
            .bind(modified_date)
            .bind(id)
            .execute(self.repository.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        self.repository.delete_by_id(id).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(self.repository.pool()).await
    }
}
