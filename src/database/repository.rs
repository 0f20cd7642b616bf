use sqlx::{self, postgres::PgRow, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::query_builder::QueryBuilder;
use crate::filter::{Column, QueryPlan};

/// Read access to a table keyed by an integer `id`.
pub struct Repository<T> {
    table_name: &'static str,
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str, pool: PgPool) -> Self {
        Self {
            table_name,
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table_name(&self) -> &'static str {
        self.table_name
    }

    pub async fn select_any<C: Column>(&self, plan: &QueryPlan<C>) -> Result<Vec<T>, DatabaseError> {
        QueryBuilder::<T>::new(self.table_name).select_all(plan, &self.pool).await
    }

    pub async fn select_by_id(&self, id: i32) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" WHERE \"id\" = $1", self.table_name);
        let row = sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    pub async fn count<C: Column>(&self, plan: &QueryPlan<C>) -> Result<i64, DatabaseError> {
        QueryBuilder::<T>::new(self.table_name).count(plan, &self.pool).await
    }

    pub async fn delete_by_id(&self, id: i32) -> Result<bool, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = $1", self.table_name);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
