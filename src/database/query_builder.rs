use std::time::Instant;

use sqlx::{self, postgres::PgRow, FromRow, PgPool, Row};

use crate::config;
use crate::database::manager::DatabaseError;
use crate::filter::{Column, QueryPlan, SqlResult};

/// Executes rendered query plans against one table.
pub struct QueryBuilder<T> {
    table_name: &'static str,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_all<C: Column>(&self, plan: &QueryPlan<C>, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = plan.to_sql(self.table_name);
        log_query(&sql_result);

        let started = Instant::now();
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = q.bind(p);
        }
        let rows = q.fetch_all(pool).await?;
        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, rows = rows.len(), "select finished");
        Ok(rows)
    }

    pub async fn count<C: Column>(&self, plan: &QueryPlan<C>, pool: &PgPool) -> Result<i64, DatabaseError> {
        let sql_result = plan.to_count_sql(self.table_name);
        log_query(&sql_result);

        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = q.bind(p);
        }
        let row = q.fetch_one(pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}

fn log_query(sql_result: &SqlResult) {
    if config::config().database.enable_query_logging {
        tracing::debug!(query = %sql_result.query, params = ?sql_result.params, "executing query");
    }
}
