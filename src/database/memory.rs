//! In-process stores for development and tests.
//!
//! They interpret query plans directly: the same case-insensitive substring
//! predicates, primary-key tie-breaking and offset/limit window as the SQL
//! rendering.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{PhoneNumberType, UserAccount};
use crate::database::phone_number_types::{PhoneNumberTypePlan, PhoneNumberTypeStore};
use crate::database::users::{UserStore, UserStoreError};
use crate::filter::SortDirection;

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, PhoneNumberType>,
}

/// Phone number types kept in id order, ids assigned from 1.
#[derive(Clone, Default)]
pub struct InMemoryPhoneNumberTypeStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryPhoneNumberTypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn filtered(table: &Table, plan: &PhoneNumberTypePlan) -> Vec<PhoneNumberType> {
        table
            .rows
            .values()
            .filter(|row| plan.predicates.iter().all(|p| p.matches(&row.column_text(p.column))))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PhoneNumberTypeStore for InMemoryPhoneNumberTypeStore {
    async fn select(&self, plan: &PhoneNumberTypePlan) -> Result<Vec<PhoneNumberType>, DatabaseError> {
        let table = self.table.read().await;
        // Rows come out in id order, and the sort is stable, so id is the tie-breaker.
        let mut rows = Self::filtered(&table, plan);
        if let Some(order) = &plan.order {
            rows.sort_by(|a, b| {
                let ord = a.cmp_by(b, order.column);
                match order.sort {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        Ok(rows
            .into_iter()
            .skip(plan.offset as usize)
            .take(plan.limit as usize)
            .collect())
    }

    async fn count(&self, plan: &PhoneNumberTypePlan) -> Result<i64, DatabaseError> {
        let table = self.table.read().await;
        Ok(Self::filtered(&table, plan).len() as i64)
    }

    async fn find(&self, id: i32) -> Result<Option<PhoneNumberType>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, name: &str, modified_date: DateTime<Utc>) -> Result<i32, DatabaseError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(
            id,
            PhoneNumberType {
                id,
                name: name.to_string(),
                modified_date,
            },
        );
        Ok(id)
    }

    async fn update(&self, id: i32, name: &str, modified_date: DateTime<Utc>) -> Result<bool, DatabaseError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                row.name = name.to_string();
                row.modified_date = modified_date;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    accounts: Arc<RwLock<HashMap<String, UserAccount>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserAccount>, UserStoreError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn insert(&self, account: UserAccount) -> Result<(), UserStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.username) {
            return Err(UserStoreError::AlreadyExists(account.username));
        }
        accounts.insert(account.username.clone(), account);
        Ok(())
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        Ok(())
    }
}
