use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::database::models::phone_number_type::{ENTITY_NAME, FIELDS};
use crate::database::models::{PhoneNumberType, PhoneNumberTypeColumn, PhoneNumberTypeInput};
use crate::database::{DatabaseError, PhoneNumberTypeStore};
use crate::filter::{Filter, FilterData, FilterError, QueryPlan};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("NOT_FOUND: {entity} with id {id} does not exist")]
    NotFound { entity: &'static str, id: i32 },

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Owns the lifecycle of phone number types: validates list parameters into a
/// query plan before the store is touched, and maps missing ids to `NotFound`.
pub struct PhoneNumberTypeProvider {
    store: Arc<dyn PhoneNumberTypeStore>,
    default_limit: i64,
    audit: bool,
    trace_plans: bool,
}

impl PhoneNumberTypeProvider {
    pub fn new(store: Arc<dyn PhoneNumberTypeStore>, default_limit: i64) -> Self {
        Self {
            store,
            default_limit,
            audit: false,
            trace_plans: false,
        }
    }

    /// Log every mutation at info level.
    pub fn with_audit(mut self, audit: bool) -> Self {
        self.audit = audit;
        self
    }

    /// Log every validated query plan at debug level.
    pub fn with_plan_tracing(mut self, trace_plans: bool) -> Self {
        self.trace_plans = trace_plans;
        self
    }

    pub fn store(&self) -> &Arc<dyn PhoneNumberTypeStore> {
        &self.store
    }

    pub fn plan(&self, data: &FilterData) -> Result<QueryPlan<PhoneNumberTypeColumn>, FilterError> {
        let mut filter = Filter::new(FIELDS, self.default_limit);
        filter.assign(data).inspect_err(|e| debug!(kind = e.kind(), "rejected list parameters: {}", e))?;
        let plan = filter.build();
        if self.trace_plans {
            debug!(?plan, "built query plan");
        }
        Ok(plan)
    }

    pub async fn list(&self, data: &FilterData) -> Result<Vec<PhoneNumberType>, ProviderError> {
        let plan = self.plan(data)?;
        Ok(self.store.select(&plan).await?)
    }

    pub async fn count(&self, filters: Option<&str>) -> Result<i64, ProviderError> {
        let mut filter = Filter::new(FIELDS, self.default_limit);
        filter.where_clause(filters)?;
        Ok(self.store.count(&filter.build()).await?)
    }

    pub async fn get(&self, id: i32) -> Result<PhoneNumberType, ProviderError> {
        self.store
            .find(id)
            .await?
            .ok_or(ProviderError::NotFound { entity: ENTITY_NAME, id })
    }

    pub async fn insert(&self, input: &PhoneNumberTypeInput) -> Result<i32, ProviderError> {
        let id = self.store.insert(&input.name, Utc::now()).await?;
        if self.audit {
            info!(entity = ENTITY_NAME, id, "inserted");
        }
        Ok(id)
    }

    pub async fn update(&self, id: i32, input: &PhoneNumberTypeInput) -> Result<i32, ProviderError> {
        if !self.store.update(id, &input.name, Utc::now()).await? {
            return Err(ProviderError::NotFound { entity: ENTITY_NAME, id });
        }
        if self.audit {
            info!(entity = ENTITY_NAME, id, "updated");
        }
        Ok(id)
    }

    pub async fn delete(&self, id: i32) -> Result<(), ProviderError> {
        if !self.store.delete(id).await? {
            return Err(ProviderError::NotFound { entity: ENTITY_NAME, id });
        }
        if self.audit {
            info!(entity = ENTITY_NAME, id, "deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryPhoneNumberTypeStore;

    const SEED: [&str; 5] = ["Cell", "Mobile", "Home", "Home 2", "Home em."];

    async fn provider() -> PhoneNumberTypeProvider {
        let provider = PhoneNumberTypeProvider::new(Arc::new(InMemoryPhoneNumberTypeStore::new()), 100);
        for name in SEED {
            provider.insert(&PhoneNumberTypeInput { name: name.to_string() }).await.unwrap();
        }
        provider
    }

    fn filters(f: &str) -> FilterData {
        FilterData { filters: Some(f.to_string()), ..Default::default() }
    }

    async fn names(provider: &PhoneNumberTypeProvider, data: FilterData) -> Vec<String> {
        provider.list(&data).await.unwrap().into_iter().map(|r| r.name).collect()
    }

    #[tokio::test]
    async fn substring_match_is_literal_and_whitespace_sensitive() {
        let p = provider().await;
        assert_eq!(names(&p, filters("name_phrase:hom")).await, vec!["Home", "Home 2", "Home em."]);
        assert_eq!(names(&p, filters("name_phrase:home ")).await, vec!["Home 2", "Home em."]);
        assert!(names(&p, filters("name_phrase:hom ")).await.is_empty());
    }

    #[tokio::test]
    async fn ordering_and_pagination_compose_with_filtering() {
        let p = provider().await;
        let desc = FilterData {
            filters: Some("name_phrase:hom".to_string()),
            order_by: Some("name".to_string()),
            order_type: Some("desc".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&p, desc).await, vec!["Home em.", "Home 2", "Home"]);

        let page = FilterData {
            filters: Some("name_phrase:hom".to_string()),
            order_by: Some("name".to_string()),
            order_type: Some("asc".to_string()),
            offset: Some("1".to_string()),
            limit: Some("1".to_string()),
        };
        assert_eq!(names(&p, page).await, vec!["Home 2"]);
    }

    #[tokio::test]
    async fn count_matches_unpaginated_list() {
        let p = provider().await;
        for f in ["name_phrase:hom", "name_phrase:home ", "name_phrase:e", "name_phrase:zzz"] {
            let listed = p.list(&filters(f)).await.unwrap().len() as i64;
            assert_eq!(p.count(Some(f)).await.unwrap(), listed, "filter {:?}", f);
        }
        assert_eq!(p.count(None).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn validation_errors_surface_before_the_store() {
        let p = provider().await;
        let err = p.list(&filters("nope:1")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Filter(FilterError::InvalidFields { .. })));

        let err = p.count(Some("name_phrase")).await.unwrap_err();
        assert!(matches!(err, ProviderError::Filter(FilterError::InvalidFilterString(_))));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let p = provider().await;
        let input = PhoneNumberTypeInput { name: "Fax".to_string() };
        assert!(matches!(p.get(42).await, Err(ProviderError::NotFound { id: 42, .. })));
        assert!(matches!(p.update(42, &input).await, Err(ProviderError::NotFound { id: 42, .. })));
        assert!(matches!(p.delete(42).await, Err(ProviderError::NotFound { id: 42, .. })));

        let err = p.get(42).await.unwrap_err();
        assert_eq!(err.to_string(), "NOT_FOUND: phone_number_type with id 42 does not exist");
    }

    #[tokio::test]
    async fn insert_then_get_round_trip() {
        let p = provider().await;
        let id = p.insert(&PhoneNumberTypeInput { name: "Fax".to_string() }).await.unwrap();
        let record = p.get(id).await.unwrap();
        assert_eq!(record.name, "Fax");
        assert!(record.modified_date <= Utc::now());
    }

    #[tokio::test]
    async fn update_refreshes_name_and_timestamp() {
        let p = provider().await;
        let before = p.get(1).await.unwrap();
        let id = p.update(1, &PhoneNumberTypeInput { name: "Work".to_string() }).await.unwrap();
        let after = p.get(id).await.unwrap();
        assert_eq!(after.name, "Work");
        assert!(after.modified_date >= before.modified_date);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let p = provider().await;
        p.delete(2).await.unwrap();
        assert!(matches!(p.get(2).await, Err(ProviderError::NotFound { .. })));
        assert_eq!(p.count(None).await.unwrap(), 4);
    }
}
