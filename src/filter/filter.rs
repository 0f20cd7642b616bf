use serde::Deserialize;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_string;
use super::filter_where::FilterWhere;
use super::types::{Column, FilterOrderInfo, FilterString, Predicate, QueryPlan, SortDirection, SqlClause, SqlResult};
use super::whitelist::{parse_bound, parse_direction, validate_bound, Whitelist};

/// Raw list parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterData {
    pub filters: Option<String>,
    pub order_by: Option<String>,
    pub order_type: Option<String>,
    pub offset: Option<String>,
    pub limit: Option<String>,
}

/// Whitelists an entity exposes to the filter layer.
#[derive(Debug, Clone, Copy)]
pub struct EntityFields<C: Column> {
    pub filters: Whitelist<C>,
    pub sorts: Whitelist<C>,
}

/// Builds a [`QueryPlan`] from client input, validating each piece in turn.
pub struct Filter<C: Column> {
    fields: EntityFields<C>,
    predicates: Vec<Predicate<C>>,
    order: Option<FilterOrderInfo<C>>,
    offset: i64,
    limit: i64,
}

impl<C: Column> Filter<C> {
    pub fn new(fields: EntityFields<C>, default_limit: i64) -> Self {
        Self {
            fields,
            predicates: vec![],
            order: None,
            offset: 0,
            limit: default_limit,
        }
    }

    /// Applies all list parameters; the first invalid one aborts.
    pub fn assign(&mut self, data: &FilterData) -> Result<&mut Self, FilterError> {
        self.where_clause(data.filters.as_deref())?;
        let direction = parse_direction(data.order_type.as_deref())?;
        self.order(data.order_by.as_deref(), direction)?;
        let offset = parse_bound(SqlClause::Skip, data.offset.as_deref(), 0)?;
        let limit = parse_bound(SqlClause::Limit, data.limit.as_deref(), self.limit)?;
        self.page(offset, limit)?;
        Ok(self)
    }

    pub fn where_clause(&mut self, raw: Option<&str>) -> Result<&mut Self, FilterError> {
        let terms = filter_string::parse(raw)?;
        self.where_terms(terms)
    }

    pub fn where_terms(&mut self, terms: FilterString) -> Result<&mut Self, FilterError> {
        self.predicates = self.fields.filters.validate_terms(terms)?;
        Ok(self)
    }

    pub fn order(&mut self, column: Option<&str>, sort: SortDirection) -> Result<&mut Self, FilterError> {
        self.order = self
            .fields
            .sorts
            .validate_order_column(column)?
            .map(|column| FilterOrderInfo { column, sort });
        Ok(self)
    }

    pub fn page(&mut self, offset: i64, limit: i64) -> Result<&mut Self, FilterError> {
        self.offset = validate_bound(SqlClause::Skip, offset)?;
        self.limit = validate_bound(SqlClause::Limit, limit)?;
        Ok(self)
    }

    pub fn build(self) -> QueryPlan<C> {
        QueryPlan {
            predicates: self.predicates,
            order: self.order,
            offset: self.offset,
            limit: self.limit,
        }
    }
}

impl<C: Column> QueryPlan<C> {
    /// Filtered, ordered and paginated select. Bounds are validated integers
    /// and are inlined; filter values are bound as parameters.
    pub fn to_sql(&self, table_name: &str) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.predicates, 0);
        let query = [
            format!("SELECT * FROM \"{}\"", table_name),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            FilterOrder::generate(self.order.as_ref()),
            format!("LIMIT {} OFFSET {}", self.limit, self.offset),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    /// Same predicates as [`to_sql`](Self::to_sql), no ordering or pagination.
    pub fn to_count_sql(&self, table_name: &str) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.predicates, 0);
        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", table_name)
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", table_name, where_clause)
        };
        SqlResult { query, params }
    }
}
