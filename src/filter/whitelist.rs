use std::collections::BTreeSet;

use super::error::FilterError;
use super::types::{Column, FilterString, Predicate, SortDirection, SqlClause};

/// Externally visible field names an entity accepts, mapped to its columns.
///
/// Filter fields and sortable columns are declared as separate whitelists.
#[derive(Debug, Clone, Copy)]
pub struct Whitelist<C: Column> {
    entries: &'static [(&'static str, C)],
}

impl<C: Column> Whitelist<C> {
    pub const fn new(entries: &'static [(&'static str, C)]) -> Self {
        Self { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<C> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
    }

    /// Allowed names, sorted.
    pub fn names(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self.entries.iter().map(|(n, _)| *n).collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Maps every term onto its column, or reports all unknown fields at once.
    pub fn validate_terms(&self, terms: FilterString) -> Result<Vec<Predicate<C>>, FilterError> {
        let invalid: BTreeSet<&str> = terms
            .iter()
            .map(|t| t.field.as_str())
            .filter(|f| self.lookup(f).is_none())
            .collect();

        if !invalid.is_empty() {
            return Err(FilterError::InvalidFields {
                invalid: invalid.into_iter().map(str::to_string).collect(),
                allowed: self.names(),
            });
        }

        Ok(terms
            .into_iter()
            .filter_map(|t| self.lookup(&t.field).map(|column| Predicate { column, value: t.value }))
            .collect())
    }

    /// Absent column is valid and means default ordering.
    pub fn validate_order_column(&self, column: Option<&str>) -> Result<Option<C>, FilterError> {
        match column {
            None => Ok(None),
            Some(name) => self.lookup(name).map(Some).ok_or_else(|| FilterError::InvalidOrderingColumn {
                column: name.to_string(),
                allowed: self.names(),
            }),
        }
    }
}

/// Rejects negative offsets and limits.
pub fn validate_bound(clause: SqlClause, value: i64) -> Result<i64, FilterError> {
    if value < 0 {
        return Err(FilterError::InvalidSqlValue { clause, value: value.to_string() });
    }
    Ok(value)
}

/// Parses a raw query-string bound, falling back to `default` when absent.
pub fn parse_bound(clause: SqlClause, raw: Option<&str>, default: i64) -> Result<i64, FilterError> {
    match raw {
        None => validate_bound(clause, default),
        Some(s) => {
            let value = s
                .parse::<i64>()
                .map_err(|_| FilterError::InvalidSqlValue { clause, value: s.to_string() })?;
            validate_bound(clause, value)
        }
    }
}

pub fn parse_direction(raw: Option<&str>) -> Result<SortDirection, FilterError> {
    match raw {
        None => Ok(SortDirection::Asc),
        Some(s) if s.eq_ignore_ascii_case("asc") => Ok(SortDirection::Asc),
        Some(s) if s.eq_ignore_ascii_case("desc") => Ok(SortDirection::Desc),
        Some(s) => Err(FilterError::InvalidSqlValue { clause: SqlClause::OrderBy, value: s.to_string() }),
    }
}
