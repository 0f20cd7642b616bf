use std::fmt;

/// One `field:value` segment of a filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTerm {
    pub field: String,
    pub value: String,
}

/// Ordered terms of a parsed filter string.
pub type FilterString = Vec<FilterTerm>;

/// Internal column identifier an entity exposes to the filter layer.
///
/// Implemented by a fixed enum per entity so whitelists are compile-time
/// constants rather than runtime dictionaries.
pub trait Column: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Quoted-safe SQL identifier of the column.
    fn sql_name(&self) -> &'static str;

    /// Column used for default ordering and as the ordering tie-breaker.
    fn primary_key() -> Self;
}

/// Case-insensitive substring match of `value` against `column`.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate<C: Column> {
    pub column: C,
    pub value: String,
}

impl<C: Column> Predicate<C> {
    /// Evaluates the predicate against an in-process column value.
    ///
    /// Case folding is Unicode lowercasing, which agrees with `ILIKE` on a
    /// database with a UTF-8 locale collation. Under the `C` collation Postgres
    /// folds ASCII only, so non-ASCII letters such as `É` may match here but
    /// not there. Expansions like `ß` to `ss` are never applied by either.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.to_lowercase().contains(&self.value.to_lowercase())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo<C: Column> {
    pub column: C,
    pub sort: SortDirection,
}

/// SQL clause a numeric bound belongs to, named in `INVALID_SQL_VALUE` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlClause {
    Skip,
    Limit,
    OrderBy,
}

impl fmt::Display for SqlClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlClause::Skip => write!(f, "SKIP"),
            SqlClause::Limit => write!(f, "LIMIT"),
            SqlClause::OrderBy => write!(f, "ORDER BY"),
        }
    }
}

/// Validated, store-agnostic query: predicates, ordering and bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan<C: Column> {
    pub predicates: Vec<Predicate<C>>,
    pub order: Option<FilterOrderInfo<C>>,
    pub offset: i64,
    pub limit: i64,
}

impl<C: Column> QueryPlan<C> {
    /// Plan with no predicates over the default ordering.
    pub fn unfiltered(offset: i64, limit: i64) -> Self {
        Self { predicates: vec![], order: None, offset, limit }
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}
