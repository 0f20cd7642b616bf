use thiserror::Error;

use super::types::SqlClause;

/// Client-caused query errors. The display text starts with a stable kind tag.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("INVALID_FILTER_STRING: filter string '{0}' must be a comma separated list of field:value pairs")]
    InvalidFilterString(String),

    #[error("INVALID_FIELDS_IN_FILTER_STRING: invalid fields [{}] in filter string, allowed fields are [{}]", .invalid.join(", "), .allowed.join(", "))]
    InvalidFields { invalid: Vec<String>, allowed: Vec<String> },

    #[error("INVALID_ORDERING_COLUMN_NAME: cannot order by '{column}', allowed columns are [{}]", .allowed.join(", "))]
    InvalidOrderingColumn { column: String, allowed: Vec<String> },

    #[error("INVALID_SQL_VALUE: invalid value '{value}' for {clause} clause")]
    InvalidSqlValue { clause: SqlClause, value: String },
}

impl FilterError {
    /// Stable kind tag, the prefix of the error message.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterError::InvalidFilterString(_) => "INVALID_FILTER_STRING",
            FilterError::InvalidFields { .. } => "INVALID_FIELDS_IN_FILTER_STRING",
            FilterError::InvalidOrderingColumn { .. } => "INVALID_ORDERING_COLUMN_NAME",
            FilterError::InvalidSqlValue { .. } => "INVALID_SQL_VALUE",
        }
    }
}
