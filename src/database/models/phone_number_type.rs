use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::filter::{Column, EntityFields, Whitelist};

pub const TABLE_NAME: &str = "phone_number_type";

/// Entity name used in error messages and count responses.
pub const ENTITY_NAME: &str = "phone_number_type";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PhoneNumberType {
    pub id: i32,
    pub name: String,
    pub modified_date: DateTime<Utc>,
}

/// Mutable fields accepted on create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumberTypeInput {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneNumberTypeColumn {
    Id,
    Name,
    ModifiedDate,
}

impl Column for PhoneNumberTypeColumn {
    fn sql_name(&self) -> &'static str {
        match self {
            PhoneNumberTypeColumn::Id => "id",
            PhoneNumberTypeColumn::Name => "name",
            PhoneNumberTypeColumn::ModifiedDate => "modified_date",
        }
    }

    fn primary_key() -> Self {
        PhoneNumberTypeColumn::Id
    }
}

pub const FIELDS: EntityFields<PhoneNumberTypeColumn> = EntityFields {
    filters: Whitelist::new(&[("name_phrase", PhoneNumberTypeColumn::Name)]),
    sorts: Whitelist::new(&[
        ("id", PhoneNumberTypeColumn::Id),
        ("name", PhoneNumberTypeColumn::Name),
        ("modified_date", PhoneNumberTypeColumn::ModifiedDate),
    ]),
};

impl PhoneNumberType {
    /// Text of a column as a substring predicate sees it.
    pub fn column_text(&self, column: PhoneNumberTypeColumn) -> String {
        match column {
            PhoneNumberTypeColumn::Id => self.id.to_string(),
            PhoneNumberTypeColumn::Name => self.name.clone(),
            PhoneNumberTypeColumn::ModifiedDate => self.modified_date.to_rfc3339(),
        }
    }

    pub fn cmp_by(&self, other: &Self, column: PhoneNumberTypeColumn) -> Ordering {
        match column {
            PhoneNumberTypeColumn::Id => self.id.cmp(&other.id),
            PhoneNumberTypeColumn::Name => self.name.cmp(&other.name),
            PhoneNumberTypeColumn::ModifiedDate => self.modified_date.cmp(&other.modified_date),
        }
    }
}
