use super::types::{Column, FilterOrderInfo};

pub struct FilterOrder;

impl FilterOrder {
    /// `ORDER BY` clause; the primary key always closes the ordering so that
    /// pagination is deterministic.
    pub fn generate<C: Column>(order: Option<&FilterOrderInfo<C>>) -> String {
        let pk = C::primary_key();
        match order {
            None => format!("ORDER BY \"{}\" ASC", pk.sql_name()),
            Some(info) if info.column == pk => {
                format!("ORDER BY \"{}\" {}", pk.sql_name(), info.sort.to_sql())
            }
            Some(info) => format!(
                "ORDER BY \"{}\" {}, \"{}\" ASC",
                info.column.sql_name(),
                info.sort.to_sql(),
                pk.sql_name()
            ),
        }
    }
}
