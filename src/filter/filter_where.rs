use super::types::{Column, Predicate};

/// Renders conjoined substring predicates as positional-parameter SQL.
pub struct FilterWhere {
    param_values: Vec<String>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Returns the condition (without `WHERE`) and its bound values; an empty
    /// predicate list yields an empty condition.
    pub fn generate<C: Column>(predicates: &[Predicate<C>], starting_param_index: usize) -> (String, Vec<String>) {
        let mut filter_where = Self::new(starting_param_index);
        let conditions: Vec<String> = predicates.iter().map(|p| filter_where.build_condition(p)).collect();
        (conditions.join(" AND "), filter_where.param_values)
    }

    fn build_condition<C: Column>(&mut self, predicate: &Predicate<C>) -> String {
        let pattern = format!("%{}%", escape_like(&predicate.value));
        format!("\"{}\" ILIKE {} ESCAPE '\\'", predicate.column.sql_name(), self.param(pattern))
    }

    fn param(&mut self, value: String) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escapes LIKE wildcards so the value matches literally.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Name;

    impl Column for Name {
        fn sql_name(&self) -> &'static str {
            "name"
        }

        fn primary_key() -> Self {
            Name
        }
    }

    #[test]
    fn empty_predicates_render_nothing() {
        let (sql, params) = FilterWhere::generate::<Name>(&[], 0);
        assert!(sql.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn predicates_are_parameterized_and_conjoined() {
        let predicates = vec![
            Predicate { column: Name, value: "home ".to_string() },
            Predicate { column: Name, value: "2".to_string() },
        ];
        let (sql, params) = FilterWhere::generate(&predicates, 0);
        assert_eq!(sql, "\"name\" ILIKE $1 ESCAPE '\\' AND \"name\" ILIKE $2 ESCAPE '\\'");
        assert_eq!(params, vec!["%home %".to_string(), "%2%".to_string()]);
    }

    #[test]
    fn wildcards_in_values_are_literal() {
        let predicates = vec![Predicate { column: Name, value: "50%_off\\".to_string() }];
        let (_, params) = FilterWhere::generate(&predicates, 0);
        assert_eq!(params, vec!["%50\\%\\_off\\\\%".to_string()]);
    }

    #[test]
    fn values_never_reach_the_sql_text() {
        let predicates = vec![Predicate { column: Name, value: "'; DROP TABLE x; --".to_string() }];
        let (sql, _) = FilterWhere::generate(&predicates, 0);
        assert!(!sql.contains("DROP"));
    }
}
