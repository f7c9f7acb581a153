//! Dynamic WHERE-clause builder shared by the list repositories.
//!
//! List endpoints filter on optional status/priority/search parameters, so
//! their queries are assembled at runtime with positional binds. The builder
//! keeps conditions and typed bind values together so the bind order always
//! matches the placeholder order.

use chrono::NaiveDate;
use taskdeck_core::types::DbId;

/// Typed bind value for dynamically-built queries.
pub(crate) enum BindValue {
    BigInt(DbId),
    Text(String),
    Date(NaiveDate),
}

/// Accumulates `AND`-joined conditions and their bind values.
pub(crate) struct QueryFilter {
    conditions: Vec<String>,
    binds: Vec<BindValue>,
}

impl QueryFilter {
    pub fn new() -> Self {
        QueryFilter {
            conditions: Vec::new(),
            binds: Vec::new(),
        }
    }

    /// Index the next pushed bind will occupy (`$1`-based).
    pub fn next_bind_index(&self) -> u32 {
        self.binds.len() as u32 + 1
    }

    /// Add `column = $n`.
    pub fn eq(&mut self, column: &str, value: BindValue) {
        let idx = self.next_bind_index();
        self.conditions.push(format!("{column} = ${idx}"));
        self.binds.push(value);
    }

    /// Add a case-insensitive substring match over one or more columns,
    /// OR-joined: `(a ILIKE $n OR b ILIKE $n+1)`.
    pub fn ilike_any(&mut self, columns: &[&str], term: &str) {
        let pattern = format!("%{term}%");
        let mut parts = Vec::with_capacity(columns.len());
        for column in columns {
            let idx = self.next_bind_index();
            parts.push(format!("{column} ILIKE ${idx}"));
            self.binds.push(BindValue::Text(pattern.clone()));
        }
        self.conditions.push(format!("({})", parts.join(" OR ")));
    }

    /// Add a condition built from the next bind index (for EXISTS
    /// sub-queries and other non-equality shapes).
    pub fn condition_with(&mut self, value: BindValue, build: impl FnOnce(u32) -> String) {
        let idx = self.next_bind_index();
        self.conditions.push(build(idx));
        self.binds.push(value);
    }

    /// Add a bare condition with no bind value.
    pub fn raw(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    /// Render the clause: empty when no conditions, else `WHERE a AND b`.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }
}

/// Bind accumulated values to a sqlx `QueryAs`.
pub(crate) fn bind_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in binds {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind accumulated values to a sqlx `QueryScalar`.
pub(crate) fn bind_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in binds {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Date(v) => q = q.bind(*v),
        }
    }
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_renders_no_where() {
        let filter = QueryFilter::new();
        assert_eq!(filter.where_clause(), "");
        assert_eq!(filter.next_bind_index(), 1);
    }

    #[test]
    fn conditions_join_with_and_in_bind_order() {
        let mut filter = QueryFilter::new();
        filter.eq("p.status", BindValue::Text("active".into()));
        filter.ilike_any(&["p.name"], "alpha");
        assert_eq!(
            filter.where_clause(),
            "WHERE p.status = $1 AND (p.name ILIKE $2)"
        );
        assert_eq!(filter.next_bind_index(), 3);
    }

    #[test]
    fn multi_column_search_uses_one_bind_per_column() {
        let mut filter = QueryFilter::new();
        filter.ilike_any(&["u.name", "u.email"], "bob");
        assert_eq!(
            filter.where_clause(),
            "WHERE (u.name ILIKE $1 OR u.email ILIKE $2)"
        );
        assert_eq!(filter.binds().len(), 2);
    }
}
