//! Table query builder
//!
//! Renders filters, ordering and limits into the backend's query-string
//! conventions (`col=eq.value`, `order=col.asc`, `limit=n`).

use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// Row filter (conjunction of equality conditions)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    /// Match rows where `column = value`
    pub fn eq(column: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::default().and_eq(column, value)
    }

    pub fn and_eq(mut self, column: impl Into<String>, value: impl fmt::Display) -> Self {
        self.conditions.push((column.into(), format!("eq.{value}")));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.conditions.clone()
    }
}

/// Read query: `select=*` plus optional filter, order and limit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filter: Filter,
    order: Vec<(String, Order)>,
    limit: Option<u32>,
}

impl Query {
    /// Every row, backend order
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl fmt::Display) -> Self {
        self.filter = self.filter.and_eq(column, value);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.order.push((column.into(), order));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        pairs.extend(self.filter.to_pairs());

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(column, dir)| format!("{}.{}", column, dir.as_str()))
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("order".to_string(), order));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}
