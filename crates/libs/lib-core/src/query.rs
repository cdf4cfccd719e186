//! # Filter/Sort Translator
//!
//! Turns list-screen filter, sort and page descriptors into the backend's
//! generic query protocol:
//!
//! ```text
//! limit=10&offset=20
//!   &filter=status||$in||INSPECTING,INSPECTED
//!   &filter=deletedAt||$notnull
//!   &filter=type||$eq||MATERIAL
//!   &order=createdAt,desc
//! ```
//!
//! ## Operations
//!
//! Only three operations exist: equality, set membership and not-null.
//! [`Filter`] carries its operation explicitly. [`Filter::infer`] keeps the
//! value-shape rule the mobile screens relied on (array ⇒ in-set,
//! null ⇒ not-null, anything else ⇒ equals) for callers that still hand us
//! untyped `{id, value}` pairs.
//!
//! Nothing here validates field names or value shapes; a bad filter surfaces
//! as a 400 from the backend at request time.
//!
//! ## Ordering
//!
//! Filters and sort entries are emitted in insertion order. No secondary sort
//! key is added.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const LIMIT_PARAM: &str = "limit";
pub const OFFSET_PARAM: &str = "offset";
pub const FILTER_PARAM: &str = "filter";
pub const ORDER_PARAM: &str = "order";

/// Filter operation understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    In,
    NotNull,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "$eq",
            FilterOp::In => "$in",
            FilterOp::NotNull => "$notnull",
        }
    }
}

/// One filter condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    /// One value for `Eq`, any number for `In`, none for `NotNull`.
    pub values: Vec<String>,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            values: vec![value.into()],
        }
    }

    pub fn in_set<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            op: FilterOp::In,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::NotNull,
            values: Vec::new(),
        }
    }

    /// Pick the operation from the value's shape.
    ///
    /// Array ⇒ `In`, null ⇒ `NotNull`, anything else ⇒ `Eq`. Objects,
    /// numbers and booleans are rendered as their JSON text.
    pub fn infer(field: impl Into<String>, value: Value) -> Self {
        match value {
            Value::Array(items) => Filter::in_set(field, items.into_iter().map(render_value)),
            Value::Null => Filter::not_null(field),
            other => Filter::eq(field, render_value(other)),
        }
    }

    /// Wire form of the `filter` parameter.
    pub fn to_param(&self) -> String {
        match self.op {
            FilterOp::NotNull => format!("{}||{}", self.field, self.op.as_str()),
            FilterOp::Eq | FilterOp::In => {
                format!("{}||{}||{}", self.field, self.op.as_str(), self.values.join(","))
            }
        }
    }
}

fn render_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// UI-level filter descriptor (`{id, value}`), as list screens produce them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub id: String,
    #[serde(default)]
    pub value: Value,
}

impl From<FilterDescriptor> for Filter {
    fn from(descriptor: FilterDescriptor) -> Self {
        Filter::infer(descriptor.id, descriptor.value)
    }
}

/// Sort entry (`{id, desc}`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    #[serde(rename = "id")]
    pub field: String,
    #[serde(default)]
    pub desc: bool,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: true,
        }
    }

    pub fn direction(&self) -> &'static str {
        if self.desc {
            "desc"
        } else {
            "asc"
        }
    }

    /// Wire form of the `order` parameter.
    pub fn to_param(&self) -> String {
        format!("{},{}", self.field, self.direction())
    }
}

/// Page request. Neither a positive size nor a non-negative index is
/// enforced; whatever the caller passes reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(rename = "pageSize")]
    pub size: i64,
    #[serde(rename = "pageIndex")]
    pub index: i64,
}

impl Page {
    pub fn new(size: i64, index: i64) -> Self {
        Self { size, index }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    /// `index * size`, saturating at the i64 bounds.
    pub fn offset(&self) -> i64 {
        self.index.saturating_mul(self.size)
    }

    pub fn next(&self) -> Self {
        Self {
            size: self.size,
            index: self.index.saturating_add(1),
        }
    }
}

/// Everything a list request needs besides the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    pub filters: Vec<Filter>,
    pub sort: Vec<Sort>,
    pub page: Option<Page>,
}

impl QueryDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from UI descriptors, inferring each filter's operation.
    pub fn from_descriptors(
        filters: impl IntoIterator<Item = FilterDescriptor>,
        sort: impl IntoIterator<Item = Sort>,
        page: Option<Page>,
    ) -> Self {
        Self {
            filters: filters.into_iter().map(Filter::from).collect(),
            sort: sort.into_iter().collect(),
            page,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, sort: Sort) -> Self {
        self.sort.push(sort);
        self
    }

    pub fn page(mut self, size: i64, index: i64) -> Self {
        self.page = Some(Page::new(size, index));
        self
    }

    pub fn with_page(mut self, page: Option<Page>) -> Self {
        self.page = page;
        self
    }

    /// Query parameters in wire order: `limit`, `offset`, then every
    /// `filter`, then every `order`.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(2 + self.filters.len() + self.sort.len());

        if let Some(page) = &self.page {
            pairs.push((LIMIT_PARAM.to_string(), page.limit().to_string()));
            pairs.push((OFFSET_PARAM.to_string(), page.offset().to_string()));
        }
        for filter in &self.filters {
            pairs.push((FILTER_PARAM.to_string(), filter.to_param()));
        }
        for sort in &self.sort {
            pairs.push((ORDER_PARAM.to_string(), sort.to_param()));
        }

        pairs
    }

    /// Stable, order-sensitive text identifying this query, used in cache keys.
    pub fn cache_fragment(&self) -> String {
        self.to_query_pairs()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}
