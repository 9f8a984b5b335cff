//! The filter tree: what rows to select.
//!
//! A [`Filter`] is an ordered list of entries. Each entry is either a logical
//! group (`AND`, `OR`, `NOT`) over nested filters, or a constraint on a single
//! field. Sibling entries are implicitly ANDed together.

use crate::core::value::Value;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use uuid::Uuid;

pub mod de;
pub mod field;

pub use field::{FieldFilter, FieldOperator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    /// Resolves a reserved filter key. Matching is exact, so a column named
    /// `and` is still treated as a field.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "AND" => Some(LogicalOperator::And),
            "OR" => Some(LogicalOperator::Or),
            "NOT" => Some(LogicalOperator::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Not => "NOT",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The constraint attached to a field name.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// A bare scalar, including the null marker.
    Scalar(Value),
    /// A bare sequence of scalars, meaning "one of these".
    List(Vec<Value>),
    /// An operator descriptor with optional modifiers.
    Field(FieldFilter),
}

impl From<Value> for FilterValue {
    fn from(v: Value) -> Self {
        FilterValue::Scalar(v)
    }
}

impl From<Vec<Value>> for FilterValue {
    fn from(v: Vec<Value>) -> Self {
        FilterValue::List(v)
    }
}

impl From<FieldFilter> for FilterValue {
    fn from(v: FieldFilter) -> Self {
        FilterValue::Field(v)
    }
}

macro_rules! scalar_filter_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FilterValue {
                fn from(v: $ty) -> Self {
                    FilterValue::Scalar(Value::from(v))
                }
            }
        )*
    };
}

scalar_filter_value!(i64, i32, u64, u32, f64, bool, String, &str, Uuid, NaiveDate, DateTime<Utc>);

#[derive(Debug, Clone, PartialEq)]
pub enum FilterEntry {
    Group {
        op: LogicalOperator,
        filters: Vec<Filter>,
    },
    Field {
        name: String,
        /// `None` means the caller left the field unset; it constrains nothing.
        value: Option<FilterValue>,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    entries: Vec<FilterEntry>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn push(&mut self, entry: FilterEntry) {
        self.entries.push(entry);
    }

    /// Adds a constraint on `name`.
    pub fn field(self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.maybe_field(name, Some(value))
    }

    /// Adds a constraint on `name` that may be unset.
    pub fn maybe_field<N, V>(mut self, name: N, value: Option<V>) -> Self
    where
        N: Into<String>,
        V: Into<FilterValue>,
    {
        self.entries.push(FilterEntry::Field {
            name: name.into(),
            value: value.map(Into::into),
        });
        self
    }

    pub fn group(mut self, op: LogicalOperator, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.entries.push(FilterEntry::Group {
            op,
            filters: filters.into_iter().collect(),
        });
        self
    }

    pub fn and(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.group(LogicalOperator::And, filters)
    }

    pub fn or(self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.group(LogicalOperator::Or, filters)
    }

    pub fn not(self, filter: Filter) -> Self {
        self.group(LogicalOperator::Not, [filter])
    }

    /// Nesting depth of logical groups; a flat filter has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                FilterEntry::Group { filters, .. } => filters.iter().map(Filter::depth).max(),
                FilterEntry::Field { .. } => None,
            })
            .max()
            .unwrap_or(0)
    }
}
