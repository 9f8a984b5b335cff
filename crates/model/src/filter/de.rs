//! JSON decoding for the filter tree.
//!
//! Maps are walked with a visitor rather than collected into a
//! `serde_json::Map`, so entries keep their document order.

use super::{FieldFilter, FieldOperator, Filter, FilterEntry, FilterValue, LogicalOperator};
use crate::core::value::Value;
use serde::{
    Deserialize, Deserializer,
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor, value::MapAccessDeserializer},
};
use std::fmt;

/// A logical group accepts a single filter or a list of them; `null` is an
/// empty group.
#[derive(Deserialize)]
#[serde(untagged)]
enum GroupInput {
    Many(Vec<Filter>),
    One(Filter),
}

struct FilterVisitor;

impl<'de> Visitor<'de> for FilterVisitor {
    type Value = Filter;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a filter object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Filter, A::Error> {
        let mut filter = Filter::new();
        while let Some(key) = map.next_key::<String>()? {
            let entry = match LogicalOperator::from_key(&key) {
                Some(op) => {
                    let filters = match map.next_value::<Option<GroupInput>>()? {
                        Some(GroupInput::Many(filters)) => filters,
                        Some(GroupInput::One(filter)) => vec![filter],
                        None => Vec::new(),
                    };
                    FilterEntry::Group { op, filters }
                }
                None => FilterEntry::Field {
                    name: key,
                    value: Some(map.next_value::<FilterValue>()?),
                },
            };
            filter.push(entry);
        }
        Ok(filter)
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FilterVisitor)
    }
}

struct FilterValueVisitor;

impl<'de> Visitor<'de> for FilterValueVisitor {
    type Value = FilterValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a scalar, a list of scalars or an operator object")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FilterValue, E> {
        Ok(FilterValue::Scalar(Value::Boolean(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FilterValue, E> {
        Ok(FilterValue::Scalar(Value::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FilterValue, E> {
        Ok(FilterValue::Scalar(
            i64::try_from(v).map_or(Value::Uint(v), Value::Int),
        ))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<FilterValue, E> {
        Ok(FilterValue::Scalar(Value::Float(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FilterValue, E> {
        Ok(FilterValue::Scalar(Value::String(v.to_string())))
    }

    fn visit_unit<E: de::Error>(self) -> Result<FilterValue, E> {
        Ok(FilterValue::Scalar(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<FilterValue, E> {
        Ok(FilterValue::Scalar(Value::Null))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FilterValue, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(v) = seq.next_element::<Value>()? {
            values.push(v);
        }
        Ok(FilterValue::List(values))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<FilterValue, A::Error> {
        FieldFilter::deserialize(MapAccessDeserializer::new(map)).map(FilterValue::Field)
    }
}

impl<'de> Deserialize<'de> for FilterValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FilterValueVisitor)
    }
}

/// Operand of `in`, `nin` and `between`. A malformed operand, such as a
/// bare scalar, decodes to no operator instead of failing the request.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListOperand {
    Values(Vec<Value>),
    Malformed(IgnoredAny),
}

impl ListOperand {
    fn into_values(self) -> Option<Vec<Value>> {
        match self {
            ListOperand::Values(values) => Some(values),
            ListOperand::Malformed(_) => None,
        }
    }
}

/// Distinguishes `"eq": null` (present, null operand) from a missing key.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldFilter {
    #[serde(default, deserialize_with = "present")]
    eq: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    neq: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    lt: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    lte: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    gt: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    gte: Option<Value>,
    #[serde(default, rename = "in")]
    in_list: Option<ListOperand>,
    #[serde(default)]
    nin: Option<ListOperand>,
    #[serde(default)]
    between: Option<ListOperand>,
    #[serde(default, deserialize_with = "present")]
    contains: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    starts_with: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    ends_with: Option<Value>,
    #[serde(default)]
    case_insensitive: Option<bool>,
    #[serde(default)]
    collection: Option<String>,
}

impl RawFieldFilter {
    /// Picks one operator. When several keys are present the one tried first
    /// by the compiler wins: membership, comparison, pattern, range.
    fn into_operator(self) -> Option<FieldOperator> {
        let range = self
            .between
            .and_then(ListOperand::into_values)
            .and_then(|pair| match <[Value; 2]>::try_from(pair) {
                Ok([lo, hi]) => Some(FieldOperator::Between(lo, hi)),
                Err(_) => None,
            });

        self.in_list
            .and_then(ListOperand::into_values)
            .map(FieldOperator::In)
            .or(self.nin.and_then(ListOperand::into_values).map(FieldOperator::Nin))
            .or(self.eq.map(FieldOperator::Eq))
            .or(self.neq.map(FieldOperator::Neq))
            .or(self.lt.map(FieldOperator::Lt))
            .or(self.lte.map(FieldOperator::Lte))
            .or(self.gt.map(FieldOperator::Gt))
            .or(self.gte.map(FieldOperator::Gte))
            .or(self.contains.map(FieldOperator::Contains))
            .or(self.starts_with.map(FieldOperator::StartsWith))
            .or(self.ends_with.map(FieldOperator::EndsWith))
            .or(range)
    }
}

impl<'de> Deserialize<'de> for FieldFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut raw = RawFieldFilter::deserialize(deserializer)?;
        let case_insensitive = raw.case_insensitive.take().unwrap_or(false);
        let collection = raw.collection.take();
        Ok(FieldFilter {
            operator: raw.into_operator(),
            case_insensitive,
            collection,
        })
    }
}
