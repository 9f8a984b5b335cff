use serde::{
    Deserialize, Deserializer,
    de::{self, MapAccess, Visitor},
};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(format!("Invalid sort direction '{s}', expected ASC or DESC"))
        }
    }
}

impl<'de> Deserialize<'de> for SortDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
    pub collection: Option<String>,
}

/// Ordered sort specification; terms are emitted in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    fields: Vec<SortField>,
}

impl Sort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn asc(self, field: impl Into<String>) -> Self {
        self.by(field, SortDirection::Asc, None)
    }

    pub fn desc(self, field: impl Into<String>) -> Self {
        self.by(field, SortDirection::Desc, None)
    }

    pub fn by(
        mut self,
        field: impl Into<String>,
        direction: SortDirection,
        collection: Option<&str>,
    ) -> Self {
        self.fields.push(SortField {
            field: field.into(),
            direction,
            collection: collection.map(String::from),
        });
        self
    }
}

/// A sort entry is either a bare direction or `{order, collection?}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SortSpec {
    Direction(SortDirection),
    Descriptor {
        order: SortDirection,
        #[serde(default)]
        collection: Option<String>,
    },
}

struct SortVisitor;

impl<'de> Visitor<'de> for SortVisitor {
    type Value = Sort;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to sort directions")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Sort, A::Error> {
        let mut sort = Sort::new();
        while let Some((field, spec)) = map.next_entry::<String, SortSpec>()? {
            let (direction, collection) = match spec {
                SortSpec::Direction(direction) => (direction, None),
                SortSpec::Descriptor { order, collection } => (order, collection),
            };
            sort.fields.push(SortField {
                field,
                direction,
                collection,
            });
        }
        Ok(sort)
    }
}

impl<'de> Deserialize<'de> for Sort {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SortVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_directions_and_descriptors() {
        let sort: Sort = serde_json::from_str(
            r#"{"name": "asc", "created_at": {"order": "DESC", "collection": "u"}}"#,
        )
        .unwrap();

        assert_eq!(
            sort,
            Sort::new()
                .asc("name")
                .by("created_at", SortDirection::Desc, Some("u"))
        );
    }

    #[test]
    fn test_decode_rejects_unknown_direction() {
        let result: Result<Sort, _> = serde_json::from_str(r#"{"name": "sideways"}"#);
        assert!(result.is_err());
    }
}
