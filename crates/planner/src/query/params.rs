use model::core::value::Value;
use serde::{Serialize, Serializer, ser::SerializeMap};

/// Bound parameters in binding order.
///
/// Names are unique within one compile call. Positional drivers read the
/// values in order; named drivers look them up by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn push(&mut self, name: String, value: Value) {
        debug_assert!(self.get(&name).is_none(), "duplicate parameter {name}");
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Values in binding order, for positional drivers.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Params {
        let mut params = Params::new();
        params.push("_1_name".into(), Value::from("John"));
        params.push("_2_age".into(), Value::Int(18));
        params
    }

    #[test]
    fn test_lookup_and_order() {
        let params = sample();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("_2_age"), Some(&Value::Int(18)));
        assert_eq!(params.get("_3_age"), None);
        assert_eq!(params.names().collect::<Vec<_>>(), vec!["_1_name", "_2_age"]);
        assert_eq!(
            params.into_values(),
            vec![Value::from("John"), Value::Int(18)]
        );
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"_1_name":"John","_2_age":18}"#);
    }
}
