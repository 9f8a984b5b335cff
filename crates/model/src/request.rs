use crate::{
    core::bind_style::BindStyle, filter::Filter, pagination::page::Pagination, sort::Sort,
};
use serde::Deserialize;

/// Everything needed to compile one query fragment.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    #[serde(default)]
    pub filter: Option<Filter>,
    #[serde(default)]
    pub sort: Option<Sort>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub bind_style: BindStyle,
}

impl CompileRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn bind_style(mut self, bind_style: BindStyle) -> Self {
        self.bind_style = bind_style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::value::Value, filter::FieldFilter};

    #[test]
    fn test_decode_full_request() {
        let request: CompileRequest = serde_json::from_str(
            r#"{
                "filter": {"name": "John", "age": {"gte": 18}},
                "sort": {"name": "ASC"},
                "pagination": {"page": 2, "perPage": 15},
                "bindStyle": "dollar"
            }"#,
        )
        .unwrap();

        assert_eq!(
            request,
            CompileRequest::new()
                .filter(
                    Filter::new()
                        .field("name", Value::from("John"))
                        .field("age", FieldFilter::gte(18))
                )
                .sort(Sort::new().asc("name"))
                .pagination(Pagination::new(2, 15))
                .bind_style(BindStyle::Dollar)
        );
    }

    #[test]
    fn test_decode_empty_request_uses_defaults() {
        let request: CompileRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, CompileRequest::default());
        assert_eq!(request.bind_style, BindStyle::Question);
    }
}
