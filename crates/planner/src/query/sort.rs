use crate::query::filter::column::Column;
use model::sort::Sort;

/// Renders `ORDER BY` terms in insertion order.
///
/// Returns an empty string when there is nothing to sort by.
pub fn compile_sort(sort: Option<&Sort>) -> String {
    let Some(sort) = sort.filter(|s| !s.is_empty()) else {
        return String::new();
    };

    let terms = sort
        .fields()
        .iter()
        .map(|f| {
            let column = Column::new(&f.field, f.collection.as_deref());
            format!("{} {}", column, f.direction.as_sql())
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("ORDER BY {terms}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::sort::SortDirection;

    #[test]
    fn test_empty_sort() {
        assert_eq!(compile_sort(None), "");
        assert_eq!(compile_sort(Some(&Sort::new())), "");
    }

    #[test]
    fn test_terms_in_order() {
        let sort = Sort::new()
            .desc("createdAt")
            .by("name", SortDirection::Asc, Some("users"));
        assert_eq!(
            compile_sort(Some(&sort)),
            "ORDER BY createdAt DESC, users.name ASC"
        );
    }
}
