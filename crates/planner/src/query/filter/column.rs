use std::fmt;

/// A column reference, optionally qualified by its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<'a> {
    pub field: &'a str,
    pub collection: Option<&'a str>,
}

impl<'a> Column<'a> {
    pub fn new(field: &'a str, collection: Option<&'a str>) -> Self {
        Self { field, collection }
    }

    /// The column expression, lowercased when `fold` is set.
    pub fn expr(&self, fold: bool) -> String {
        if fold {
            lower(&self.to_string())
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for Column<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.collection {
            Some(collection) => write!(f, "{collection}.{}", self.field),
            None => f.write_str(self.field),
        }
    }
}

/// Wraps `expr` in `LOWER(...)` unless it is already wrapped.
pub fn lower(expr: &str) -> String {
    let already = expr
        .strip_prefix("LOWER")
        .is_some_and(is_single_group);
    if already {
        expr.to_string()
    } else {
        format!("LOWER({expr})")
    }
}

/// True when `s` is one parenthesized group, e.g. `(a OR b)` but not
/// `(a) AND (b)`.
pub fn is_single_group(s: &str) -> bool {
    if !s.starts_with('(') || !s.ends_with(')') {
        return false;
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return i == s.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_column() {
        assert_eq!(Column::new("name", None).to_string(), "name");
        assert_eq!(Column::new("name", Some("users")).to_string(), "users.name");
        assert_eq!(
            Column::new("name", Some("users")).expr(true),
            "LOWER(users.name)"
        );
    }

    #[test]
    fn test_lower_is_idempotent() {
        let once = lower("name");
        assert_eq!(once, "LOWER(name)");
        assert_eq!(lower(&once), once);
        assert_eq!(lower("?"), "LOWER(?)");
        assert_eq!(lower("LOWER(a) || LOWER(b)"), "LOWER(LOWER(a) || LOWER(b))");
    }

    #[test]
    fn test_single_group() {
        assert!(is_single_group("(a = ?)"));
        assert!(is_single_group("((a = ? OR b = ?) AND c = ?)"));
        assert!(!is_single_group("(a = ?) AND (b = ?)"));
        assert!(!is_single_group("NOT (a = ?)"));
        assert!(!is_single_group(""));
    }
}
