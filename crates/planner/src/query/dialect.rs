//! Defines the `Dialect` trait for placeholder syntax.

use model::core::bind_style::BindStyle;

pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect (e.g., "question", "dollar").
    fn name(&self) -> &'static str;

    /// Returns the placeholder for a parameterized query.
    ///
    /// `sequence` is the one-based position of the parameter within the
    /// compile call and `param_name` its canonical name (see [`param_name`]).
    ///
    /// - Question: `?`
    /// - Dollar: `$1`, `$2`, etc.
    /// - Colon: `:_1_name`
    /// - At: `@_1_name`
    fn get_placeholder(&self, sequence: usize, param_name: &str) -> String;
}

#[derive(Debug, Clone)]
pub struct QuestionMark;

impl Dialect for QuestionMark {
    fn name(&self) -> &'static str {
        "question"
    }

    fn get_placeholder(&self, _sequence: usize, _param_name: &str) -> String {
        "?".into()
    }
}

#[derive(Debug, Clone)]
pub struct Dollar;

impl Dialect for Dollar {
    fn name(&self) -> &'static str {
        "dollar"
    }

    fn get_placeholder(&self, sequence: usize, _param_name: &str) -> String {
        format!("${sequence}")
    }
}

#[derive(Debug, Clone)]
pub struct Colon;

impl Dialect for Colon {
    fn name(&self) -> &'static str {
        "colon"
    }

    fn get_placeholder(&self, _sequence: usize, param_name: &str) -> String {
        format!(":{param_name}")
    }
}

#[derive(Debug, Clone)]
pub struct At;

impl Dialect for At {
    fn name(&self) -> &'static str {
        "at"
    }

    fn get_placeholder(&self, _sequence: usize, param_name: &str) -> String {
        format!("@{param_name}")
    }
}

pub fn dialect_for(style: BindStyle) -> &'static dyn Dialect {
    match style {
        BindStyle::Question => &QuestionMark,
        BindStyle::Dollar => &Dollar,
        BindStyle::Colon => &Colon,
        BindStyle::At => &At,
    }
}

/// Canonical parameter name: `_<sequence>_<field>`.
///
/// Characters that are not valid in a bind name are replaced with `_`.
pub fn param_name(sequence: usize, field: &str) -> String {
    let field: String = field
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("_{sequence}_{field}")
}
