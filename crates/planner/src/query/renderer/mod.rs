//! Binds values to placeholders while a fragment is being built.

use crate::query::{
    dialect::{Dialect, dialect_for, param_name},
    params::Params,
};
use model::core::{bind_style::BindStyle, value::Value};

/// Holds the parameter state for one compile call.
///
/// Every bound value gets the next sequence number, so parameter names stay
/// unique across the whole filter tree and `$n` placeholders line up with
/// binding order.
pub struct Renderer<'a> {
    pub params: Params,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            params: Params::new(),
            dialect,
        }
    }

    /// Sequence number the next bound value will receive.
    pub fn next_sequence(&self) -> usize {
        self.params.len() + 1
    }

    /// Records `value` under a fresh name derived from `field` and returns
    /// the placeholder to splice into the SQL text.
    pub fn add_param(&mut self, field: &str, value: Value) -> String {
        let sequence = self.next_sequence();
        let name = param_name(sequence, field);
        let placeholder = self.dialect.get_placeholder(sequence, &name);
        self.params.push(name, value);
        placeholder
    }

    /// Consumes the renderer and returns the collected parameters.
    pub fn finish(self) -> Params {
        self.params
    }
}

impl Renderer<'static> {
    pub fn for_style(style: BindStyle) -> Self {
        Self::new(dialect_for(style))
    }
}
