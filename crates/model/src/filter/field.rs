use crate::core::value::Value;

/// A single operator applied to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOperator {
    Eq(Value),
    Neq(Value),
    Lt(Value),
    Lte(Value),
    Gt(Value),
    Gte(Value),
    In(Vec<Value>),
    Nin(Vec<Value>),
    Between(Value, Value),
    Contains(Value),
    StartsWith(Value),
    EndsWith(Value),
}

impl FieldOperator {
    pub fn name(&self) -> &'static str {
        match self {
            FieldOperator::Eq(_) => "eq",
            FieldOperator::Neq(_) => "neq",
            FieldOperator::Lt(_) => "lt",
            FieldOperator::Lte(_) => "lte",
            FieldOperator::Gt(_) => "gt",
            FieldOperator::Gte(_) => "gte",
            FieldOperator::In(_) => "in",
            FieldOperator::Nin(_) => "nin",
            FieldOperator::Between(_, _) => "between",
            FieldOperator::Contains(_) => "contains",
            FieldOperator::StartsWith(_) => "startsWith",
            FieldOperator::EndsWith(_) => "endsWith",
        }
    }
}

/// An operator descriptor for one field, with its modifiers.
///
/// `operator` is `None` when the descriptor was decoded without any
/// recognized operator key; such a filter constrains nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldFilter {
    pub operator: Option<FieldOperator>,
    pub case_insensitive: bool,
    pub collection: Option<String>,
}

impl FieldFilter {
    pub fn new(operator: FieldOperator) -> Self {
        Self {
            operator: Some(operator),
            case_insensitive: false,
            collection: None,
        }
    }

    pub fn eq(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::Eq(v.into()))
    }

    pub fn neq(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::Neq(v.into()))
    }

    pub fn lt(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::Lt(v.into()))
    }

    pub fn lte(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::Lte(v.into()))
    }

    pub fn gt(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::Gt(v.into()))
    }

    pub fn gte(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::Gte(v.into()))
    }

    pub fn in_list(values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(FieldOperator::In(values.into_iter().collect()))
    }

    pub fn not_in(values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(FieldOperator::Nin(values.into_iter().collect()))
    }

    pub fn between(lo: impl Into<Value>, hi: impl Into<Value>) -> Self {
        Self::new(FieldOperator::Between(lo.into(), hi.into()))
    }

    pub fn contains(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::Contains(v.into()))
    }

    pub fn starts_with(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::StartsWith(v.into()))
    }

    pub fn ends_with(v: impl Into<Value>) -> Self {
        Self::new(FieldOperator::EndsWith(v.into()))
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }
}
