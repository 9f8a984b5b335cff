use model::filter::FieldOperator;

/// SQL operators a clause can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlOperator {
    // Comparison
    Eq,    // =
    NotEq, // <>
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=

    // Membership
    In,
    NotIn,

    Between,
    Like,
}

impl SqlOperator {
    pub const fn keyword(&self) -> &'static str {
        match self {
            SqlOperator::Eq => "=",
            SqlOperator::NotEq => "<>",
            SqlOperator::Lt => "<",
            SqlOperator::LtEq => "<=",
            SqlOperator::Gt => ">",
            SqlOperator::GtEq => ">=",
            SqlOperator::In => "IN",
            SqlOperator::NotIn => "NOT IN",
            SqlOperator::Between => "BETWEEN",
            SqlOperator::Like => "LIKE",
        }
    }

    /// The SQL operator behind a field operator. Pattern operators all map
    /// to `LIKE`.
    pub const fn of(op: &FieldOperator) -> SqlOperator {
        match op {
            FieldOperator::Eq(_) => SqlOperator::Eq,
            FieldOperator::Neq(_) => SqlOperator::NotEq,
            FieldOperator::Lt(_) => SqlOperator::Lt,
            FieldOperator::Lte(_) => SqlOperator::LtEq,
            FieldOperator::Gt(_) => SqlOperator::Gt,
            FieldOperator::Gte(_) => SqlOperator::GtEq,
            FieldOperator::In(_) => SqlOperator::In,
            FieldOperator::Nin(_) => SqlOperator::NotIn,
            FieldOperator::Between(_, _) => SqlOperator::Between,
            FieldOperator::Contains(_)
            | FieldOperator::StartsWith(_)
            | FieldOperator::EndsWith(_) => SqlOperator::Like,
        }
    }
}
