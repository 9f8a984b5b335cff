use crate::error::CliError;
use planner::CompiledQuery;
use serde::Serialize;
use std::fmt::Write;

pub fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(CliError::JsonSerialize)
}

/// Plain-text rendering: the SQL on the first line, then one binding per line.
pub fn to_text(query: &CompiledQuery) -> String {
    let mut out = format!("SQL: {}\n", query.sql);
    if query.params.is_empty() {
        out.push_str("Params: (none)\n");
        return out;
    }

    out.push_str("Params:\n");
    let width = query.params.names().map(str::len).max().unwrap_or(0);
    for (name, value) in query.params.iter() {
        let _ = writeln!(out, "  {name:<width$}  {value}  ({})", value.type_name());
    }
    out
}

pub fn print_query(query: &CompiledQuery, as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", to_json(query)?);
    } else {
        print!("{}", to_text(query));
    }
    Ok(())
}
