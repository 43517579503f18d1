use std::fmt;

use serde::Serialize;

/// Comparison a field predicate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOperation {
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than or equal (`<=`)
    Lte,
    /// Not equal (`!=`)
    Neq,
    /// Greater than (`>`)
    Gt,
    /// Less than (`<`)
    Lt,
    /// Equal (`:` or `=`)
    Eq,
    /// Unrecognised operator lexeme
    Unknown,
}

impl FieldOperation {
    /// Canonical lexeme. `Eq` renders as `:`, the form users type most.
    pub fn symbol(self) -> &'static str {
        match self {
            FieldOperation::Gte => ">=",
            FieldOperation::Lte => "<=",
            FieldOperation::Neq => "!=",
            FieldOperation::Gt => ">",
            FieldOperation::Lt => "<",
            FieldOperation::Eq => ":",
            FieldOperation::Unknown => "?",
        }
    }
}

impl fmt::Display for FieldOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<&str> for FieldOperation {
    fn from(text: &str) -> Self {
        classify_operation(text)
    }
}

/// Maps an operator lexeme to its tag. Never fails.
pub fn classify_operation(text: &str) -> FieldOperation {
    match text.trim().to_lowercase().as_str() {
        ">=" => FieldOperation::Gte,
        "<=" => FieldOperation::Lte,
        "!=" => FieldOperation::Neq,
        ">" => FieldOperation::Gt,
        "<" => FieldOperation::Lt,
        ":" | "=" => FieldOperation::Eq,
        _ => FieldOperation::Unknown,
    }
}
