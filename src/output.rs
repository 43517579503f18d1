//! Rendering of compiled queries.
//!
//! Two forms are provided:
//!
//! - **JSON** via [`to_json()`] and [`to_json_pretty()`], for handing the tree to
//!   a translation stage in another process
//! - **Canonical query text** via the [`Display`](std::fmt::Display) impl on
//!   [`SearchItem`], which spells out every implicit `AND` and parenthesises
//!   nested groups
//!
//! # Examples
//!
//! ```
//! use cardq::compile;
//! use cardq::output::to_json;
//!
//! let item = compile("blood r:stun").unwrap();
//! assert_eq!(item.to_string(), "blood AND r:stun");
//!
//! let json = to_json(&compile("t:flame").unwrap()).unwrap();
//! assert_eq!(json, r#"{"type":"field","field":"type","operation":"eq","value":"flame"}"#);
//! ```
//!
//! The canonical text of a tree compiled from a query compiles back to an equal
//! tree.

use std::fmt;

use crate::ast::{FieldOperation, SearchField, SearchItem};

pub fn to_json(item: &SearchItem) -> Result<String, serde_json::Error> {
    serde_json::to_string(item)
}

pub fn to_json_pretty(item: &SearchItem) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(item)
}

/// Characters that end a bare word in the lexer.
const SPECIAL_CHARS: &[char] = &['(', ')', '"', ':', '<', '>', '=', '!'];

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.starts_with('\'')
        || value.chars().any(|c| c.is_whitespace() || SPECIAL_CHARS.contains(&c))
        || ["and", "or", "not"]
            .iter()
            .any(|keyword| value.eq_ignore_ascii_case(keyword))
        || value
            .strip_prefix('-')
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_alphabetic() || c == '\'')
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if !needs_quotes(value) {
        return f.write_str(value);
    }
    let quote = if value.contains('"') { '\'' } else { '"' };
    write!(f, "{}{}{}", quote, value, quote)
}

/// Writes `item`, parenthesised when it is a group of more than one child.
fn write_operand(f: &mut fmt::Formatter<'_>, item: &SearchItem) -> fmt::Result {
    match item {
        SearchItem::Boolean { children, .. } | SearchItem::Values { children }
            if children.len() > 1 =>
        {
            write!(f, "({})", item)
        }
        _ => write!(f, "{}", item),
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    children: &[SearchItem],
    separator: &str,
) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write_operand(f, child)?;
    }
    Ok(())
}

impl fmt::Display for SearchItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchItem::Empty | SearchItem::Terminal => Ok(()),
            SearchItem::Field {
                field: SearchField::Name,
                operation: FieldOperation::Eq,
                value,
            } => write_value(f, value),
            SearchItem::Field {
                field,
                operation,
                value,
            } => {
                write!(f, "{}{}", field.alias(), operation.symbol())?;
                write_value(f, value)
            }
            SearchItem::Boolean { kind, children } => {
                write_joined(f, children, &format!(" {} ", kind.keyword()))
            }
            SearchItem::Values { children } => write_joined(f, children, " "),
            SearchItem::Not { child } => match child.as_ref() {
                // the grammar takes one negation marker per primary
                SearchItem::Not { .. } => write!(f, "NOT ({})", child),
                _ => {
                    f.write_str("NOT ")?;
                    write_operand(f, child)
                }
            },
        }
    }
}
