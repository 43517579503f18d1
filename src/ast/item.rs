use serde::Serialize;
use thiserror::Error;

use crate::ast::{FieldOperation, SearchField};

/// Connective of a [`SearchItem::Boolean`] group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanKind {
    /// Explicit `AND` or implicit conjunction of juxtaposed terms
    And,
    /// `OR`
    Or,
}

impl BooleanKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BooleanKind::And => "AND",
            BooleanKind::Or => "OR",
        }
    }
}

/// Query tree produced by the reducer.
///
/// `Empty`, `Terminal` and `Values` only exist while a parse tree is being
/// reduced. A tree returned by [`crate::compile`] satisfies
/// [`SearchItem::is_well_formed`].
///
/// # Example
/// ```text
/// t:flame OR NOT t:stun
/// ```
/// compiles to
/// ```text
/// Boolean(Or, [Field(Type, Eq, "flame"), Not(Field(Type, Eq, "stun"))])
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchItem {
    /// Neutral accumulator, the fold starts here
    Empty,

    /// Structural token (keyword, parenthesis, separator). Discarded by the fold.
    Terminal,

    /// Leaf predicate
    ///
    /// # Examples
    /// ```text
    /// t:flame
    /// r!="draw a card"
    /// blood            (implicit name search)
    /// ```
    Field {
        field: SearchField,
        operation: FieldOperation,
        value: String,
    },

    /// Conjunction or disjunction over at least one child, in source order
    Boolean {
        kind: BooleanKind,
        children: Vec<SearchItem>,
    },

    /// Juxtaposed siblings not yet attributed to an `AND` or `OR` group
    Values { children: Vec<SearchItem> },

    /// Negation of a single child
    Not { child: Box<SearchItem> },
}

/// Rejected constructor input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AstError {
    #[error("boolean group needs at least one child")]
    EmptyBoolean,
    #[error("{kind} node cannot be a child of a boolean group")]
    IntermediateChild { kind: &'static str },
    #[error("{kind} node cannot be negated")]
    IntermediateNegation { kind: &'static str },
}

impl SearchItem {
    pub fn field(field: SearchField, operation: FieldOperation, value: impl Into<String>) -> Self {
        SearchItem::Field {
            field,
            operation,
            value: value.into(),
        }
    }

    /// Builds an `AND`/`OR` group. Every child must already be a finished node.
    pub fn boolean(kind: BooleanKind, children: Vec<SearchItem>) -> Result<Self, AstError> {
        if children.is_empty() {
            return Err(AstError::EmptyBoolean);
        }
        if let Some(child) = children.iter().find(|c| c.is_intermediate()) {
            return Err(AstError::IntermediateChild {
                kind: child.kind_name(),
            });
        }
        Ok(SearchItem::Boolean { kind, children })
    }

    pub fn negate(child: SearchItem) -> Result<Self, AstError> {
        if child.is_intermediate() {
            return Err(AstError::IntermediateNegation {
                kind: child.kind_name(),
            });
        }
        Ok(SearchItem::Not {
            child: Box::new(child),
        })
    }

    /// Short lowercase name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SearchItem::Empty => "empty",
            SearchItem::Terminal => "terminal",
            SearchItem::Field { .. } => "field",
            SearchItem::Boolean { .. } => "boolean",
            SearchItem::Values { .. } => "values",
            SearchItem::Not { .. } => "not",
        }
    }

    /// Variants that must not survive reduction.
    pub fn is_intermediate(&self) -> bool {
        matches!(
            self,
            SearchItem::Empty | SearchItem::Terminal | SearchItem::Values { .. }
        )
    }

    /// Checks the output invariants: no intermediate node anywhere and no
    /// childless boolean group.
    pub fn is_well_formed(&self) -> bool {
        match self {
            SearchItem::Empty | SearchItem::Terminal | SearchItem::Values { .. } => false,
            SearchItem::Field { .. } => true,
            SearchItem::Boolean { children, .. } => {
                !children.is_empty() && children.iter().all(SearchItem::is_well_formed)
            }
            SearchItem::Not { child } => child.is_well_formed(),
        }
    }
}
