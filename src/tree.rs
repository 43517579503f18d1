//! Parse tree produced by the [`crate::parser::Parser`] and consumed by the
//! [`crate::reducer::Reducer`].
//!
//! The tree mirrors the grammar one node per rule, and keeps every consumed
//! token as a [`ParseTree::Terminal`] leaf:
//!
//! ```text
//! query             : expression EOF
//! expression        : orExpression
//! orExpression      : andExpression (OR andExpression)*
//! andExpression     : primaryExpression (AND? primaryExpression)*
//! primaryExpression : (NOT | '-')? ( '(' expression ')' | term )
//! term              : fieldSpecifier (':' | comparisonOperator) atomicValue?
//!                   | atomicValue
//! fieldSpecifier    : WORD
//! comparisonOperator: '>=' | '<=' | '!=' | '>' | '<' | '='
//! atomicValue       : WORD | QUOTED
//! ```
//!
//! Trees from another front end can be fed to the reducer as long as they use
//! the same rule kinds.

use std::fmt;

use serde::Serialize;

use crate::ast::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Query,
    Expression,
    OrExpression,
    AndExpression,
    PrimaryExpression,
    Term,
    FieldSpecifier,
    ComparisonOperator,
    AtomicValue,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::Query => "query",
            RuleKind::Expression => "expression",
            RuleKind::OrExpression => "orExpression",
            RuleKind::AndExpression => "andExpression",
            RuleKind::PrimaryExpression => "primaryExpression",
            RuleKind::Term => "term",
            RuleKind::FieldSpecifier => "fieldSpecifier",
            RuleKind::ComparisonOperator => "comparisonOperator",
            RuleKind::AtomicValue => "atomicValue",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ParseTree {
    Rule {
        kind: RuleKind,
        children: Vec<ParseTree>,
    },
    Terminal { token: Token },
}

impl ParseTree {
    pub fn rule(kind: RuleKind, children: Vec<ParseTree>) -> Self {
        ParseTree::Rule { kind, children }
    }

    pub fn terminal(token: Token) -> Self {
        ParseTree::Terminal { token }
    }

    /// Rule kind, `None` for terminal leaves.
    pub fn kind(&self) -> Option<RuleKind> {
        match self {
            ParseTree::Rule { kind, .. } => Some(*kind),
            ParseTree::Terminal { .. } => None,
        }
    }

    pub fn children(&self) -> &[ParseTree] {
        match self {
            ParseTree::Rule { children, .. } => children,
            ParseTree::Terminal { .. } => &[],
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseTree::Terminal { token } => Some(token),
            ParseTree::Rule { .. } => None,
        }
    }

    /// First direct child of the given rule kind.
    pub fn find(&self, kind: RuleKind) -> Option<&ParseTree> {
        self.children().iter().find(|c| c.kind() == Some(kind))
    }

    /// First direct terminal child matching `pred`.
    pub fn find_terminal(&self, pred: impl Fn(&Token) -> bool) -> Option<&Token> {
        self.children()
            .iter()
            .filter_map(ParseTree::token)
            .find(|t| pred(*t))
    }

    /// Source text of the subtree: leaf lexemes joined by single spaces.
    pub fn text(&self) -> String {
        let mut lexemes = Vec::new();
        self.collect_lexemes(&mut lexemes);
        lexemes.join(" ")
    }

    fn collect_lexemes<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ParseTree::Terminal { token } => {
                if !token.lexeme().is_empty() {
                    out.push(token.lexeme());
                }
            }
            ParseTree::Rule { children, .. } => {
                for child in children {
                    child.collect_lexemes(out);
                }
            }
        }
    }

    fn fmt_outline(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            ParseTree::Terminal { token: Token::Eof } => writeln!(f, "{}<EOF>", indent),
            ParseTree::Terminal { token } => writeln!(f, "{}{}", indent, token.lexeme()),
            ParseTree::Rule { kind, children } => {
                writeln!(f, "{}{}", indent, kind)?;
                for child in children {
                    child.fmt_outline(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

/// Indented outline, one node per line.
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_outline(f, 0)
    }
}
