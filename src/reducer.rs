//! Reduction of a [`ParseTree`] into a [`SearchItem`].
//!
//! Every rule node is handled in two steps. Its children are visited and folded
//! left to right into one accumulator ([`TreeReducer::reduce_children`]); the
//! accumulator is then re-read in the context of the rule that owns the node
//! ([`TreeReducer::reinterpret`]). The grammar gives `orExpression` and
//! `andExpression` the same shape, so whether two siblings form an `AND` or an
//! `OR` group is only decided in the second step.
//!
//! The fold:
//!
//! | accumulator          | next                      | result                      |
//! |----------------------|---------------------------|-----------------------------|
//! | any                  | `Terminal` / `Empty`      | accumulator                 |
//! | `Empty` / `Terminal` | any                       | next                        |
//! | `Values`             | any                       | next appended               |
//! | `Field`              | `Field` / `Boolean` / `Not` | `Values[acc, next]`       |
//! | `Boolean` / `Not`    | any                       | `Values[acc, next]`, with a diagnostic |
//!
//! A `Values` arriving as `next` is spliced, never nested.
//!
//! Reduction never fails. Input the grammar does not define is resolved to a
//! well-formed tree where possible and reported as a [`Diagnostic`].

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    ast::{
        BooleanKind, FieldOperation, SearchField, SearchItem, Token, classify_field,
        classify_operation,
    },
    tree::{ParseTree, RuleKind},
};

/// Value of a field predicate whose value is missing, e.g. `t:`.
pub const UNKNOWN_VALUE: &str = "Unknown Value";

/// Reduce-then-reinterpret traversal over a parse tree.
pub trait TreeReducer {
    /// Folds the results of visiting each child of `node`.
    fn reduce_children(&mut self, node: &ParseTree) -> SearchItem;

    /// Re-reads the folded children according to the rule `node` belongs to.
    fn reinterpret(&mut self, node: &ParseTree, reduced: SearchItem) -> SearchItem;

    fn visit(&mut self, node: &ParseTree) -> SearchItem {
        let reduced = self.reduce_children(node);
        self.reinterpret(node, reduced)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A sibling followed a `Boolean` or `Not` accumulator; they were grouped
    /// in source order.
    AmbiguousAggregation,
    /// A negation marker with nothing to negate.
    EmptyNegation,
    /// Ungrouped siblings reached the root and were joined with `AND`.
    UnresolvedValues,
    /// A group could not be built from the folded children and was dropped.
    InvalidGroup,
}

/// Soft failure recorded while reducing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub rule: RuleKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

/// Builds a [`SearchItem`] from a parse tree.
///
/// Holds nothing but the diagnostics of the last [`Reducer::reduce`] call, so
/// reducing the same tree twice gives equal results.
#[derive(Debug, Default)]
pub struct Reducer {
    diagnostics: Vec<Diagnostic>,
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduces a whole tree. The result is well formed whenever the tree has
    /// any search term in it.
    pub fn reduce(&mut self, tree: &ParseTree) -> SearchItem {
        self.diagnostics.clear();

        match self.visit(tree) {
            SearchItem::Values { children } => {
                self.record(
                    DiagnosticKind::UnresolvedValues,
                    tree.kind().unwrap_or(RuleKind::Query),
                    format!("{} ungrouped terms at the root, joined with AND", children.len()),
                );
                self.join(RuleKind::Query, BooleanKind::And, children)
            }
            item => item,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn record(&mut self, kind: DiagnosticKind, rule: RuleKind, message: String) {
        warn!(rule = %rule, kind = ?kind, "{}", message);
        self.push(kind, rule, message);
    }

    /// Like [`Reducer::record`], for cases that are routine enough to only log at debug.
    fn note(&mut self, kind: DiagnosticKind, rule: RuleKind, message: String) {
        debug!(rule = %rule, kind = ?kind, "{}", message);
        self.push(kind, rule, message);
    }

    fn push(&mut self, kind: DiagnosticKind, rule: RuleKind, message: String) {
        self.diagnostics.push(Diagnostic {
            kind,
            rule,
            message,
        });
    }

    /// One step of the fold.
    fn aggregate(&mut self, rule: RuleKind, acc: SearchItem, next: SearchItem) -> SearchItem {
        match (acc, next) {
            (acc, SearchItem::Terminal | SearchItem::Empty) => acc,
            (SearchItem::Empty | SearchItem::Terminal, next) => next,
            (SearchItem::Values { mut children }, next) => {
                append(&mut children, next);
                SearchItem::Values { children }
            }
            (acc @ SearchItem::Field { .. }, next) => group(acc, next),
            (acc @ (SearchItem::Boolean { .. } | SearchItem::Not { .. }), next) => {
                let message = format!(
                    "{} followed by {}, grouped in source order",
                    acc.kind_name(),
                    next.kind_name()
                );
                let grouped = group(acc, next);
                // a pair has only one reading; longer runs may have been meant otherwise
                match &grouped {
                    SearchItem::Values { children } if children.len() > 2 => {
                        self.record(DiagnosticKind::AmbiguousAggregation, rule, message)
                    }
                    _ => self.note(DiagnosticKind::AmbiguousAggregation, rule, message),
                }
                grouped
            }
        }
    }

    /// Builds an `AND`/`OR` group through the checked constructor.
    fn join(&mut self, rule: RuleKind, kind: BooleanKind, children: Vec<SearchItem>) -> SearchItem {
        match SearchItem::boolean(kind, children) {
            Ok(item) => item,
            Err(err) => {
                self.record(DiagnosticKind::InvalidGroup, rule, err.to_string());
                SearchItem::Empty
            }
        }
    }

    /// `Values` becomes a group of `kind`; a single item passes through unwrapped.
    fn retag(&mut self, rule: RuleKind, kind: BooleanKind, reduced: SearchItem) -> SearchItem {
        match reduced {
            SearchItem::Values { children } => self.join(rule, kind, children),
            item => item,
        }
    }

    fn negation(&mut self, reduced: SearchItem) -> SearchItem {
        let item = self.retag(RuleKind::PrimaryExpression, BooleanKind::And, reduced);

        match SearchItem::negate(item) {
            Ok(not) => not,
            Err(err) => {
                self.record(
                    DiagnosticKind::EmptyNegation,
                    RuleKind::PrimaryExpression,
                    err.to_string(),
                );
                SearchItem::Empty
            }
        }
    }
}

impl TreeReducer for Reducer {
    fn reduce_children(&mut self, node: &ParseTree) -> SearchItem {
        let Some(rule) = node.kind() else {
            return SearchItem::Empty;
        };

        let mut acc = SearchItem::Empty;
        for child in node.children() {
            let next = self.visit(child);
            acc = self.aggregate(rule, acc, next);
        }
        acc
    }

    fn reinterpret(&mut self, node: &ParseTree, reduced: SearchItem) -> SearchItem {
        let Some(rule) = node.kind() else {
            return SearchItem::Terminal;
        };

        match rule {
            RuleKind::Query | RuleKind::Expression => reduced,
            RuleKind::OrExpression => self.retag(rule, BooleanKind::Or, reduced),
            RuleKind::AndExpression => self.retag(rule, BooleanKind::And, reduced),
            RuleKind::PrimaryExpression => {
                let negated = node
                    .children()
                    .first()
                    .and_then(ParseTree::token)
                    .is_some_and(Token::is_negation);
                if negated {
                    self.negation(reduced)
                } else {
                    reduced
                }
            }
            RuleKind::Term => term(node),
            RuleKind::FieldSpecifier | RuleKind::ComparisonOperator | RuleKind::AtomicValue => {
                SearchItem::Terminal
            }
        }
    }
}

fn group(acc: SearchItem, next: SearchItem) -> SearchItem {
    let mut children = vec![acc];
    append(&mut children, next);
    SearchItem::Values { children }
}

fn append(children: &mut Vec<SearchItem>, next: SearchItem) {
    match next {
        SearchItem::Values { children: nested } => children.extend(nested),
        item => children.push(item),
    }
}

fn term(node: &ParseTree) -> SearchItem {
    if let [value] = node.children() {
        return SearchItem::field(
            SearchField::Name,
            FieldOperation::Eq,
            strip_quotes(&value.text()),
        );
    }

    let field = node
        .find(RuleKind::FieldSpecifier)
        .map(|spec| classify_field(&spec.text()))
        .unwrap_or(SearchField::Unknown);

    let operation = match node.find_terminal(|t| *t == Token::Colon) {
        Some(colon) => classify_operation(colon.lexeme()),
        None => node
            .find(RuleKind::ComparisonOperator)
            .map(|op| classify_operation(&op.text()))
            .unwrap_or(FieldOperation::Unknown),
    };

    let value = node
        .find(RuleKind::AtomicValue)
        .map(|value| strip_quotes(&value.text()))
        .unwrap_or_else(|| UNKNOWN_VALUE.to_string());

    SearchItem::field(field, operation, value)
}

/// Removes one pair of matching enclosing quotes.
pub fn strip_quotes(text: &str) -> String {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return text[1..text.len() - 1].to_string();
        }
    }
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> ParseTree {
        ParseTree::terminal(Token::Word(text.to_string()))
    }

    fn bare(text: &str) -> ParseTree {
        let value = ParseTree::rule(RuleKind::AtomicValue, vec![word(text)]);
        ParseTree::rule(
            RuleKind::PrimaryExpression,
            vec![ParseTree::rule(RuleKind::Term, vec![value])],
        )
    }

    fn name(value: &str) -> SearchItem {
        SearchItem::field(SearchField::Name, FieldOperation::Eq, value)
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"Destroy all cards\""), "Destroy all cards");
        assert_eq!(strip_quotes("'rift'"), "rift");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("\""), "\"");
        assert_eq!(strip_quotes("\"mixed'"), "\"mixed'");
        assert_eq!(strip_quotes("plain"), "plain");
    }

    #[test]
    fn test_terminals_are_discarded() {
        let mut reducer = Reducer::new();
        let acc = reducer.aggregate(RuleKind::AndExpression, name("a"), SearchItem::Terminal);
        assert_eq!(acc, name("a"));
        let acc = reducer.aggregate(RuleKind::AndExpression, SearchItem::Terminal, name("b"));
        assert_eq!(acc, name("b"));
        assert!(reducer.diagnostics().is_empty());
    }

    #[test]
    fn test_values_are_spliced_not_nested() {
        let mut reducer = Reducer::new();
        let acc = reducer.aggregate(
            RuleKind::AndExpression,
            name("a"),
            SearchItem::Values {
                children: vec![name("b"), name("c")],
            },
        );
        assert_eq!(
            acc,
            SearchItem::Values {
                children: vec![name("a"), name("b"), name("c")]
            }
        );
    }

    #[test]
    fn test_root_values_joined_with_and() {
        // a primary with two terms is not produced by the parser
        let tree = ParseTree::rule(RuleKind::PrimaryExpression, vec![bare("a"), bare("b")]);
        let mut reducer = Reducer::new();
        let item = reducer.reduce(&tree);
        assert_eq!(
            item,
            SearchItem::Boolean {
                kind: BooleanKind::And,
                children: vec![name("a"), name("b")]
            }
        );
        assert_eq!(reducer.diagnostics()[0].kind, DiagnosticKind::UnresolvedValues);
    }

    #[test]
    fn test_negation_without_operand() {
        let tree = ParseTree::rule(
            RuleKind::PrimaryExpression,
            vec![ParseTree::terminal(Token::Not)],
        );
        let mut reducer = Reducer::new();
        assert_eq!(reducer.reduce(&tree), SearchItem::Empty);
        assert_eq!(reducer.diagnostics()[0].kind, DiagnosticKind::EmptyNegation);
    }

    #[test]
    fn test_negation_over_several_terms_joins_with_and() {
        let tree = ParseTree::rule(
            RuleKind::PrimaryExpression,
            vec![ParseTree::terminal(Token::Not), bare("a"), bare("b")],
        );
        let mut reducer = Reducer::new();
        assert_eq!(
            reducer.reduce(&tree),
            SearchItem::Not {
                child: Box::new(SearchItem::Boolean {
                    kind: BooleanKind::And,
                    children: vec![name("a"), name("b")]
                })
            }
        );
        assert!(reducer.diagnostics().is_empty());
    }

    #[test]
    fn test_pair_after_group_is_noted() {
        let mut reducer = Reducer::new();
        let group = SearchItem::negate(name("a")).unwrap();
        let acc = reducer.aggregate(RuleKind::AndExpression, group.clone(), name("b"));
        assert_eq!(
            acc,
            SearchItem::Values {
                children: vec![group, name("b")]
            }
        );
        assert_eq!(reducer.diagnostics()[0].kind, DiagnosticKind::AmbiguousAggregation);
    }

    #[test]
    fn test_invalid_group_is_dropped() {
        let mut reducer = Reducer::new();
        let item = reducer.join(RuleKind::OrExpression, BooleanKind::Or, vec![SearchItem::Empty]);
        assert_eq!(item, SearchItem::Empty);
        assert_eq!(reducer.diagnostics()[0].kind, DiagnosticKind::InvalidGroup);
    }

    #[test]
    fn test_term_without_specifier_or_operator() {
        let tree = ParseTree::rule(
            RuleKind::Term,
            vec![
                ParseTree::terminal(Token::Colon),
                ParseTree::rule(RuleKind::AtomicValue, vec![word("x")]),
            ],
        );
        assert_eq!(
            Reducer::new().reduce(&tree),
            SearchItem::field(SearchField::Unknown, FieldOperation::Eq, "x")
        );
    }

    #[test]
    fn test_diagnostics_reset_between_runs() {
        let tree = ParseTree::rule(
            RuleKind::PrimaryExpression,
            vec![ParseTree::terminal(Token::Not)],
        );
        let mut reducer = Reducer::new();
        reducer.reduce(&tree);
        reducer.reduce(&bare("a"));
        assert!(reducer.take_diagnostics().is_empty());
    }
}
