pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod reducer;
pub mod tree;

pub use ast::{
    BooleanKind, FieldOperation, SearchField, SearchItem, Token, classify_field, classify_operation,
};
pub use lexer::{LexError, Lexer, Position};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use reducer::{Diagnostic, DiagnosticKind, Reducer, TreeReducer};
pub use tree::{ParseTree, RuleKind};

use tracing::debug;

/// A compiled query together with the soft failures met while reducing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub item: SearchItem,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lexes and parses `query` into its parse tree.
pub fn parse_tree(query: &str) -> Result<ParseTree, ParseError> {
    Parser::new(Lexer::new(query))?.parse()
}

/// Compiles a query string into a [`SearchItem`].
///
/// ```
/// use cardq::{compile, FieldOperation, SearchField, SearchItem};
///
/// let item = compile("t:flame").unwrap();
/// assert_eq!(item, SearchItem::field(SearchField::Type, FieldOperation::Eq, "flame"));
/// ```
pub fn compile(query: &str) -> Result<SearchItem, ParseError> {
    compile_with_diagnostics(query).map(|compilation| compilation.item)
}

pub fn compile_with_diagnostics(query: &str) -> Result<Compilation, ParseError> {
    let tree = parse_tree(query)?;
    let mut reducer = Reducer::new();
    let item = reducer.reduce(&tree);
    let diagnostics = reducer.take_diagnostics();
    debug!(query, diagnostics = diagnostics.len(), "compiled query");
    Ok(Compilation { item, diagnostics })
}
