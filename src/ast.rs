//! # cardq - Abstract Syntax Tree
//!
//! This module defines the data model of the card search language: the tokens
//! the lexer produces, the classifiers that turn field and operator lexemes into
//! tags, and the [`SearchItem`] tree the reducer builds.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[fields]** - Field specifiers (`t`, `rules`, `a`, ...) and their aliases
//! - **[operators]** - Field comparison operators (`:`, `>=`, `!=`, ...)
//! - **[item]** - The reduced query tree
//!
//! ## Quick Start
//!
//! ```text
//! blood OR (r:stun a:enchantress)
//! ```
//!
//! Searches for cards named "blood", or cards whose rules text mentions "stun"
//! and whose archetype is "enchantress".
//!
//! ## Core Concepts
//!
//! ### Bare Terms
//!
//! A word or quoted phrase without a field specifier searches the card name:
//!
//! ```text
//! blood               -> name : blood
//! "Destroy all cards" -> name : Destroy all cards
//! ```
//!
//! ### Field Predicates
//!
//! `field<op>value`, where the field is an alias and the operator one of
//! `:`, `=`, `!=`, `<`, `>`, `<=`, `>=`:
//!
//! ```text
//! t:flame
//! r!="draw a card"
//! ```
//!
//! Unrecognised fields or operators are kept as `Unknown` rather than rejected.
//!
//! ### Boolean Structure
//!
//! - Juxtaposed terms are joined with an implicit `AND`
//! - `OR` binds looser than `AND`
//! - `NOT` (or a leading `-`) negates the following term or group
//! - Parentheses group
//!
//! ```text
//! t:flame OR NOT t:stun
//! -t:flame blood
//! ```
pub mod fields;
pub mod item;
pub mod operators;
pub mod tokens;

pub use fields::{classify_field, SearchField};
pub use item::{AstError, BooleanKind, SearchItem};
pub use operators::{classify_operation, FieldOperation};
pub use tokens::Token;
