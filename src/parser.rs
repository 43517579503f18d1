use std::mem;

use thiserror::Error;

use crate::{
    ast::Token,
    lexer::{LexError, Lexer},
    tree::{ParseTree, RuleKind},
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("empty query")]
    EmptyQuery,
    #[error("expected {expected}, found '{found}'")]
    UnexpectedToken { expected: &'static str, found: String },
    #[error("expected {expected}, found end of query")]
    UnexpectedEof { expected: &'static str },
}

/// Recursive descent parser building a [`ParseTree`].
///
/// Every token it consumes ends up as a terminal leaf, so the reducer sees the
/// same structure a generated grammar would hand it.
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    peek_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let peek_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            peek_token,
        })
    }

    /// Moves to the next token and returns the one consumed.
    fn advance(&mut self) -> Result<Token, ParseError> {
        let next = self.lexer.next_token()?;
        let peek = mem::replace(&mut self.peek_token, next);
        Ok(mem::replace(&mut self.current_token, peek))
    }

    fn terminal(&mut self) -> Result<ParseTree, ParseError> {
        Ok(ParseTree::terminal(self.advance()?))
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match &self.current_token {
            Token::Eof => ParseError::UnexpectedEof { expected },
            token => ParseError::UnexpectedToken {
                expected,
                found: token.lexeme().to_string(),
            },
        }
    }

    fn expect(&mut self, expected: Token, name: &'static str) -> Result<ParseTree, ParseError> {
        if self.current_token != expected {
            return Err(self.unexpected(name));
        }
        self.terminal()
    }

    /// query : expression EOF
    pub fn parse(&mut self) -> Result<ParseTree, ParseError> {
        if self.current_token == Token::Eof {
            return Err(ParseError::EmptyQuery);
        }

        let expression = self.parse_expression()?;
        let eof = self.expect(Token::Eof, "end of query")?;
        Ok(ParseTree::rule(RuleKind::Query, vec![expression, eof]))
    }

    /// expression : orExpression
    fn parse_expression(&mut self) -> Result<ParseTree, ParseError> {
        let or = self.parse_or()?;
        Ok(ParseTree::rule(RuleKind::Expression, vec![or]))
    }

    /// orExpression : andExpression (OR andExpression)*
    fn parse_or(&mut self) -> Result<ParseTree, ParseError> {
        let mut children = vec![self.parse_and()?];

        while self.current_token == Token::Or {
            children.push(self.terminal()?);
            children.push(self.parse_and()?);
        }

        Ok(ParseTree::rule(RuleKind::OrExpression, children))
    }

    /// andExpression : primaryExpression (AND? primaryExpression)*
    fn parse_and(&mut self) -> Result<ParseTree, ParseError> {
        let mut children = vec![self.parse_primary()?];

        loop {
            if self.current_token == Token::And {
                children.push(self.terminal()?);
                children.push(self.parse_primary()?);
            } else if self.current_token.starts_primary() {
                children.push(self.parse_primary()?);
            } else {
                break;
            }
        }

        Ok(ParseTree::rule(RuleKind::AndExpression, children))
    }

    /// primaryExpression : (NOT | '-')? ( '(' expression ')' | term )
    fn parse_primary(&mut self) -> Result<ParseTree, ParseError> {
        let mut children = Vec::new();

        if self.current_token.is_negation() {
            children.push(self.terminal()?);
        }

        if self.current_token == Token::LParen {
            children.push(self.terminal()?);
            children.push(self.parse_expression()?);
            children.push(self.expect(Token::RParen, "')'")?);
        } else {
            children.push(self.parse_term()?);
        }

        Ok(ParseTree::rule(RuleKind::PrimaryExpression, children))
    }

    /// term : fieldSpecifier (':' | comparisonOperator) atomicValue? | atomicValue
    fn parse_term(&mut self) -> Result<ParseTree, ParseError> {
        let is_field_term = matches!(self.current_token, Token::Word(_))
            && (self.peek_token == Token::Colon || self.peek_token.is_comparison());

        if !is_field_term {
            let value = self.parse_atomic_value()?;
            return Ok(ParseTree::rule(RuleKind::Term, vec![value]));
        }

        let field = ParseTree::rule(RuleKind::FieldSpecifier, vec![self.terminal()?]);
        let operator = if self.current_token == Token::Colon {
            self.terminal()?
        } else {
            ParseTree::rule(RuleKind::ComparisonOperator, vec![self.terminal()?])
        };

        let mut children = vec![field, operator];
        // `t:` with nothing after it still parses; the reducer fills in a default value
        if matches!(self.current_token, Token::Word(_) | Token::Quoted(_)) {
            children.push(self.parse_atomic_value()?);
        }

        Ok(ParseTree::rule(RuleKind::Term, children))
    }

    /// atomicValue : WORD | QUOTED
    fn parse_atomic_value(&mut self) -> Result<ParseTree, ParseError> {
        match self.current_token {
            Token::Word(_) | Token::Quoted(_) => {
                let leaf = self.terminal()?;
                Ok(ParseTree::rule(RuleKind::AtomicValue, vec![leaf]))
            }
            _ => Err(self.unexpected("a search term")),
        }
    }
}
