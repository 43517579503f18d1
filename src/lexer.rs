use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::ast::Token;

/// Run of characters the lexer does not treat specially. An apostrophe opens a
/// quoted literal only at the start of a token, so `Urza's` is one word.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^\s()"':<>=!][^\s()":<>=!]*"#).expect("word pattern is valid")
});

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },
}

/// Byte offset into the source, reported by lexer errors.
pub type Position = usize;

pub struct Lexer {
    input: String,
    position: Position,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.to_string(),
            position: 0,
        }
    }

    fn rest(&self) -> &str {
        &self.input[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn previous_char(&self) -> Option<char> {
        self.input[..self.position].chars().next_back()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads a quoted literal and returns it with its delimiters.
    fn read_quoted(&mut self, quote: char) -> Result<Token, LexError> {
        let start = self.position;
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(Token::Quoted(self.input[start..self.position].to_string()));
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_word(&mut self) -> Option<Token> {
        let len = WORD.find(self.rest())?.end();
        let word = self.rest()[..len].to_string();
        self.position += len;

        let token = if word.eq_ignore_ascii_case("and") {
            Token::And
        } else if word.eq_ignore_ascii_case("or") {
            Token::Or
        } else if word.eq_ignore_ascii_case("not") {
            Token::Not
        } else {
            Token::Word(word)
        };
        Some(token)
    }

    /// `-` negates only at the start of a token and when glued to a word, quote
    /// or group: `-t:flame`, `-"x"`, `-(a b)`. In `t:-flame` it is part of the value.
    fn is_negation_prefix(&self) -> bool {
        let token_start = self
            .previous_char()
            .is_none_or(|c| c.is_whitespace() || c == '(');
        token_start
            && self
                .peek_char(1)
                .is_some_and(|c| c.is_alphabetic() || c == '"' || c == '\'' || c == '(')
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn pair(&mut self, second: char, double: Token, single: Token) -> Token {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            double
        } else {
            self.advance();
            single
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some(':') => self.single(Token::Colon),
            Some('=') => self.single(Token::Eq),
            Some('>') => self.pair('=', Token::GtEq, Token::Gt),
            Some('<') => self.pair('=', Token::LtEq, Token::Lt),
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::NotEq
                } else {
                    return Err(LexError::UnexpectedCharacter {
                        ch: '!',
                        position: self.position,
                    });
                }
            }
            Some('-') if self.is_negation_prefix() => self.single(Token::Minus),
            Some(quote @ ('"' | '\'')) => self.read_quoted(quote)?,
            Some(ch) => match self.read_word() {
                Some(token) => token,
                None => {
                    return Err(LexError::UnexpectedCharacter {
                        ch,
                        position: self.position,
                    });
                }
            },
        };

        Ok(token)
    }

    /// Lexes the whole input, `Eof` included.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("AND or Not");
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Not);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_field_term() {
    let mut lexer = Lexer::new("-t:flame OR r>=3");
    assert_eq!(lexer.next_token().unwrap(), Token::Minus);
    assert_eq!(lexer.next_token().unwrap(), Token::Word("t".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Colon);
    assert_eq!(lexer.next_token().unwrap(), Token::Word("flame".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Word("r".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::GtEq);
    assert_eq!(lexer.next_token().unwrap(), Token::Word("3".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
