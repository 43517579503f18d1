use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "token", content = "text", rename_all = "snake_case")]
pub enum Token {
    // Literals
    /// Bare word
    ///
    /// Any run of characters that are not whitespace, parentheses, quotes or
    /// operator characters. A word followed by `:` or a comparison operator
    /// becomes a field specifier.
    ///
    /// # Examples
    /// ```text
    /// blood
    /// t
    /// half-elf
    /// ```
    Word(String),

    /// Quoted literal, delimiters included
    ///
    /// Both double and single quotes are accepted. The raw lexeme is kept so the
    /// parse tree mirrors the source; quotes are stripped during reduction.
    ///
    /// # Examples
    /// ```text
    /// "Destroy all cards"
    /// 'Shadow Rift'
    /// ```
    Quoted(String),

    // Keywords
    /// Explicit conjunction (`AND`, any case)
    ///
    /// # Examples
    /// ```text
    /// t:flame AND t:stun
    /// ```
    And,

    /// Disjunction (`OR`, any case)
    ///
    /// # Examples
    /// ```text
    /// t:flame OR t:stun
    /// ```
    Or,

    /// Negation keyword (`NOT`, any case)
    ///
    /// # Examples
    /// ```text
    /// NOT t:flame
    /// ```
    Not,

    /// Negation shorthand, only at the start of a token
    ///
    /// # Examples
    /// ```text
    /// -t:flame
    /// ```
    Minus,

    // Field operators
    /// Field separator (`:`), equivalent to `=`
    Colon,

    /// Equal (`=`)
    Eq,

    /// Not equal (`!=`)
    NotEq,

    /// Less than (`<`)
    Lt,

    /// Greater than (`>`)
    Gt,

    /// Less than or equal (`<=`)
    LtEq,

    /// Greater than or equal (`>=`)
    GtEq,

    // Delimiters
    /// Left parenthesis for grouping
    LParen,

    /// Right parenthesis
    RParen,

    /// End of input
    Eof,
}

impl Token {
    /// Source text of the token. `Eof` has an empty lexeme.
    pub fn lexeme(&self) -> &str {
        match self {
            Token::Word(text) | Token::Quoted(text) => text,
            Token::And => "AND",
            Token::Or => "OR",
            Token::Not => "NOT",
            Token::Minus => "-",
            Token::Colon => ":",
            Token::Eq => "=",
            Token::NotEq => "!=",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::LtEq => "<=",
            Token::GtEq => ">=",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Eof => "",
        }
    }

    /// Comparison operators, excluding the `:` separator.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Token::Eq | Token::NotEq | Token::Lt | Token::Gt | Token::LtEq | Token::GtEq
        )
    }

    pub fn is_negation(&self) -> bool {
        matches!(self, Token::Not | Token::Minus)
    }

    /// Tokens that can open a primary expression.
    pub fn starts_primary(&self) -> bool {
        matches!(
            self,
            Token::Word(_) | Token::Quoted(_) | Token::Not | Token::Minus | Token::LParen
        )
    }
}
