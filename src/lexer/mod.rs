pub mod token;
pub mod value;

pub use token::Token;
pub use value::{ToValue, Value};

use crate::error::Error;

/// The expression delimiters of one engine instance. Fixed for the
/// lifetime of the engine; nested delimiters are not supported, and
/// there is no escaping of literal delimiter sequences.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Delimiters {
    pub start: String,
    pub end: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new("{{", "}}")
    }
}

impl Delimiters {
    pub fn new(start: impl ToString, end: impl ToString) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// A token together with the line and column where it starts,
/// carried through parsing for error reporting.
#[derive(Debug, Clone)]
pub struct TokenWithContext {
    token: Token,
    line: usize,
    column: usize,
}

impl std::fmt::Display for TokenWithContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:?} (line: {}, column: {})",
            self.token, self.line, self.column
        )
    }
}

impl TokenWithContext {
    pub fn new(token: Token, line: usize, column: usize) -> Self {
        Self {
            token,
            line,
            column,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn token(&self) -> Token {
        self.token.clone()
    }
}

/// The lexer converts template text into a list of tokens.
///
/// Anything outside a `{{ ... }}` expression is just text that is
/// printed as-is, represented by `Token::Text`. The content between
/// delimiters is trimmed and becomes `Token::Expression`; what the
/// expression means is decided later, by the program parser.
pub struct Lexer<'a> {
    // Template source.
    source: &'a str,
    // Byte offset of the scan cursor.
    cursor: usize,
    // Which line the cursor is on.
    line: usize,
    // Which column the cursor is on.
    column: usize,
    delimiters: Delimiters,
}

impl<'a> Lexer<'a> {
    /// Create a lexer with the default `{{` / `}}` delimiters.
    pub fn new(source: &'a str) -> Self {
        Self::with_delimiters(source, Delimiters::default())
    }

    pub fn with_delimiters(source: &'a str, delimiters: Delimiters) -> Self {
        Self {
            source,
            cursor: 0,
            line: 1,
            column: 1,
            delimiters,
        }
    }

    /// Scan the source left to right into tokens.
    ///
    /// Each iteration finds the next start delimiter; the text before it
    /// becomes a `Text` token, the trimmed slice up to the matching end
    /// delimiter becomes an `Expression` token. A start delimiter without
    /// a matching end delimiter fails the whole parse; no partial token
    /// list is ever returned.
    pub fn tokens(mut self) -> Result<Vec<TokenWithContext>, Error> {
        let mut tokens = vec![];
        let start = self.delimiters.start.clone();
        let end = self.delimiters.end.clone();

        while self.cursor < self.source.len() {
            let rest = &self.source[self.cursor..];

            let start_index = match rest.find(&start) {
                Some(index) => index,
                None => {
                    // No more expressions, the rest is text.
                    tokens.push(self.token(Token::Text(rest.to_string())));
                    break;
                }
            };

            if start_index > 0 {
                let text = &rest[..start_index];
                tokens.push(self.token(Token::Text(text.to_string())));
                self.advance(start_index);
            }

            // Position of the expression, for error reporting.
            let (line, column) = (self.line, self.column);
            self.advance(start.len());

            let rest = &self.source[self.cursor..];
            let end_index = match rest.find(&end) {
                Some(index) => index,
                None => {
                    return Err(Error::UnclosedExpression {
                        line,
                        column,
                        end: end.clone(),
                    })
                }
            };

            let expression = rest[..end_index].trim().to_string();
            tokens.push(TokenWithContext::new(
                Token::Expression(expression),
                line,
                column,
            ));

            self.advance(end_index + end.len());
        }

        Ok(tokens)
    }

    fn token(&self, token: Token) -> TokenWithContext {
        TokenWithContext::new(token, self.line, self.column)
    }

    // Move the cursor forward, keeping the line and column counters in sync.
    fn advance(&mut self, bytes: usize) {
        for c in self.source[self.cursor..self.cursor + bytes].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.cursor += bytes;
    }
}

/// Easily tokenize strings with the default delimiters.
pub trait Tokenize {
    fn tokenize(&self) -> Result<Vec<TokenWithContext>, Error>;
}

impl Tokenize for &str {
    fn tokenize(&self) -> Result<Vec<TokenWithContext>, Error> {
        Lexer::new(self).tokens()
    }
}

impl Tokenize for String {
    fn tokenize(&self) -> Result<Vec<TokenWithContext>, Error> {
        Lexer::new(self).tokens()
    }
}
