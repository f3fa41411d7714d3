use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub slice: &'a str,
    pub offset: usize,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    /// Byte range covered by this token, for diagnostics.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.slice.len()
    }
}

impl<'a> std::fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slice)
    }
}

/// Kind of a lexical unit.
///
/// Characters that are neither digits, whitespace nor one of the four
/// operators are not rejected here: they come through as `Other` and it is up
/// to the parser to refuse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Plus,
    Minus,
    Star,
    Slash,
    Other(char),
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Number => write!(f, "Number"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Other(c) => write!(f, "{c}"),
        }
    }
}

/// Scans source text into [`Token`]s.
///
/// The source is never modified; the only state is the unconsumed remainder
/// and its byte offset. A lexer cannot be rewound, build a new one instead.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    rest: &'a str,
    byte: usize,
    peeked: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            rest: input,
            byte: 0,
            peeked: None,
        }
    }

    pub fn peek(&mut self) -> Option<&Token<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }

        self.peeked.as_ref()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(next) = self.peeked.take() {
            return Some(next);
        }

        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let offset = self.byte;
            let c_onwards = self.rest;
            self.rest = chars.as_str();
            self.byte += c.len_utf8();

            let kind = match c {
                ' ' | '\t' | '\n' => continue,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '0'..='9' => {
                    let end = c_onwards
                        .find(|c: char| !c.is_ascii_digit())
                        .unwrap_or(c_onwards.len());
                    let literal = &c_onwards[..end];
                    let extra_byte = literal.len() - c.len_utf8();
                    self.byte += extra_byte;
                    self.rest = &self.rest[extra_byte..];

                    trace!(offset, literal, "number");
                    return Some(Token {
                        slice: literal,
                        offset,
                        kind: TokenKind::Number,
                    });
                }
                other => TokenKind::Other(other),
            };

            trace!(offset, %kind, "symbol");
            return Some(Token {
                slice: &c_onwards[..c.len_utf8()],
                offset,
                kind,
            });
        }
    }
}

/// Tokenizes the whole of `source`. Never fails.
pub fn lex(source: &str) -> Vec<Token<'_>> {
    let tokens: Vec<_> = Lexer::new(source).collect();
    debug!(count = tokens.len(), "lexed source");
    tokens
}
