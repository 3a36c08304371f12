//! Strict parser for the statistics mapping literal.
//!
//! Accepts JSON objects as well as the looser form the solver's reporter
//! prints: bare integer keys, single-quoted strings and trailing commas.
//! The text is only ever parsed, never evaluated.

use std::fmt;
use thiserror::Error;

/// A parsed literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Literal>),
    /// Pairs in source order; duplicate keys are kept so the caller can reject them.
    Map(Vec<(Literal, Literal)>),
}

impl Literal {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Literal::Int(i) => Some(*i as f64),
            Literal::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Str(_) => "string",
            Literal::List(_) => "list",
            Literal::Map(_) => "mapping",
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(i) => write!(f, "{}", i),
            Literal::Float(x) => write!(f, "{}", x),
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::List(items) => write!(f, "[{} items]", items.len()),
            Literal::Map(pairs) => write!(f, "{{{} pairs}}", pairs.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedEnd,
    UnexpectedChar(char),
    UnterminatedString,
    InvalidEscape(char),
    InvalidNumber(String),
    TrailingContent,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedEnd => write!(f, "unexpected end of input"),
            ParseErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            ParseErrorKind::UnterminatedString => write!(f, "unterminated string"),
            ParseErrorKind::InvalidEscape(c) => write!(f, "invalid escape \\{}", c),
            ParseErrorKind::InvalidNumber(s) => write!(f, "invalid number `{}`", s),
            ParseErrorKind::TrailingContent => write!(f, "unexpected content after the literal"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}, column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn is_unexpected_end(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::UnexpectedEnd | ParseErrorKind::UnterminatedString
        )
    }
}

/// Parse `text` as exactly one literal, surrounded only by whitespace.
pub fn parse(text: &str) -> Result<Literal, ParseError> {
    let mut parser = Parser::new(text);
    let value = parser.value()?;
    parser.skip_ws();
    if parser.peek().is_some() {
        return Err(parser.error(ParseErrorKind::TrailingContent));
    }
    Ok(value)
}

/// Byte offset just past the closing brace of the first top-level `{ ... }`,
/// or `None` if it has not closed yet. Braces inside quoted strings are ignored.
pub fn closed_at(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' if depth > 0 => quote = Some(c),
            '{' => depth += 1,
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx + 1);
                }
            }
            _ => {}
        }
    }
    None
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            line: self.line,
            column: self.column,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, want: char) -> Result<(), ParseError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(ParseErrorKind::UnexpectedChar(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    fn value(&mut self) -> Result<Literal, ParseError> {
        self.skip_ws();
        match self.peek() {
            Some('{') => self.map(),
            Some('[') => self.list(),
            Some(q @ ('"' | '\'')) => self.string(q).map(Literal::Str),
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => self.number(),
            Some(c) => Err(self.error(ParseErrorKind::UnexpectedChar(c))),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }

    /// Parses comma separated items up to `close`, allowing one trailing comma.
    fn items<T>(
        &mut self,
        close: char,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut out = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(c) if c == close => {
                    self.bump();
                    return Ok(out);
                }
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                _ => {}
            }

            out.push(item(self)?);

            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if c == close => {}
                Some(c) => return Err(self.error(ParseErrorKind::UnexpectedChar(c))),
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
            }
        }
    }

    fn map(&mut self) -> Result<Literal, ParseError> {
        self.expect('{')?;
        let pairs = self.items('}', |p| {
            let key = p.value()?;
            p.expect(':')?;
            let value = p.value()?;
            Ok((key, value))
        })?;
        Ok(Literal::Map(pairs))
    }

    fn list(&mut self) -> Result<Literal, ParseError> {
        self.expect('[')?;
        let items = self.items(']', |p| p.value())?;
        Ok(Literal::List(items))
    }

    fn string(&mut self, quote: char) -> Result<String, ParseError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error(ParseErrorKind::UnterminatedString)),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => {
                    let escaped = match self.bump() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some(c @ ('\\' | '"' | '\'')) => c,
                        Some(c) => return Err(self.error(ParseErrorKind::InvalidEscape(c))),
                        None => return Err(self.error(ParseErrorKind::UnterminatedString)),
                    };
                    out.push(escaped);
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Literal, ParseError> {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        let mut is_float = false;

        if let Some(sign @ ('-' | '+')) = self.peek() {
            text.push(sign);
            self.bump();
        }
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {}
                '.' | 'e' | 'E' => is_float = true,
                '-' | '+' if matches!(text.chars().last(), Some('e' | 'E')) => {}
                _ => break,
            }
            text.push(c);
            self.bump();
        }

        let invalid = || ParseError {
            kind: ParseErrorKind::InvalidNumber(text.clone()),
            line,
            column,
        };

        if is_float {
            let value: f64 = text.parse().map_err(|_| invalid())?;
            if !text.trim_start_matches(['-', '+']).starts_with(|c: char| c.is_ascii_digit()) {
                return Err(invalid());
            }
            Ok(Literal::Float(value))
        } else {
            text.parse::<i64>().map(Literal::Int).map_err(|_| invalid())
        }
    }
}
