//! Query tokenizer
//!
//! Splits a query on whitespace and builds a nested token tree out of the
//! structural operators: `-` (negation), `(`/`)` (grouping) and `|` (OR).
//! Tokens know nothing about condition kinds; see the parser for that.

use crate::error::{QueryError, Result};
use crate::value::is_blank;
use std::mem;

/// Specification-independent token tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A single `type:value` word
    Plain(String),
    /// `-` prefixed token
    Negated(Box<Token>),
    /// Conjunctive group
    Group(Vec<Token>),
    /// Disjunctive group, one entry per branch
    Or(Vec<Token>),
}

impl Token {
    pub fn plain(text: impl Into<String>) -> Self {
        Token::Plain(text.into())
    }

    pub fn negated(token: Token) -> Self {
        Token::Negated(Box::new(token))
    }

    /// A token is empty unless it holds at least one non-blank word
    pub fn is_empty(&self) -> bool {
        match self {
            Token::Plain(text) => is_blank(text),
            Token::Negated(token) => token.is_empty(),
            Token::Group(tokens) | Token::Or(tokens) => tokens.iter().all(Token::is_empty),
        }
    }

    #[inline]
    fn is_or_operator(&self) -> bool {
        matches!(self, Token::Plain(text) if text == "|")
    }
}

/// One token as-is, anything else as a [`Token::Group`]
pub fn reduce(mut tokens: Vec<Token>) -> Token {
    if tokens.len() == 1 {
        tokens.remove(0)
    } else {
        Token::Group(tokens)
    }
}

/// Tokenize a query. Blank input yields `None`.
pub fn tokenize(query: &str) -> Result<Option<Vec<Token>>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let capture = Scanner { parts: &parts }.capture(0, false)?;
    tracing::trace!(parts = parts.len(), tokens = capture.tokens.len(), "tokenized query");
    Ok(Some(capture.tokens))
}

/// Tokens of one scan and the index of the first part after it
struct Capture {
    tokens: Vec<Token>,
    next: usize,
}

struct Scanner<'a> {
    parts: &'a [&'a str],
}

impl Scanner<'_> {
    /// Scan from `offset`, stopping at a `)` when `closing` is set
    fn capture(&self, offset: usize, closing: bool) -> Result<Capture> {
        let mut tokens = Vec::new();
        let mut index = offset;
        let mut closed = false;

        while index < self.parts.len() {
            let part = self.parts[index];
            if part == ")" {
                if !closing {
                    return Err(QueryError::UnopenedGroup(self.context(0, index + 1)));
                }
                closed = true;
                break;
            }
            let (token, next) = self.scan(part, index)?;
            tokens.push(token);
            index = next;
        }

        if closing && !closed {
            return Err(QueryError::UnclosedGroup(
                self.context(offset.saturating_sub(1), self.parts.len()),
            ));
        }

        let tokens = split_or(tokens, || self.context(offset, index))?;
        Ok(Capture {
            tokens,
            next: if closed { index + 1 } else { index },
        })
    }

    /// Scan one part, wrapping it once per leading `-`
    fn scan(&self, text: &str, index: usize) -> Result<(Token, usize)> {
        let rest = text.trim_start_matches('-');
        let negations = text.len() - rest.len();

        let (mut token, next) = self.scan_atom(rest, index)?;
        for _ in 0..negations {
            token = Token::negated(token);
        }
        Ok((token, next))
    }

    fn scan_atom(&self, text: &str, index: usize) -> Result<(Token, usize)> {
        match text {
            "(" => {
                let nested = self.capture(index + 1, true)?;
                let token = match nested.tokens.len() {
                    0 => Token::Group(Vec::new()),
                    _ => reduce(nested.tokens),
                };
                Ok((token, nested.next))
            }
            ")" => Err(QueryError::UnopenedGroup(self.context(0, index + 1))),
            _ => Ok((Token::plain(text), index + 1)),
        }
    }

    fn context(&self, start: usize, end: usize) -> String {
        self.parts[start..end.min(self.parts.len())].join(" ")
    }
}

/// Emptiness of a token built by the scanner.
///
/// Groups and ORs only ever hold non-empty tokens once `split_or` has run, so
/// their emptiness is their length.
fn is_scanned_empty(token: &Token) -> bool {
    let mut token = token;
    loop {
        match token {
            Token::Negated(inner) => token = inner,
            Token::Plain(text) => return is_blank(text),
            Token::Group(tokens) | Token::Or(tokens) => return tokens.is_empty(),
        }
    }
}

/// Drop empty tokens and split the rest on bare `|` into OR branches
fn split_or(tokens: Vec<Token>, context: impl Fn() -> String) -> Result<Vec<Token>> {
    let mut branches = Vec::new();
    let mut current = Vec::new();

    for token in tokens.into_iter().filter(|t| !is_scanned_empty(t)) {
        if token.is_or_operator() {
            if current.is_empty() {
                return Err(QueryError::OrWithoutLeftOperand(context()));
            }
            branches.push(reduce(mem::take(&mut current)));
            continue;
        }
        current.push(token);
    }

    if branches.is_empty() {
        return Ok(current);
    }
    if current.is_empty() {
        return Err(QueryError::OrWithoutRightOperand(context()));
    }
    branches.push(reduce(current));
    Ok(vec![Token::Or(branches)])
}
