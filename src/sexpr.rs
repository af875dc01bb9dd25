// src/sexpr.rs

use crate::error::{Error, Result};
use std::fmt;

/// Property names that the symbol data model does not support. The filter
/// removes each occurrence together with the value that follows it.
pub const UNSUPPORTED_PROPERTIES: &[&str] = &["exclude_from_sim", "embedded_fonts"];

/// One node of a parsed S-expression: an atomic token or a parenthesized
/// group of child nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

impl SExpr {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(s) => Some(s.as_str()),
            SExpr::List(_) => None,
        }
    }

    /// The leading atom of a list, e.g. "symbol" for `(symbol "R" ...)`.
    pub fn tag(&self) -> Option<&str> {
        match self {
            SExpr::List(items) => items.first().and_then(SExpr::as_atom),
            SExpr::Atom(_) => None,
        }
    }

    /// All elements after the tag. Empty for atoms.
    pub fn args(&self) -> &[SExpr] {
        match self {
            SExpr::List(items) if !items.is_empty() => &items[1..],
            _ => &[],
        }
    }

    /// First child list with the given tag.
    pub fn find(&self, tag: &str) -> Option<&SExpr> {
        self.args().iter().find(|c| c.tag() == Some(tag))
    }

    /// All child lists with the given tag, in order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a SExpr> {
        self.args().iter().filter(move |c| c.tag() == Some(tag))
    }

    /// Positional atom argument after the tag, e.g. `arg_str(0)` of
    /// `(property "Reference" "R")` is "Reference".
    pub fn arg_str(&self, index: usize) -> Option<&str> {
        self.args().get(index).and_then(SExpr::as_atom)
    }

    pub fn arg_f32(&self, index: usize) -> Option<f32> {
        self.arg_str(index).and_then(|s| s.parse().ok())
    }
}

/// Parses one S-expression from `text`. Trailing input after the first
/// complete expression is ignored.
pub fn parse(text: &str) -> Result<SExpr> {
    let mut lexer = Lexer {
        input: text.as_bytes(),
        pos: 0,
    };
    lexer.skip_whitespace();
    let node = lexer.parse_node()?;
    Ok(node)
}

struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl Lexer<'_> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn parse_node(&mut self) -> Result<SExpr> {
        match self.input.get(self.pos) {
            Some(b'(') => self.parse_list(),
            Some(b'"') => self.parse_string(),
            Some(_) => self.parse_bare_atom(),
            None => Err(Error::ParseError("unexpected end of input".to_string())),
        }
    }

    fn parse_list(&mut self) -> Result<SExpr> {
        self.pos += 1; // consume '('
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.input.get(self.pos) {
                Some(b')') => {
                    self.pos += 1;
                    return Ok(SExpr::List(items));
                }
                Some(_) => items.push(self.parse_node()?),
                None => {
                    return Err(Error::ParseError("unclosed parenthesis".to_string()));
                }
            }
        }
    }

    fn parse_string(&mut self) -> Result<SExpr> {
        self.pos += 1; // consume opening quote
        let mut bytes = Vec::new();
        while let Some(&b) = self.input.get(self.pos) {
            match b {
                b'"' => {
                    self.pos += 1;
                    let value = String::from_utf8(bytes)
                        .map_err(|e| Error::ParseError(e.to_string()))?;
                    return Ok(SExpr::Atom(value));
                }
                b'\\' => {
                    // KiCad escapes quotes and backslashes inside strings
                    self.pos += 1;
                    if let Some(&esc) = self.input.get(self.pos) {
                        bytes.push(esc);
                        self.pos += 1;
                    }
                }
                _ => {
                    bytes.push(b);
                    self.pos += 1;
                }
            }
        }
        Err(Error::ParseError("unterminated string".to_string()))
    }

    fn parse_bare_atom(&mut self) -> Result<SExpr> {
        let start = self.pos;
        while let Some(&b) = self.input.get(self.pos) {
            if b.is_ascii_whitespace() || b == b'(' || b == b')' {
                break;
            }
            self.pos += 1;
        }
        let token = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|e| Error::ParseError(e.to_string()))?;
        Ok(SExpr::Atom(token.to_string()))
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExpr::Atom(s) => {
                if s.is_empty() || s.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
                    write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
                } else {
                    write!(f, "{s}")
                }
            }
            SExpr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Strips unsupported property tokens from a definition tree, recursively.
///
/// A denylisted atom is removed together with the element that follows it
/// (its value, atom or list). Empty atoms are dropped. Sub-lists are
/// filtered recursively and kept only when non-empty. Sibling order is
/// otherwise preserved. Total: a denylisted atom in trailing position drops
/// just that atom.
pub fn strip_unsupported(node: &SExpr) -> SExpr {
    match node {
        SExpr::Atom(_) => node.clone(),
        SExpr::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            let mut i = 0;
            while i < items.len() {
                match &items[i] {
                    SExpr::Atom(s) if UNSUPPORTED_PROPERTIES.contains(&s.as_str()) => {
                        // skip the token and its value
                        i += 2;
                    }
                    SExpr::Atom(s) if s.is_empty() => {
                        i += 1;
                    }
                    SExpr::Atom(_) => {
                        out.push(items[i].clone());
                        i += 1;
                    }
                    SExpr::List(_) => {
                        let filtered = strip_unsupported(&items[i]);
                        if !matches!(&filtered, SExpr::List(inner) if inner.is_empty()) {
                            out.push(filtered);
                        }
                        i += 1;
                    }
                }
            }
            SExpr::List(out)
        }
    }
}
