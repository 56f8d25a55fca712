//! S-expression reader and writer for KiCad board files.
//!
//! Quoted strings and bare symbols are kept apart so a tree can be written
//! back without changing which values KiCad sees as strings.

use std::fmt;
use thiserror::Error;

/// Column after which an inline run of points wraps, as KiCad does.
const POINTS_LINE_WIDTH: usize = 99;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Unexpected token at position {0}: {1}")]
    UnexpectedToken(usize, String),
    #[error("Trailing input at position {0}")]
    TrailingInput(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SExp {
    /// Bare symbol or number.
    Atom(String),
    /// Double-quoted string.
    Str(String),
    List(Vec<SExp>),
}

impl SExp {
    pub fn str(s: impl Into<String>) -> Self {
        SExp::Str(s.into())
    }

    /// Text of an atom or string.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            SExp::Atom(s) | SExp::Str(s) => Some(s),
            SExp::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[SExp]> {
        match self {
            SExp::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<SExp>> {
        match self {
            SExp::List(items) => Some(items),
            _ => None,
        }
    }

    /// Leading symbol of a list, e.g. `net` for `(net 1 "GND")`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()
            .and_then(|items| items.first())
            .and_then(|head| head.as_atom())
    }

    /// Element `index` of a list as text.
    pub fn atom_at(&self, index: usize) -> Option<&str> {
        self.as_list()
            .and_then(|items| items.get(index))
            .and_then(|item| item.as_atom())
    }

    /// First child list tagged `key`.
    pub fn child(&self, key: &str) -> Option<&SExp> {
        self.as_list()?.iter().find(|item| item.tag() == Some(key))
    }

    /// All child lists tagged `key`.
    pub fn children<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a SExp> + 'a {
        self.as_list()
            .unwrap_or(&[])
            .iter()
            .filter(move |item| item.tag() == Some(key))
    }

    /// Replace element `index` of a list. Returns false if there is no such element.
    pub fn set_at(&mut self, index: usize, value: SExp) -> bool {
        match self.as_list_mut().and_then(|items| items.get_mut(index)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Child-index path of every list tagged `key` below this node.
    pub fn find_paths(&self, key: &str, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        let Some(items) = self.as_list() else {
            return;
        };
        for (i, item) in items.iter().enumerate() {
            if !matches!(item, SExp::List(_)) {
                continue;
            }
            prefix.push(i);
            if item.tag() == Some(key) {
                out.push(prefix.clone());
            }
            item.find_paths(key, prefix, out);
            prefix.pop();
        }
    }

    pub fn at_path(&self, path: &[usize]) -> Option<&SExp> {
        path.iter()
            .try_fold(self, |node, &i| node.as_list().and_then(|items| items.get(i)))
    }

    pub fn at_path_mut(&mut self, path: &[usize]) -> Option<&mut SExp> {
        path.iter().try_fold(self, |node, &i| {
            node.as_list_mut().and_then(|items| items.get_mut(i))
        })
    }

    /// Write the tree in KiCad's layout: child lists on their own lines, tab
    /// indented, except point lists whose entries share wrapped lines.
    pub fn to_pretty_string(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out.push('\n');
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        let items = match self {
            SExp::List(items) if items.iter().any(|i| matches!(i, SExp::List(_))) => items,
            other => {
                out.push_str(&other.to_string());
                return;
            }
        };

        if self.tag() == Some("pts") {
            Self::write_points(items, out, depth);
            return;
        }

        out.push('(');
        let mut first = true;
        for item in items {
            match item {
                SExp::List(_) => {
                    out.push('\n');
                    out.extend(std::iter::repeat('\t').take(depth + 1));
                    item.write_pretty(out, depth + 1);
                }
                _ => {
                    if !first {
                        out.push(' ');
                    }
                    out.push_str(&item.to_string());
                }
            }
            first = false;
        }
        out.push('\n');
        out.extend(std::iter::repeat('\t').take(depth));
        out.push(')');
    }
}

impl SExp {
    fn write_points(items: &[SExp], out: &mut String, depth: usize) {
        out.push('(');
        let mut line = 0;
        let mut first = true;
        for item in items {
            let text = item.to_string();
            match item {
                SExp::List(_) => {
                    if line == 0 || line + 1 + text.len() > POINTS_LINE_WIDTH {
                        out.push('\n');
                        out.extend(std::iter::repeat('\t').take(depth + 1));
                        line = depth + 1;
                    } else {
                        out.push(' ');
                        line += 1;
                    }
                }
                _ if !first => out.push(' '),
                _ => {}
            }
            out.push_str(&text);
            if line > 0 {
                line += text.len();
            }
            first = false;
        }
        out.push('\n');
        out.extend(std::iter::repeat('\t').take(depth));
        out.push(')');
    }
}

impl fmt::Display for SExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExp::Atom(s) => write!(f, "{}", s),
            SExp::Str(s) => {
                write!(f, "\"")?;
                for ch in s.chars() {
                    match ch {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\r' => write!(f, "\\r")?,
                        _ => write!(f, "{}", ch)?,
                    }
                }
                write!(f, "\"")
            }
            SExp::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

pub struct SExpParser {
    input: Vec<char>,
    pos: usize,
}

impl SExpParser {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
        }
    }

    /// Parse exactly one expression; anything but whitespace after it is an error.
    pub fn parse(&mut self) -> Result<SExp, ParseError> {
        self.skip_whitespace();
        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }
        let sexp = self.parse_sexp()?;
        self.skip_whitespace();
        if !self.is_eof() {
            return Err(ParseError::TrailingInput(self.pos));
        }
        Ok(sexp)
    }

    fn parse_sexp(&mut self) -> Result<SExp, ParseError> {
        self.skip_whitespace();

        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }

        match self.peek() {
            '(' => self.parse_list(),
            ')' => Err(ParseError::UnexpectedToken(self.pos, ")".to_string())),
            '"' => self.parse_string(),
            _ => self.parse_symbol(),
        }
    }

    fn parse_list(&mut self) -> Result<SExp, ParseError> {
        self.expect_char('(')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_eof() {
                return Err(ParseError::UnexpectedEof);
            }

            if self.peek() == ')' {
                self.advance();
                break;
            }

            items.push(self.parse_sexp()?);
        }

        Ok(SExp::List(items))
    }

    fn parse_string(&mut self) -> Result<SExp, ParseError> {
        self.expect_char('"')?;
        let mut s = String::new();
        let mut escaped = false;

        loop {
            if self.is_eof() {
                return Err(ParseError::UnexpectedEof);
            }
            let ch = self.peek();
            self.advance();

            if escaped {
                match ch {
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    'r' => s.push('\r'),
                    _ => s.push(ch),
                }
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                break;
            } else {
                s.push(ch);
            }
        }

        Ok(SExp::Str(s))
    }

    fn parse_symbol(&mut self) -> Result<SExp, ParseError> {
        let mut s = String::new();

        while !self.is_eof() {
            let ch = self.peek();
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }
            s.push(ch);
            self.advance();
        }

        if s.is_empty() {
            Err(ParseError::UnexpectedToken(self.pos, self.peek().to_string()))
        } else {
            Ok(SExp::Atom(s))
        }
    }

    fn skip_whitespace(&mut self) {
        while !self.is_eof() && self.peek().is_whitespace() {
            self.advance();
        }
    }

    fn peek(&self) -> char {
        self.input.get(self.pos).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        if self.is_eof() {
            return Err(ParseError::UnexpectedEof);
        }

        let ch = self.peek();
        if ch == expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken(
                self.pos,
                format!("expected '{}', found '{}'", expected, ch),
            ))
        }
    }
}
