//! CSON subset used by Atom snippet files
//!
//! Reads into a [`serde_json::Value`]. Supported syntax:
//! - indentation-based and braced objects, arrays
//! - single and double quoted strings, `'''` / `"""` block strings with
//!   common indentation removed
//! - numbers, booleans (`true`/`yes`/`on` and friends), `null`
//! - `#` line comments and `###` block comments
//!
//! String interpolation is not evaluated; `#{...}` stays literal text.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Syntax error with its 1-based position
#[derive(Debug, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct CsonError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Parse a CSON document
pub fn parse(text: &str) -> Result<Value, CsonError> {
    Parser::new(text).parse_document()
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn starts_with(&self, pattern: &str) -> bool {
        pattern
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn column(&self) -> usize {
        self.chars[..self.pos]
            .iter()
            .rev()
            .take_while(|&&c| c != '\n')
            .count()
    }

    fn error(&self, message: impl Into<String>) -> CsonError {
        let consumed = &self.chars[..self.pos.min(self.chars.len())];
        CsonError {
            line: consumed.iter().filter(|&&c| c == '\n').count() + 1,
            column: self.column() + 1,
            message: message.into(),
        }
    }

    fn skip_inline_space(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) -> Result<(), CsonError> {
        if self.peek() != Some('#') {
            return Ok(());
        }
        if self.starts_with("###") && self.peek_at(3) != Some('#') {
            self.pos += 3;
            while !self.starts_with("###") {
                if self.bump().is_none() {
                    return Err(self.error("unterminated block comment"));
                }
            }
            self.pos += 3;
        } else {
            while !matches!(self.peek(), None | Some('\n')) {
                self.pos += 1;
            }
        }
        Ok(())
    }

    /// Skip whitespace, newlines and comments
    fn skip_trivia(&mut self) -> Result<(), CsonError> {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n') => self.pos += 1,
                Some('#') => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// Trivia plus commas, for braced objects and arrays
    fn skip_separators(&mut self) -> Result<(), CsonError> {
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(',') {
                self.pos += 1;
            } else {
                return Ok(());
            }
        }
    }

    /// Whether only a comment is left on the current line
    fn at_line_end(&mut self) -> Result<bool, CsonError> {
        self.skip_inline_space();
        self.skip_comment()?;
        self.skip_inline_space();
        Ok(matches!(self.peek(), None | Some('\n')))
    }

    fn parse_document(mut self) -> Result<Value, CsonError> {
        self.skip_trivia()?;
        if self.peek().is_none() {
            return Err(self.error("empty document"));
        }

        let value = if self.looks_like_key() {
            let indent = self.column();
            self.parse_implicit_object(indent)?
        } else {
            self.parse_value()?
        };

        self.skip_trivia()?;
        if self.peek().is_some() {
            return Err(self.error("unexpected content after the document"));
        }
        Ok(value)
    }

    fn looks_like_key(&mut self) -> bool {
        let start = self.pos;
        let found = self.parse_key().is_ok() && {
            self.skip_inline_space();
            self.peek() == Some(':')
        };
        self.pos = start;
        found
    }

    fn parse_key(&mut self) -> Result<String, CsonError> {
        match self.peek() {
            Some(quote @ ('\'' | '"')) => {
                if self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote) {
                    return Err(self.error("block string cannot be used as a key"));
                }
                self.parse_quoted(quote)
            }
            Some(c) if is_word_char(c) => Ok(self.take_word()),
            _ => Err(self.error("expected a key")),
        }
    }

    fn expect_colon(&mut self, key: &str) -> Result<(), CsonError> {
        self.skip_inline_space();
        if self.bump() == Some(':') {
            Ok(())
        } else {
            Err(self.error(format!("expected `:` after key `{key}`")))
        }
    }

    /// Object whose keys all start at column `indent`
    fn parse_implicit_object(&mut self, indent: usize) -> Result<Value, CsonError> {
        let mut map = Map::new();
        loop {
            let key = self.parse_key()?;
            self.expect_colon(&key)?;

            let value = if self.at_line_end()? {
                self.parse_nested_value(indent)?
            } else {
                let value = self.parse_value()?;
                self.skip_inline_space();
                if self.peek() == Some(',') {
                    self.pos += 1;
                }
                if !self.at_line_end()? {
                    return Err(self.error("expected end of line"));
                }
                value
            };
            map.insert(key, value);

            self.skip_trivia()?;
            if matches!(self.peek(), None | Some('}' | ']' | ',')) {
                break;
            }
            let column = self.column();
            if column < indent {
                break;
            }
            if column > indent {
                return Err(self.error("unexpected indentation"));
            }
        }
        Ok(Value::Object(map))
    }

    /// Value on the lines after `key:`, indented deeper than the key
    fn parse_nested_value(&mut self, parent_indent: usize) -> Result<Value, CsonError> {
        self.skip_trivia()?;
        let column = self.column();
        if self.peek().is_none() || column <= parent_indent {
            return Err(self.error("missing value"));
        }
        if self.looks_like_key() {
            self.parse_implicit_object(column)
        } else {
            self.parse_value()
        }
    }

    fn parse_value(&mut self) -> Result<Value, CsonError> {
        match self.peek() {
            Some('{') => self.parse_braced_object(),
            Some('[') => self.parse_array(),
            Some(quote @ ('\'' | '"')) => self.parse_string(quote).map(Value::String),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.parse_number(),
            Some(c) if is_word_char(c) => {
                let word = self.take_word();
                match word.as_str() {
                    "true" | "yes" | "on" => Ok(Value::Bool(true)),
                    "false" | "no" | "off" => Ok(Value::Bool(false)),
                    "null" | "undefined" => Ok(Value::Null),
                    _ => Err(self.error(format!("unexpected identifier `{word}`"))),
                }
            }
            Some(c) => Err(self.error(format!("unexpected character `{c}`"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn parse_braced_object(&mut self) -> Result<Value, CsonError> {
        self.pos += 1;
        let mut map = Map::new();
        loop {
            self.skip_separators()?;
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                None => return Err(self.error("unterminated object")),
                Some(_) => {}
            }

            let indent = self.column();
            let key = self.parse_key()?;
            self.expect_colon(&key)?;
            let value = if self.at_line_end()? {
                self.parse_nested_value(indent)?
            } else {
                self.parse_value()?
            };
            map.insert(key, value);
        }
    }

    fn parse_array(&mut self) -> Result<Value, CsonError> {
        self.pos += 1;
        let mut items = Vec::new();
        loop {
            self.skip_separators()?;
            match self.peek() {
                Some(']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                None => return Err(self.error("unterminated array")),
                Some(_) => {}
            }

            let item = if self.looks_like_key() {
                let indent = self.column();
                self.parse_implicit_object(indent)?
            } else {
                self.parse_value()?
            };
            items.push(item);
        }
    }

    fn parse_number(&mut self) -> Result<Value, CsonError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.' | '_'))
        {
            self.pos += 1;
        }
        let literal: String = self.chars[start..self.pos]
            .iter()
            .filter(|&&c| c != '_')
            .collect();

        let number = if let Some(hex) = literal.strip_prefix("0x") {
            i64::from_str_radix(hex, 16).ok().map(Number::from)
        } else if let Ok(int) = literal.parse::<i64>() {
            Some(Number::from(int))
        } else {
            literal.parse::<f64>().ok().and_then(Number::from_f64)
        };
        number
            .map(Value::Number)
            .ok_or_else(|| self.error(format!("invalid number `{literal}`")))
    }

    fn take_word(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(is_word_char) {
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn parse_string(&mut self, quote: char) -> Result<String, CsonError> {
        if self.peek_at(1) == Some(quote) && self.peek_at(2) == Some(quote) {
            self.pos += 3;
            let raw = self.read_block(quote)?;
            return Ok(unescape(&dedent_block(&raw)));
        }
        self.parse_quoted(quote)
    }

    fn read_block(&mut self, quote: char) -> Result<String, CsonError> {
        let mut raw = String::new();
        loop {
            if self.peek() == Some(quote)
                && self.peek_at(1) == Some(quote)
                && self.peek_at(2) == Some(quote)
            {
                self.pos += 3;
                return Ok(raw);
            }
            match self.bump() {
                Some('\\') => {
                    raw.push('\\');
                    if let Some(escaped) = self.bump() {
                        raw.push(escaped);
                    }
                }
                Some(c) => raw.push(c),
                None => return Err(self.error("unterminated block string")),
            }
        }
    }

    /// Single-line quoted string; a line break inside it reads as one space
    fn parse_quoted(&mut self, quote: char) -> Result<String, CsonError> {
        self.pos += 1;
        let mut raw = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(unescape(&raw)),
                Some('\\') => {
                    raw.push('\\');
                    if let Some(escaped) = self.bump() {
                        raw.push(escaped);
                    }
                }
                Some('\n') => {
                    raw.truncate(raw.trim_end_matches([' ', '\t', '\r']).len());
                    self.skip_inline_space();
                    raw.push(' ');
                }
                Some(c) => raw.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$')
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| matches!(c, ' ' | '\t')).count()
}

/// Remove the common indentation of a block string and its blank edge lines
fn dedent_block(raw: &str) -> String {
    let indent = raw
        .split('\n')
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .min()
        .unwrap_or(0);

    let lines: Vec<&str> = raw
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line
            } else {
                let strip = leading_whitespace(line).min(indent);
                &line[strip..]
            }
        })
        .collect();
    let mut text = lines.join("\n");

    if let Some(first_break) = text.find('\n') {
        if text[..first_break].trim().is_empty() {
            text.replace_range(..=first_break, "");
        }
    }
    if let Some(last_break) = text.rfind('\n') {
        if text[last_break + 1..].trim().is_empty() {
            text.truncate(last_break);
        }
    }
    text
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some('\n') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Render `text` as a single-quoted CSON string
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render lines as a `'''` block string
///
/// Content lines are written at `content_indent` and the closing fence at
/// `fence_indent`. Returns `None` when the block would not read back to the
/// same lines (blank edge lines, whitespace-only lines, a shared indent).
pub fn block(lines: &[String], content_indent: &str, fence_indent: &str) -> Option<String> {
    let is_blank = |line: &String| line.trim().is_empty();
    if lines.first().is_none_or(is_blank) || lines.last().is_none_or(is_blank) {
        return None;
    }
    if lines
        .iter()
        .any(|line| (!line.is_empty() && is_blank(line)) || line.contains('\r'))
    {
        return None;
    }
    let shared_indent = lines
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| leading_whitespace(line))
        .min()
        .unwrap_or(0);
    if shared_indent > 0 {
        return None;
    }

    let mut out = String::from("'''\n");
    for line in lines {
        if !line.is_empty() {
            out.push_str(content_indent);
            out.push_str(&line.replace('\\', "\\\\").replace("'''", "\\'\\'\\'"));
        }
        out.push('\n');
    }
    out.push_str(fence_indent);
    out.push_str("'''");
    Some(out)
}
