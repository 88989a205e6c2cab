//! Line-preserving HTML pretty-printer
//!
//! Lines are re-indented by the depth of the open tag stack; line breaks are
//! never added or removed, so the snippet body keeps its line structure.
//! Special cases:
//! - void tags such as `br` never open a level
//! - `pre` and `code` contents are copied verbatim
//! - an unclosed `p` is closed implicitly by the next block-level tag

const INDENT: &str = "\t";

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const VERBATIM_TAGS: &[&str] = &["pre", "code"];

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre",
    "section", "table", "ul",
];

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open { name: String, self_closing: bool },
    Close { name: String },
    Text(&'a str),
}

struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    const fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.src[self.pos..];
        if rest.is_empty() {
            return None;
        }

        if let Some((token, len)) = parse_tag(rest) {
            self.pos += len;
            return Some(token);
        }

        // A '<' that does not start a tag is plain text
        let skip = usize::from(rest.starts_with('<'));
        let end = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
        self.pos += end;
        Some(Token::Text(&rest[..end]))
    }
}

fn parse_tag(rest: &str) -> Option<(Token<'static>, usize)> {
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&b'<') {
        return None;
    }
    let (closing, name_start) = if bytes.get(1) == Some(&b'/') {
        (true, 2)
    } else {
        (false, 1)
    };
    if !bytes.get(name_start).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }

    let end = find_tag_end(rest, name_start)?;
    let inner = &rest[name_start..end];
    let name_len = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == ':'))
        .unwrap_or(inner.len());
    let name = inner[..name_len].to_ascii_lowercase();

    let token = if closing {
        Token::Close { name }
    } else {
        Token::Open {
            name,
            self_closing: inner.trim_end().ends_with('/'),
        }
    };
    Some((token, end + 1))
}

/// Index of the `>` closing a tag, skipping quoted attribute values
fn find_tag_end(rest: &str, from: usize) -> Option<usize> {
    let mut quote = None;
    for (idx, c) in rest.char_indices().skip_while(|(i, _)| *i < from) {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            (None, '>') => return Some(idx),
            (None, '<') => return None,
            _ => {}
        }
    }
    None
}

fn is_void(name: &str) -> bool {
    VOID_TAGS.contains(&name)
}

fn is_block(name: &str) -> bool {
    BLOCK_TAGS.contains(&name)
}

/// Open-tag stack plus verbatim state
#[derive(Debug, Default, Clone)]
struct TagStack {
    open: Vec<String>,
    verbatim: Option<String>,
}

impl TagStack {
    fn depth(&self) -> usize {
        self.open.len()
    }

    fn close(&mut self, name: &str) {
        if let Some(idx) = self.open.iter().rposition(|open| open == name) {
            self.open.truncate(idx);
        }
    }

    fn close_implicit_paragraph(&mut self, opening: &str) {
        if is_block(opening) && self.open.last().is_some_and(|top| top == "p") {
            self.open.pop();
        }
    }

    fn apply(&mut self, token: &Token<'_>) {
        if let Some(verbatim) = &self.verbatim {
            if matches!(token, Token::Close { name } if name == verbatim) {
                self.verbatim = None;
            }
            return;
        }

        match token {
            Token::Open { name, self_closing } => {
                self.close_implicit_paragraph(name);
                if VERBATIM_TAGS.contains(&name.as_str()) {
                    if !self_closing {
                        self.verbatim = Some(name.clone());
                    }
                } else if !self_closing && !is_void(name) {
                    self.open.push(name.clone());
                }
            }
            Token::Close { name } => self.close(name),
            Token::Text(_) => {}
        }
    }

    /// Depth at which `line` should be printed
    ///
    /// Leading closing tags, and a block tag closing an open `p`, dedent the
    /// line they start.
    fn indent_for(&self, line: &str) -> usize {
        let mut preview = self.clone();
        for token in Tokenizer::new(line) {
            match &token {
                Token::Close { name } => preview.close(name),
                Token::Open { name, .. } => {
                    preview.close_implicit_paragraph(name);
                    break;
                }
                Token::Text(text) if text.trim().is_empty() => {}
                Token::Text(_) => break,
            }
        }
        preview.depth()
    }
}

/// Re-indent an HTML fragment by tag depth
///
/// Text without any tag is returned unchanged.
#[must_use]
pub fn prettify_html(html: &str) -> String {
    let has_markup = Tokenizer::new(html).any(|token| !matches!(token, Token::Text(_)));
    if !has_markup {
        return html.to_string();
    }

    let mut stack = TagStack::default();
    let mut lines = Vec::new();

    for line in html.lines() {
        if stack.verbatim.is_some() {
            lines.push(line.trim_end().to_string());
        } else {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                lines.push(String::new());
                continue;
            }
            lines.push(format!("{}{trimmed}", INDENT.repeat(stack.indent_for(trimmed))));
        }

        for token in Tokenizer::new(line) {
            stack.apply(&token);
        }
    }

    lines.join("\n")
}
