//! Minimal XML element tree on top of quick-xml, shared by the XML dialects

use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

/// XML reading and writing failures
#[derive(Debug, Error)]
pub enum XmlError {
    /// Tokenizer or writer error
    #[error(transparent)]
    Syntax(#[from] quick_xml::Error),
    /// Malformed attribute
    #[error(transparent)]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    /// CDATA or output that is not UTF-8
    #[error("invalid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    /// Document without a root element
    #[error("document has no root element")]
    NoRoot,
    /// More than one top-level element
    #[error("document has more than one root element")]
    MultipleRoots,
    /// Non-whitespace text outside the root element
    #[error("unexpected text outside the root element")]
    StrayText,
    /// Element left open at end of input
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    /// Root element has an unexpected name
    #[error("expected <{expected}> root element, found <{found}>")]
    UnexpectedRoot {
        /// Required root name
        expected: &'static str,
        /// Actual root name
        found: String,
    },
}

/// Parsed element with its attributes, text and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA content of this element
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    /// Value of attribute `key`
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First child element named `name`
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements named `name`
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Text of the first child element named `name`
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// Fail unless this element is named `expected`
    pub fn expect_name(self, expected: &'static str) -> Result<Self, XmlError> {
        if self.name == expected {
            Ok(self)
        } else {
            Err(XmlError::UnexpectedRoot {
                expected,
                found: self.name,
            })
        }
    }
}

/// Parse `text` into its root element
pub fn parse_document(text: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(text.trim());
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or(XmlError::StrayText)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                match stack.last_mut() {
                    Some(top) => top.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(XmlError::StrayText),
                }
            }
            Event::CData(data) => {
                let data = std::str::from_utf8(&data)?;
                match stack.last_mut() {
                    Some(top) => top.text.push_str(data),
                    None => return Err(XmlError::StrayText),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.name));
    }
    root.ok_or(XmlError::NoRoot)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(XmlError::MultipleRoots)
    }
}

/// Run `build` against an indenting writer and return the document text
pub fn write_document<F>(build: F) -> Result<String, XmlError>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<(), quick_xml::Error>,
{
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    build(&mut writer)?;
    let bytes = writer.into_inner();
    Ok(std::str::from_utf8(&bytes)?.to_string())
}
