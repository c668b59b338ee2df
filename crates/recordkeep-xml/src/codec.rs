//! Reading and writing XML documents.
//!
//! Parsing drops whitespace-only text (the indentation between elements) and
//! keeps every other text node byte for byte, so a document written by
//! [`write_document`] reads back to the same tree. Comments and processing
//! instructions inside the root are kept; those outside it, and doctype
//! declarations, are dropped.

use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::element::{Element, Node};
use crate::error::{Result, XmlError};

/// Indentation width of written documents.
pub const INDENT: usize = 2;

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| XmlError::Malformed(format!("invalid UTF-8: {e}")))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(utf8(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        element.set_attribute(name, value);
    }
    Ok(element)
}

/// Attach a finished element to its parent, or make it the root.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_node(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Malformed("more than one root element".into()));
    }
    *root = Some(element);
    Ok(())
}

fn attach_text(stack: &mut [Element], text: String) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.push_node(Node::Text(text));
            Ok(())
        }
        None => Err(XmlError::Malformed("text outside the root element".into())),
    }
}

/// Comments and instructions outside the root have no node to live in.
fn attach_markup(stack: &mut [Element], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.push_node(node);
    }
}

/// Parse a complete document into its root element.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unexpected closing tag".into()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    attach_text(&mut stack, text.unescape()?.into_owned())?;
                }
            }
            Event::CData(data) => {
                attach_text(&mut stack, String::from_utf8_lossy(&data).into_owned())?
            }
            Event::Comment(c) => attach_markup(&mut stack, Node::Comment(utf8(&c)?)),
            Event::PI(pi) => attach_markup(&mut stack, Node::Instruction(utf8(&pi)?)),
            Event::Eof => break,
            // Declarations, doctypes
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Malformed(format!("unclosed element <{}>", open.name())));
    }
    root.ok_or_else(|| XmlError::Malformed("no root element".into()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name());
    for (name, value) in element.attributes() {
        start.push_attribute((name, value));
    }

    if element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in element.children() {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
            Node::Comment(c) => {
                writer.write_event(Event::Comment(BytesText::from_escaped(c.as_str())))?
            }
            Node::Instruction(pi) => writer.write_event(Event::PI(BytesPI::new(pi.as_str())))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}

/// Serialize a document with an XML declaration and stable indentation.
pub fn write_document(root: &Element) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
    write_element(&mut writer, root)?;

    let mut out = String::from_utf8(writer.into_inner())
        .map_err(|e| XmlError::Malformed(format!("writer produced invalid UTF-8: {e}")))?;
    out.push('\n');
    Ok(out)
}
