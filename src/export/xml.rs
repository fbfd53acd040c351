//! XML serialization of an [`XmlTree`]
//!
//! Pretty output indents element-only content two spaces per level. Paragraphs and other
//! elements with mixed content (text interleaved with `<a>` links) are written on one line
//! so that no whitespace is introduced into their text.

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

use crate::ism::tree::{NodeId, XmlTree};

const INDENT: usize = 2;

/// Elements holding running text, even when it is all inside links
const INLINE_ELEMENTS: &[&str] = &["p"];

/// Serialize the tree, declaration included
pub fn to_xml_string(tree: &XmlTree, pretty: bool) -> Result<String> {
    let mut writer = if pretty {
        Writer::new_with_indent(Vec::new(), b' ', INDENT)
    } else {
        Writer::new(Vec::new())
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    if pretty {
        write_indented(&mut writer, tree, tree.root(), 0)?;
    } else {
        write_element(&mut writer, tree, tree.root())?;
    }

    let mut bytes = writer.into_inner();
    if pretty {
        bytes.push(b'\n');
    }
    Ok(String::from_utf8(bytes)?)
}

fn start_tag<'a>(tree: &'a XmlTree, id: NodeId) -> BytesStart<'a> {
    let element = tree.get(id);
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    start
}

/// Write an element, its text, its children and their tails, with no added whitespace
fn write_element<W: Write>(writer: &mut Writer<W>, tree: &XmlTree, id: NodeId) -> Result<()> {
    let element = tree.get(id);
    let start = start_tag(tree, id);

    if element.text.is_empty() && element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for &child in element.children() {
        write_element(writer, tree, child)?;
        let tail = &tree.get(child).tail;
        if !tail.is_empty() {
            writer.write_event(Event::Text(BytesText::new(tail)))?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn write_indented(
    writer: &mut Writer<Vec<u8>>,
    tree: &XmlTree,
    id: NodeId,
    depth: usize,
) -> Result<()> {
    let element = tree.get(id);

    if is_inline(tree, id) {
        let mut inline = Writer::new(Vec::new());
        write_element(&mut inline, tree, id)?;
        let out = writer.get_mut();
        out.push(b'\n');
        out.extend(std::iter::repeat_n(b' ', depth * INDENT));
        out.extend(inline.into_inner());
        return Ok(());
    }

    let start = start_tag(tree, id);
    if element.text.is_empty() && element.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for &child in element.children() {
        write_indented(writer, tree, child, depth + 1)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

fn is_inline(tree: &XmlTree, id: NodeId) -> bool {
    let element = tree.get(id);
    let children = element.children();
    if children.is_empty() {
        return false;
    }
    INLINE_ELEMENTS.contains(&element.name.as_str())
        || !element.text.is_empty()
        || children.iter().any(|&child| !tree.get(child).tail.is_empty())
}
