use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{Declaration, Document, Node};
use crate::document::NodeKind;
use crate::error::DocumentError;

pub(super) fn parse_document(xml: &str) -> Result<Document, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut document = Document::default();
    let mut open: Vec<Node> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => open.push(element_from_start(&start)?),
            Event::Empty(start) => {
                let node = element_from_start(&start)?;
                append(&mut document, &mut open, node);
            }
            Event::End(end) => {
                let name = std::str::from_utf8(end.name().as_ref())?.to_string();
                let node = open.pop().ok_or_else(|| {
                    DocumentError::structure(format!("unexpected closing tag </{name}>"))
                })?;
                if node.name != name {
                    return Err(DocumentError::structure(format!(
                        "expected </{}>, found </{name}>",
                        node.name
                    )));
                }
                append(&mut document, &mut open, node);
            }
            Event::Text(text) => {
                let raw = std::str::from_utf8(&text)?;
                append(&mut document, &mut open, Node::text(raw));
            }
            Event::CData(cdata) => {
                let content = std::str::from_utf8(&cdata)?;
                append(&mut document, &mut open, Node::cdata(content));
            }
            Event::Comment(comment) => {
                let content = std::str::from_utf8(&comment)?;
                append(&mut document, &mut open, Node::comment(content));
            }
            Event::PI(pi) => {
                let content = std::str::from_utf8(&pi)?;
                append(&mut document, &mut open, Node::processing_instruction(content));
            }
            Event::DocType(doctype) => {
                let content = std::str::from_utf8(&doctype)?;
                append(&mut document, &mut open, Node::doctype(content));
            }
            Event::Decl(decl) => document.declaration = Some(declaration_from(&decl)?),
            Event::Eof => break,
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(DocumentError::structure(format!(
            "unclosed element <{}>",
            unclosed.name
        )));
    }
    if document.root().is_none() {
        return Err(DocumentError::structure("document has no root element"));
    }

    Ok(document)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Node, DocumentError> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref())?;
    let mut node = Node::element(name);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn declaration_from(decl: &BytesDecl<'_>) -> Result<Declaration, DocumentError> {
    let version = String::from_utf8_lossy(&decl.version()?).into_owned();
    let encoding = decl
        .encoding()
        .transpose()?
        .map(|value| String::from_utf8_lossy(&value).into_owned());
    let standalone = decl
        .standalone()
        .transpose()?
        .map(|value| String::from_utf8_lossy(&value).into_owned());
    Ok(Declaration {
        version,
        encoding,
        standalone,
    })
}

fn append(document: &mut Document, open: &mut [Node], node: Node) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => document.nodes.push(node),
    }
}

pub(super) fn write_document(document: &Document) -> Result<String, DocumentError> {
    let mut writer = Writer::new(Vec::new());

    if let Some(decl) = &document.declaration {
        writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        )))?;
    }
    for node in &document.nodes {
        write_node(&mut writer, node)?;
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<(), DocumentError> {
    let content = node.content.as_deref().unwrap_or_default();
    match node.kind {
        NodeKind::Element => {
            let mut start = BytesStart::new(node.name.as_str());
            for (name, value) in &node.attributes {
                start.push_attribute((name.as_str(), value.as_str()));
            }
            if node.children.is_empty() {
                writer.write_event(Event::Empty(start))?;
            } else {
                writer.write_event(Event::Start(start))?;
                for child in &node.children {
                    write_node(writer, child)?;
                }
                writer.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
            }
        }
        NodeKind::Text => writer.write_event(Event::Text(BytesText::from_escaped(content)))?,
        NodeKind::CData => writer.write_event(Event::CData(BytesCData::new(content)))?,
        NodeKind::Comment => {
            writer.write_event(Event::Comment(BytesText::from_escaped(content)))?
        }
        NodeKind::ProcessingInstruction => writer.write_event(Event::PI(BytesPI::new(content)))?,
        NodeKind::DocType => {
            writer.write_event(Event::DocType(BytesText::from_escaped(content)))?
        }
    }
    Ok(())
}
