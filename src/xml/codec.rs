//! Serialization and namespace-aware parsing of [`Element`] trees

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Writer};

use crate::error::{Error, Result};
use crate::xml::element::{Element, QName};
use crate::xml::namespace::{Namespace, NAMESPACES};

impl Element {
    /// Serialize as a standalone XML part (declaration included)
    pub fn to_xml(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_part(&mut buf)?;
        String::from_utf8(buf).map_err(|e| Error::InvalidDocument(e.to_string()))
    }

    /// Write as a standalone XML part: declaration, then this element as the
    /// root carrying every namespace declaration the tree needs.
    pub fn write_part<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = Writer::new(out);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

        let default_ns = self.name.ns.filter(Namespace::is_package_default);
        let declarations = self.namespace_declarations(default_ns);
        write_element(self, &mut writer, default_ns, &declarations)
    }

    fn namespace_declarations(&self, default_ns: Option<Namespace>) -> Vec<(String, &'static str)> {
        let mut in_tags = Vec::new();
        let mut in_attrs = Vec::new();
        for node in self.descendants() {
            in_tags.extend(node.name.ns);
            in_attrs.extend(node.attributes.iter().filter_map(|(k, _)| k.ns));
        }

        let mut declarations = Vec::new();
        for ns in NAMESPACES.iter().filter(|ns| ns.needs_declaration()) {
            let tagged = in_tags.contains(ns);
            let attributed = in_attrs.contains(ns);
            if Some(*ns) == default_ns {
                declarations.push(("xmlns".to_string(), ns.uri));
                if attributed {
                    declarations.push((format!("xmlns:{}", ns.prefix), ns.uri));
                }
            } else if tagged || attributed {
                declarations.push((format!("xmlns:{}", ns.prefix), ns.uri));
            }
        }
        declarations
    }

    /// Parse an XML document into its root element.
    ///
    /// Elements and attributes bound to namespaces outside the prefix table
    /// are dropped together with their subtrees.
    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = NsReader::from_str(xml);
        // None marks a skipped (foreign) subtree
        let mut stack: Vec<Option<Element>> = Vec::new();
        let mut root = None;

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            let ns = known_namespace(&resolved)?;

            match event {
                Event::Start(e) => {
                    let element = open_element(&reader, ns, &e)?;
                    stack.push(element);
                }
                Event::Empty(e) => {
                    let element = open_element(&reader, ns, &e)?;
                    close_element(&mut stack, &mut root, element);
                }
                Event::Text(t) => {
                    if let Some(Some(top)) = stack.last_mut() {
                        let text = t.unescape()?;
                        top.text.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Event::CData(c) => {
                    if let Some(Some(top)) = stack.last_mut() {
                        let text = std::str::from_utf8(&c)?;
                        top.text.get_or_insert_with(String::new).push_str(text);
                    }
                }
                Event::End(_) => {
                    let element = stack.pop().flatten();
                    close_element(&mut stack, &mut root, element);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(Error::InvalidDocument("Unexpected EOF".into()));
        }
        root.ok_or_else(|| Error::InvalidDocument("No root element".into()))
    }
}

fn write_element<W: Write>(
    element: &Element,
    writer: &mut Writer<W>,
    default_ns: Option<Namespace>,
    declarations: &[(String, &'static str)],
) -> Result<()> {
    let name = element_name(&element.name, default_ns);
    let mut start = BytesStart::new(name.as_str());
    for (key, value) in declarations {
        start.push_attribute((key.as_str(), *value));
    }
    for (key, value) in &element.attributes {
        start.push_attribute((key.prefixed().as_ref(), value.as_str()));
    }

    if element.text.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &element.children {
        write_element(child, writer, default_ns, &[])?;
    }
    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    Ok(())
}

fn element_name(name: &QName, default_ns: Option<Namespace>) -> String {
    if name.ns.is_some() && name.ns == default_ns {
        name.local.clone()
    } else {
        name.prefixed().into_owned()
    }
}

/// `Some(ns)` for names we can represent (`Some(None)` when unqualified),
/// `None` for foreign namespaces.
fn known_namespace(resolved: &ResolveResult<'_>) -> Result<Option<Option<Namespace>>> {
    match resolved {
        ResolveResult::Bound(ns) => {
            let uri = std::str::from_utf8(ns.as_ref())?;
            Ok(Namespace::by_uri(uri).map(Some))
        }
        ResolveResult::Unbound => Ok(Some(None)),
        ResolveResult::Unknown(_) => Ok(None),
    }
}

fn open_element(
    reader: &NsReader<&[u8]>,
    ns: Option<Option<Namespace>>,
    start: &BytesStart<'_>,
) -> Result<Option<Element>> {
    let local = std::str::from_utf8(start.local_name().as_ref())?.to_string();
    let Some(ns) = ns else {
        log::trace!("skipping element '{}' in foreign namespace", local);
        return Ok(None);
    };

    let mut element = Element::from_name(QName::new(ns, local));
    for attr in start.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }

        let (resolved, attr_local) = reader.resolve_attribute(attr.key);
        let Some(attr_ns) = known_namespace(&resolved)? else {
            continue;
        };
        let attr_local = std::str::from_utf8(attr_local.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        element
            .attributes
            .push((QName::new(attr_ns, attr_local), value));
    }
    Ok(Some(element))
}

fn close_element(
    stack: &mut [Option<Element>],
    root: &mut Option<Element>,
    element: Option<Element>,
) {
    let Some(mut element) = element else {
        return;
    };

    // indentation between child elements is not content
    if !element.children.is_empty()
        && element
            .text
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
    {
        element.text = None;
    }

    match stack.last_mut() {
        Some(Some(parent)) => parent.children.push(element),
        Some(None) => {}
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::namespace::{W, XML};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_declares_namespaces() {
        let para = Element::new("p").unwrap().with_child(
            Element::new("r").unwrap().with_child(
                Element::new("t")
                    .unwrap()
                    .with_attr("xml:space", "preserve")
                    .unwrap()
                    .with_text("a < b"),
            ),
        );

        let xml = para.to_xml().unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:p xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:r><w:t xml:space=\"preserve\">a &lt; b</w:t></w:r></w:p>"
        );
    }

    #[test]
    fn test_package_part_uses_default_namespace() {
        let rels = Element::new("rel:Relationships").unwrap().with_child(
            Element::new("rel:Relationship")
                .unwrap()
                .with_attr("Id", "rId1")
                .unwrap(),
        );

        let xml = rels.to_xml().unwrap();
        assert!(xml.contains(
            "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">"
        ));
        assert!(xml.contains("<Relationship Id=\"rId1\"/>"));
    }

    #[test]
    fn test_parse_resolves_any_prefix() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<x:document xmlns:x="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <x:body>
    <x:p><x:r><x:t xml:space="preserve"> spaced </x:t></x:r></x:p>
  </x:body>
</x:document>"#;

        let root = Element::parse(xml).unwrap();
        assert!(root.is(W, "document"));
        assert_eq!(root.text, None);

        let t = root.node_at(&[0, 0, 0, 0]).unwrap();
        assert!(t.is(W, "t"));
        assert_eq!(t.text.as_deref(), Some(" spaced "));
        assert_eq!(t.attributes[0].0.namespace_uri(), Some(XML));
        assert_eq!(t.attr("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_parse_skips_foreign_namespaces() {
        let xml = r#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"
                          xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml"
                          w14:paraId="1234">
  <w14:extra><w:r><w:t>hidden</w:t></w:r></w14:extra>
  <w:r><w:t>kept</w:t></w:r>
</w:p>"#;

        let p = Element::parse(xml).unwrap();
        assert!(p.attributes.is_empty());
        assert_eq!(p.children.len(), 1);
        assert_eq!(p.node_at(&[0, 0]).unwrap().text.as_deref(), Some("kept"));
    }

    #[test]
    fn test_roundtrip() {
        let doc = Element::new("document").unwrap().with_child(
            Element::new("body").unwrap().with_child(
                Element::new("p").unwrap().with_child(
                    Element::new("pPr").unwrap().with_child(
                        Element::new("pStyle")
                            .unwrap()
                            .with_attr("val", "Heading1")
                            .unwrap(),
                    ),
                ),
            ),
        );

        let parsed = Element::parse(&doc.to_xml().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_parse_rejects_truncated() {
        let xml =
            r#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:r>"#;
        assert!(Element::parse(xml).is_err());
    }
}
