//! Namespaced XML element tree
//!
//! [`Element`] is the single node type of a document tree. The kind of a node
//! (paragraph, run, table, ...) is carried by its qualified name only.

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};
use crate::xml::namespace::{Namespace, DEFAULT_PREFIX, W};

/// Namespace-qualified name of an element or attribute
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QName {
    /// Bound namespace, `None` for unqualified names
    pub ns: Option<Namespace>,
    /// Local part of the name
    pub local: String,
}

impl QName {
    /// Qualified name in an explicit namespace
    pub fn new(ns: Option<Namespace>, local: impl Into<String>) -> Self {
        Self {
            ns,
            local: local.into(),
        }
    }

    /// Resolve `prefix:local` (or a bare `local`, which takes `default`)
    /// against the namespace table.
    pub fn resolve(name: &str, default: Option<Namespace>) -> Result<Self> {
        match name.split_once(':') {
            Some((prefix, local)) => {
                let ns = Namespace::by_prefix(prefix)
                    .ok_or_else(|| Error::UnknownNamespacePrefix(name.to_string()))?;
                Ok(Self::new(Some(ns), local))
            }
            None => Ok(Self::new(default, name)),
        }
    }

    /// Whether this name is `local` in namespace `uri`
    pub fn is(&self, uri: &str, local: &str) -> bool {
        self.local == local && self.ns.map(|ns| ns.uri) == Some(uri)
    }

    /// Namespace URI, if any
    pub fn namespace_uri(&self) -> Option<&'static str> {
        self.ns.map(|ns| ns.uri)
    }

    /// Name as written in markup (`w:p`, `Id`)
    pub fn prefixed(&self) -> Cow<'_, str> {
        match self.ns {
            Some(ns) => Cow::Owned(format!("{}:{}", ns.prefix, self.local)),
            None => Cow::Borrowed(&self.local),
        }
    }
}

/// Clark notation, `{uri}local`
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ns {
            Some(ns) => write!(f, "{{{}}}{}", ns.uri, self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// XML element with attributes, direct text and children
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: QName,
    /// Attributes in insertion order
    pub attributes: Vec<(QName, String)>,
    /// Direct text content
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element from a possibly prefixed tag; bare tags are `w:` tags.
    pub fn new(tag: &str) -> Result<Self> {
        let default = Namespace::by_prefix(DEFAULT_PREFIX);
        Ok(Self::from_name(QName::resolve(tag, default)?))
    }

    /// Create an element from an already resolved name
    pub fn from_name(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Namespace a bare attribute name resolves to on this element.
    ///
    /// Only WordprocessingML elements qualify their bare attributes.
    fn attr_default_ns(&self) -> Option<Namespace> {
        self.name.ns.filter(|ns| ns.uri == W)
    }

    /// Add an attribute
    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Result<Self> {
        self.set_attr(name, value)?;
        Ok(self)
    }

    /// Set an attribute, replacing any previous value
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let qname = QName::resolve(name, self.attr_default_ns())?;
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == qname) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((qname, value)),
        }
        Ok(())
    }

    /// Get an attribute value. Names resolve like [`Element::set_attr`].
    pub fn attr(&self, name: &str) -> Option<&str> {
        let qname = QName::resolve(name, self.attr_default_ns()).ok()?;
        self.attributes
            .iter()
            .find(|(k, _)| *k == qname)
            .map(|(_, v)| v.as_str())
    }

    /// Set the direct text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add a child element
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Add several child elements
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    /// Append a child element
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Whether this element is `local` in namespace `uri`
    pub fn is(&self, uri: &str, local: &str) -> bool {
        self.name.is(uri, local)
    }

    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// Namespace URI of the tag
    pub fn namespace(&self) -> Option<&'static str> {
        self.name.namespace_uri()
    }

    /// Clark-notation tag, `{uri}local`
    pub fn tag(&self) -> String {
        self.name.to_string()
    }

    /// First child matching the name
    pub fn child(&self, uri: &str, local: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(uri, local))
    }

    /// First child matching the name, mutably
    pub fn child_mut(&mut self, uri: &str, local: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.is(uri, local))
    }

    /// All children matching the name
    pub fn children_named<'a>(
        &'a self,
        uri: &'a str,
        local: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.is(uri, local))
    }

    /// Depth-first, document-order traversal starting with `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Node at a child-index path (empty path is `self`)
    pub fn node_at(&self, path: &[usize]) -> Option<&Element> {
        path.iter().try_fold(self, |node, &i| node.children.get(i))
    }

    /// Node at a child-index path, mutably
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        path.iter()
            .try_fold(self, |node, &i| node.children.get_mut(i))
    }

    /// Detach the node at a non-empty child-index path
    pub fn remove_at(&mut self, path: &[usize]) -> Option<Element> {
        let (&last, parent) = path.split_last()?;
        let parent = self.node_at_mut(parent)?;
        (last < parent.children.len()).then(|| parent.children.remove(last))
    }
}

/// Iterator returned by [`Element::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Build one element: tag, attributes, optional text and children.
///
/// Tag and attribute prefixes are resolved against the namespace table; a
/// missing prefix means `w`.
pub fn make_element(
    tag: &str,
    attributes: &[(&str, &str)],
    text: Option<&str>,
    children: Vec<Element>,
) -> Result<Element> {
    let mut element = Element::new(tag)?;
    for (name, value) in attributes {
        element.set_attr(name, *value)?;
    }
    element.text = text.map(str::to_string);
    element.children = children;
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::namespace::{A, R, REL};

    #[test]
    fn test_make_element_defaults_to_w() {
        let elem = make_element(
            "testname",
            &[("testattribute", "testvalue")],
            Some("testtagtext"),
            Vec::new(),
        )
        .unwrap();

        assert_eq!(
            elem.tag(),
            "{http://schemas.openxmlformats.org/wordprocessingml/2006/main}testname"
        );
        assert_eq!(
            elem.attributes[0].0.to_string(),
            "{http://schemas.openxmlformats.org/wordprocessingml/2006/main}testattribute"
        );
        assert_eq!(elem.attr("testattribute"), Some("testvalue"));
        assert_eq!(elem.text.as_deref(), Some("testtagtext"));
    }

    #[test]
    fn test_prefixed_names() {
        let blip = Element::new("a:blip").unwrap().with_attr("r:embed", "rId7").unwrap();
        assert!(blip.is(A, "blip"));
        assert_eq!(blip.attributes[0].0.namespace_uri(), Some(R));
        assert_eq!(blip.attr("r:embed"), Some("rId7"));
        // bare attributes on non-w elements stay unqualified
        let rel = Element::new("rel:Relationship").unwrap().with_attr("Id", "rId1").unwrap();
        assert!(rel.is(REL, "Relationship"));
        assert_eq!(rel.attributes[0].0.ns, None);
        assert_eq!(rel.attributes[0].0.prefixed(), "Id");
    }

    #[test]
    fn test_unknown_prefix() {
        assert!(matches!(
            Element::new("zz:thing"),
            Err(Error::UnknownNamespacePrefix(_))
        ));
        let elem = Element::new("p").unwrap();
        assert!(matches!(
            elem.with_attr("zz:attr", "1"),
            Err(Error::UnknownNamespacePrefix(_))
        ));
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut elem = Element::new("pStyle").unwrap();
        elem.set_attr("val", "A").unwrap();
        elem.set_attr("val", "B").unwrap();
        assert_eq!(elem.attributes.len(), 1);
        assert_eq!(elem.attr("val"), Some("B"));
    }

    #[test]
    fn test_paths() {
        let mut root = Element::new("body")
            .unwrap()
            .with_child(Element::new("p").unwrap().with_child(Element::new("r").unwrap()))
            .with_child(Element::new("tbl").unwrap());

        assert!(root.node_at(&[0, 0]).unwrap().is(W, "r"));
        assert!(root.node_at(&[1]).unwrap().is(W, "tbl"));
        assert!(root.node_at(&[2]).is_none());

        let removed = root.remove_at(&[0, 0]).unwrap();
        assert!(removed.is(W, "r"));
        assert!(root.children[0].children.is_empty());
        assert!(root.remove_at(&[]).is_none());
    }

    #[test]
    fn test_descendants_order() {
        let root = Element::new("body")
            .unwrap()
            .with_child(Element::new("p").unwrap().with_child(Element::new("r").unwrap()))
            .with_child(Element::new("tbl").unwrap());

        let names: Vec<_> = root.descendants().map(|e| e.local_name().to_string()).collect();
        assert_eq!(names, ["body", "p", "r", "tbl"]);
    }
}
