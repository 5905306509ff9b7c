//! Document assembly - builders for the nodes and parts of a DOCX document

mod pagebreak;
mod paragraph;
mod parts;
mod picture;
mod relationships;
mod table;

pub use pagebreak::{page_break, pagebreak, section_break, BreakKind, Orientation};
pub use paragraph::{
    heading, heading_localized, paragraph, paragraph_with, run, text_element, HeadingLanguage,
    Justification, ParagraphOptions, RunFormat, DEFAULT_PARAGRAPH_STYLE,
};
pub(crate) use paragraph::needs_preserve;
pub use parts::{
    appproperties, contenttypes, coreproperties, fonttable, numbering, package_relationships,
    settings, styles, websettings, wordrelationships, AppProperties, CoreProperties,
};
pub use picture::{picture, picture_with, PictureOptions, EMU_PER_PIXEL};
pub use relationships::{
    rel_types, EmbeddedImage, ImageFileDict, MediaFile, Relationship, RelationshipList,
};
pub use table::{table, table_with, BorderSpec, TableBorders, TableOptions, DEFAULT_COLUMN_WIDTH};

use crate::error::{Error, Result};
use crate::xml::{Element, W};

/// Empty document: `w:document` holding an empty `w:body`
pub fn newdocument() -> Result<Element> {
    Ok(Element::new("document")?.with_child(Element::new("body")?))
}

/// The `w:body` of a document root
pub fn body(document: &Element) -> Result<&Element> {
    document
        .child(W, "body")
        .ok_or_else(|| Error::InvalidDocument("Missing w:body element".into()))
}

/// Mutable `w:body` of a document root, where content nodes are appended
pub fn body_mut(document: &mut Element) -> Result<&mut Element> {
    document
        .child_mut(W, "body")
        .ok_or_else(|| Error::InvalidDocument("Missing w:body element".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_shape() {
        let doc = newdocument().unwrap();
        assert!(doc.is(W, "document"));
        assert_eq!(doc.namespace(), Some(W));
        assert_eq!(doc.children.len(), 1);
        assert!(body(&doc).unwrap().children.is_empty());
    }

    #[test]
    fn test_append_to_body() {
        let mut doc = newdocument().unwrap();
        let content = body_mut(&mut doc).unwrap();
        content.push(heading("Welcome", 1).unwrap());
        content.push(paragraph("text", None).unwrap());
        content.push(pagebreak("page", "portrait").unwrap());

        let kinds: Vec<_> = body(&doc)
            .unwrap()
            .children
            .iter()
            .map(|c| c.local_name().to_string())
            .collect();
        assert_eq!(kinds, ["p", "p", "p"]);
    }

    #[test]
    fn test_missing_body() {
        let mut root = Element::new("document").unwrap();
        assert!(matches!(body(&root), Err(Error::InvalidDocument(_))));
        assert!(body_mut(&mut root).is_err());
    }

    #[test]
    fn test_document_serializes() {
        let mut doc = newdocument().unwrap();
        body_mut(&mut doc).unwrap().push(paragraph("x", None).unwrap());
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<w:document xmlns:w="));
        assert!(xml.contains("<w:body>"));
    }
}
