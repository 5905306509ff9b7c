//! Plain-text extraction

use crate::text::index::visit_runs;
use crate::xml::{Element, W};

/// Text of every non-empty paragraph under `root`, in document order.
///
/// Runs contribute their `w:t` text, and each `w:tab` becomes `'\t'`.
pub fn getdocumenttext(root: &Element) -> Vec<String> {
    root.descendants()
        .filter(|node| node.is(W, "p"))
        .map(paragraph_text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Visible text of one paragraph
pub fn paragraph_text(paragraph: &Element) -> String {
    let mut text = String::new();
    visit_runs(paragraph, &mut Vec::new(), &mut |_, run| {
        for child in &run.children {
            if child.is(W, "t") {
                text.push_str(child.text.as_deref().unwrap_or_default());
            } else if child.is(W, "tab") {
                text.push('\t');
            }
        }
    });
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{
        body_mut, heading, newdocument, pagebreak, paragraph, run, table, RunFormat,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_text() {
        let mut doc = newdocument().unwrap();
        let content = body_mut(&mut doc).unwrap();
        content.push(heading("Title", 1).unwrap());
        content.push(paragraph("", None).unwrap());
        content.push(pagebreak("page", "portrait").unwrap());
        content.push(table(&[vec!["A1", "A2"]]).unwrap());
        content.push(paragraph("Last", None).unwrap());

        assert_eq!(getdocumenttext(&doc), ["Title", "A1", "A2", "Last"]);
    }

    #[test]
    fn test_tabs() {
        let mut para = paragraph("a", None).unwrap();
        para.push(Element::new("r").unwrap().with_child(Element::new("tab").unwrap()));
        para.push(run("b", RunFormat::PLAIN).unwrap());
        assert_eq!(paragraph_text(&para), "a\tb");
    }

    #[test]
    fn test_parsed_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Hello, </w:t></w:r><w:r><w:t>World!</w:t></w:r></w:p>
    <w:p/>
  </w:body>
</w:document>"#;
        let doc = Element::parse(xml).unwrap();
        assert_eq!(getdocumenttext(&doc), ["Hello, World!"]);
    }
}
