//! Page and section breaks

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::xml::Element;

/// US Letter, in twips
const PAGE_SHORT_EDGE: &str = "12240";
const PAGE_LONG_EDGE: &str = "15840";

/// Kind of break produced by [`pagebreak`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakKind {
    Page,
    Section,
}

impl FromStr for BreakKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "page" => Ok(BreakKind::Page),
            "section" => Ok(BreakKind::Section),
            other => Err(Error::UnsupportedBreakType(other.to_string())),
        }
    }
}

/// Page orientation of a section
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "portrait" => Ok(Orientation::Portrait),
            "landscape" => Ok(Orientation::Landscape),
            other => Err(Error::UnsupportedOrientation(other.to_string())),
        }
    }
}

/// Break paragraph from string arguments: `kind` is `"page"` or `"section"`,
/// `orient` is `"portrait"` or `"landscape"`.
///
/// Both arguments are validated before anything is built.
pub fn pagebreak(kind: &str, orient: &str) -> Result<Element> {
    let kind: BreakKind = kind.parse()?;
    let orient: Orientation = orient.parse()?;
    match kind {
        BreakKind::Page => page_break(),
        BreakKind::Section => section_break(orient),
    }
}

/// Paragraph holding a `w:br type="page"` run
pub fn page_break() -> Result<Element> {
    Ok(Element::new("p")?.with_child(
        Element::new("r")?.with_child(Element::new("br")?.with_attr("type", "page")?),
    ))
}

/// Paragraph closing a section with the given page orientation
pub fn section_break(orient: Orientation) -> Result<Element> {
    let page_size = match orient {
        Orientation::Portrait => Element::new("pgSz")?
            .with_attr("w", PAGE_SHORT_EDGE)?
            .with_attr("h", PAGE_LONG_EDGE)?,
        Orientation::Landscape => Element::new("pgSz")?
            .with_attr("w", PAGE_LONG_EDGE)?
            .with_attr("h", PAGE_SHORT_EDGE)?
            .with_attr("orient", "landscape")?,
    };

    Ok(Element::new("p")?.with_child(
        Element::new("pPr")?.with_child(Element::new("sectPr")?.with_child(page_size)),
    ))
}
