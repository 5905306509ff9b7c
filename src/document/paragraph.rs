//! Paragraph and run nodes (w:p, w:r)

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::xml::{parse_bool, Element, W};

/// Style applied by [`paragraph`] when none is given
pub const DEFAULT_PARAGRAPH_STYLE: &str = "BodyText";

/// Character formatting of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunFormat {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl RunFormat {
    pub const PLAIN: RunFormat = RunFormat {
        bold: false,
        italic: false,
        underline: false,
    };

    /// Parse a flag string such as `"bi"`: `b` bold, `i` italic, `u` underline.
    /// Other characters are ignored.
    pub fn from_flags(flags: &str) -> Self {
        Self {
            bold: flags.contains('b'),
            italic: flags.contains('i'),
            underline: flags.contains('u'),
        }
    }

    /// Read the formatting of an existing run
    pub fn of(run: &Element) -> Self {
        let Some(props) = run.child(W, "rPr") else {
            return Self::PLAIN;
        };
        Self {
            bold: props.child(W, "b").is_some_and(parse_bool),
            italic: props.child(W, "i").is_some_and(parse_bool),
            underline: props
                .child(W, "u")
                .and_then(|u| u.attr("val"))
                .is_some_and(|v| v != "none"),
        }
    }

    fn to_element(self) -> Result<Element> {
        let mut props = Element::new("rPr")?;
        if self.bold {
            props.push(Element::new("b")?);
        }
        if self.underline {
            props.push(Element::new("u")?.with_attr("val", "single")?);
        }
        if self.italic {
            props.push(Element::new("i")?);
        }
        Ok(props)
    }
}

/// Paragraph justification (w:jc)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
    Both,
}

impl Justification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
            Justification::Both => "both",
        }
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Justification {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "left" => Ok(Justification::Left),
            "center" => Ok(Justification::Center),
            "right" => Ok(Justification::Right),
            "both" => Ok(Justification::Both),
            other => Err(format!("unknown justification '{}'", other)),
        }
    }
}

/// Paragraph-level settings for [`paragraph_with`]
#[derive(Clone, Debug)]
pub struct ParagraphOptions {
    /// Paragraph style ID
    pub style: String,
    pub justification: Justification,
    /// Mark every run with `w:lastRenderedPageBreak`
    pub break_before: bool,
}

impl Default for ParagraphOptions {
    fn default() -> Self {
        Self {
            style: DEFAULT_PARAGRAPH_STYLE.to_string(),
            justification: Justification::Left,
            break_before: false,
        }
    }
}

impl ParagraphOptions {
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    pub fn break_before(mut self, break_before: bool) -> Self {
        self.break_before = break_before;
        self
    }
}

/// Language of the built-in heading style IDs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeadingLanguage {
    #[default]
    English,
    Italian,
}

impl HeadingLanguage {
    fn style_prefix(&self) -> &'static str {
        match self {
            HeadingLanguage::English => "Heading",
            HeadingLanguage::Italian => "Titolo",
        }
    }
}

/// Heading paragraph styled `Heading{level}`
pub fn heading(text: &str, level: u8) -> Result<Element> {
    heading_localized(text, level, HeadingLanguage::English)
}

/// Heading paragraph using the style IDs of a localized template
pub fn heading_localized(text: &str, level: u8, lang: HeadingLanguage) -> Result<Element> {
    let style = format!("{}{}", lang.style_prefix(), level);
    Ok(Element::new("p")?
        .with_child(paragraph_properties(&style, None)?)
        .with_child(run(text, RunFormat::PLAIN)?))
}

/// Single-run paragraph; `style` defaults to [`DEFAULT_PARAGRAPH_STYLE`]
pub fn paragraph(text: &str, style: Option<&str>) -> Result<Element> {
    let options = match style {
        Some(style) => ParagraphOptions::default().style(style),
        None => ParagraphOptions::default(),
    };
    paragraph_with(&[(text, RunFormat::PLAIN)], &options)
}

/// Paragraph built from formatted runs
pub fn paragraph_with(runs: &[(&str, RunFormat)], options: &ParagraphOptions) -> Result<Element> {
    let mut para = Element::new("p")?.with_child(paragraph_properties(
        &options.style,
        Some(options.justification),
    )?);

    for (text, format) in runs {
        let mut r = Element::new("r")?.with_child(format.to_element()?);
        if options.break_before {
            // marks the page break for narrators and other assistive tools
            r.push(Element::new("lastRenderedPageBreak")?);
        }
        r.push(text_element(text)?);
        para.push(r);
    }

    Ok(para)
}

/// Run holding one `w:t`
pub fn run(text: &str, format: RunFormat) -> Result<Element> {
    let mut r = Element::new("r")?;
    if format != RunFormat::PLAIN {
        r.push(format.to_element()?);
    }
    Ok(r.with_child(text_element(text)?))
}

/// `w:t` element, preserving leading/trailing whitespace
pub fn text_element(text: &str) -> Result<Element> {
    let mut t = Element::new("t")?.with_text(text);
    if needs_preserve(text) {
        t.set_attr("xml:space", "preserve")?;
    }
    Ok(t)
}

pub(crate) fn needs_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}

fn paragraph_properties(style: &str, justification: Option<Justification>) -> Result<Element> {
    let mut props =
        Element::new("pPr")?.with_child(Element::new("pStyle")?.with_attr("val", style)?);
    if let Some(jc) = justification {
        props.push(Element::new("jc")?.with_attr("val", jc.as_str())?);
    }
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::XML;

    fn style_of(para: &Element) -> Option<&str> {
        para.child(W, "pPr")?.child(W, "pStyle")?.attr("val")
    }

    #[test]
    fn test_paragraph_creates_p() {
        let para = paragraph("paratext", Some("BodyText")).unwrap();
        assert_eq!(
            para.tag(),
            "{http://schemas.openxmlformats.org/wordprocessingml/2006/main}p"
        );
        assert_eq!(style_of(&para), Some("BodyText"));
    }

    #[test]
    fn test_paragraph_default_style() {
        let para = paragraph("text", None).unwrap();
        assert_eq!(style_of(&para), Some(DEFAULT_PARAGRAPH_STYLE));
        let runs: Vec<_> = para.children_named(W, "r").collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].child(W, "t").unwrap().text.as_deref(), Some("text"));
    }

    #[test]
    fn test_heading_levels() {
        let h = heading("Heading 2", 2).unwrap();
        assert_eq!(style_of(&h), Some("Heading2"));

        let it = heading_localized("Capitolo", 1, HeadingLanguage::Italian).unwrap();
        assert_eq!(style_of(&it), Some("Titolo1"));
    }

    #[test]
    fn test_formatted_runs() {
        let options = ParagraphOptions::default()
            .justification(Justification::Center)
            .break_before(true);
        let para = paragraph_with(
            &[("bold ", RunFormat::from_flags("b")), ("rest", RunFormat::from_flags("iu"))],
            &options,
        )
        .unwrap();

        let jc = para.child(W, "pPr").unwrap().child(W, "jc").unwrap();
        assert_eq!(jc.attr("val"), Some("center"));

        let runs: Vec<_> = para.children_named(W, "r").collect();
        assert_eq!(RunFormat::of(runs[0]), RunFormat::from_flags("b"));
        assert_eq!(RunFormat::of(runs[1]), RunFormat::from_flags("ui"));
        assert!(runs[0].child(W, "lastRenderedPageBreak").is_some());

        let t = runs[0].child(W, "t").unwrap();
        assert_eq!(t.attributes[0].0.namespace_uri(), Some(XML));
        assert!(runs[1].child(W, "t").unwrap().attributes.is_empty());
    }

    #[test]
    fn test_flags_ignore_unknown() {
        assert_eq!(RunFormat::from_flags(""), RunFormat::PLAIN);
        assert_eq!(
            RunFormat::from_flags("xbz"),
            RunFormat {
                bold: true,
                ..RunFormat::PLAIN
            }
        );
    }

    #[test]
    fn test_justification_parse() {
        assert_eq!("both".parse::<Justification>(), Ok(Justification::Both));
        assert!("middle".parse::<Justification>().is_err());
    }
}
