//! Auxiliary package parts: properties, content types, settings, styles,
//! numbering, font table and relationship parts.
//!
//! Every function here is a pure function of its arguments.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::document::relationships::{rel_types, RelationshipList};
use crate::error::Result;
use crate::xml::Element;

/// Core (Dublin Core) document properties
#[derive(Clone, Debug)]
pub struct CoreProperties {
    pub title: String,
    pub subject: String,
    pub creator: String,
    pub keywords: Vec<String>,
    /// Defaults to `creator`
    pub last_modified_by: Option<String>,
    pub category: String,
    pub description: String,
    pub revision: u32,
    /// Written as both the created and modified time
    pub timestamp: DateTime<Utc>,
}

impl CoreProperties {
    /// Properties stamped with the current time
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        creator: impl Into<String>,
        keywords: &[&str],
    ) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            creator: creator.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            last_modified_by: None,
            category: String::new(),
            description: String::new(),
            revision: 1,
            timestamp: Utc::now(),
        }
    }

    pub fn last_modified_by(mut self, name: impl Into<String>) -> Self {
        self.last_modified_by = Some(name.into());
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Extended (application) properties
#[derive(Clone, Debug)]
pub struct AppProperties {
    pub template: String,
    pub application: String,
    pub app_version: String,
    pub pages: u32,
    pub doc_security: u32,
}

impl Default for AppProperties {
    fn default() -> Self {
        Self {
            template: "Normal.dotm".to_string(),
            application: concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))
                .to_string(),
            app_version: "12.0000".to_string(),
            pages: 1,
            doc_security: 0,
        }
    }
}

/// `docProps/core.xml`
pub fn coreproperties(props: &CoreProperties) -> Result<Element> {
    let modified_by = props.last_modified_by.as_deref().unwrap_or(&props.creator);
    let time = props.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut core = Element::new("cp:coreProperties")?
        .with_child(Element::new("dc:title")?.with_text(props.title.as_str()))
        .with_child(Element::new("dc:subject")?.with_text(props.subject.as_str()))
        .with_child(Element::new("dc:creator")?.with_text(props.creator.as_str()))
        .with_child(Element::new("cp:keywords")?.with_text(props.keywords.join(",")))
        .with_child(Element::new("cp:lastModifiedBy")?.with_text(modified_by))
        .with_child(Element::new("cp:revision")?.with_text(props.revision.to_string()))
        .with_child(Element::new("cp:category")?.with_text(props.category.as_str()))
        .with_child(Element::new("dc:description")?.with_text(props.description.as_str()));

    for tag in ["dcterms:created", "dcterms:modified"] {
        core.push(
            Element::new(tag)?
                .with_attr("xsi:type", "dcterms:W3CDTF")?
                .with_text(time.as_str()),
        );
    }
    Ok(core)
}

/// `docProps/app.xml`
pub fn appproperties(props: &AppProperties) -> Result<Element> {
    let values = [
        ("Template", props.template.clone()),
        ("TotalTime", "0".to_string()),
        ("Pages", props.pages.to_string()),
        ("Application", props.application.clone()),
        ("DocSecurity", props.doc_security.to_string()),
        ("ScaleCrop", "false".to_string()),
        ("LinksUpToDate", "false".to_string()),
        ("SharedDoc", "false".to_string()),
        ("HyperlinksChanged", "false".to_string()),
        ("AppVersion", props.app_version.clone()),
    ];

    let mut app = Element::new("ep:Properties")?;
    for (name, value) in values {
        app.push(Element::new(&format!("ep:{}", name))?.with_text(value));
    }
    Ok(app)
}

/// `[Content_Types].xml`
pub fn contenttypes() -> Result<Element> {
    let mut types = Element::new("ct:Types")?;
    for (part, content_type) in PART_CONTENT_TYPES {
        types.push(
            Element::new("ct:Override")?
                .with_attr("PartName", part)?
                .with_attr("ContentType", content_type)?,
        );
    }
    for (extension, content_type) in EXTENSION_CONTENT_TYPES {
        types.push(
            Element::new("ct:Default")?
                .with_attr("Extension", extension)?
                .with_attr("ContentType", content_type)?,
        );
    }
    Ok(types)
}

/// `word/webSettings.xml`
pub fn websettings() -> Result<Element> {
    Ok(Element::new("webSettings")?
        .with_child(Element::new("allowPNG")?)
        .with_child(Element::new("doNotSaveAsSingleFile")?))
}

/// `word/_rels/document.xml.rels`: one `Relationship` per entry, verbatim
pub fn wordrelationships(relationships: &RelationshipList) -> Result<Element> {
    let mut rels = Element::new("rel:Relationships")?;
    for rel in relationships.iter() {
        rels.push(relationship(&rel.id, &rel.rel_type, &rel.target)?);
    }
    Ok(rels)
}

/// `_rels/.rels`
pub fn package_relationships() -> Result<Element> {
    Ok(Element::new("rel:Relationships")?
        .with_child(relationship("rId1", rel_types::OFFICE_DOCUMENT, "word/document.xml")?)
        .with_child(relationship("rId2", rel_types::CORE_PROPERTIES, "docProps/core.xml")?)
        .with_child(relationship("rId3", rel_types::EXTENDED_PROPERTIES, "docProps/app.xml")?))
}

fn relationship(id: &str, rel_type: &str, target: &str) -> Result<Element> {
    Element::new("rel:Relationship")?
        .with_attr("Id", id)?
        .with_attr("Type", rel_type)?
        .with_attr("Target", target)
}

/// `word/settings.xml`
pub fn settings() -> Result<Element> {
    Ok(Element::new("settings")?
        .with_child(Element::new("zoom")?.with_attr("percent", "100")?)
        .with_child(Element::new("defaultTabStop")?.with_attr("val", "720")?)
        .with_child(Element::new("characterSpacingControl")?.with_attr("val", "doNotCompress")?)
        .with_child(Element::new("compat")?.with_child(
            Element::new("compatSetting")?
                .with_attr("name", "compatibilityMode")?
                .with_attr("uri", "http://schemas.microsoft.com/office/word")?
                .with_attr("val", "12")?,
        )))
}

/// `word/fontTable.xml`
pub fn fonttable() -> Result<Element> {
    let mut fonts = Element::new("fonts")?;
    for (name, family, pitch) in [
        ("Times New Roman", "roman", "variable"),
        ("Calibri", "swiss", "variable"),
        ("Cambria", "roman", "variable"),
        ("Symbol", "roman", "variable"),
        ("Courier New", "modern", "fixed"),
    ] {
        fonts.push(
            Element::new("font")?
                .with_attr("name", name)?
                .with_child(Element::new("family")?.with_attr("val", family)?)
                .with_child(Element::new("pitch")?.with_attr("val", pitch)?),
        );
    }
    Ok(fonts)
}

/// Numbering IDs referenced by the list styles
pub const LIST_NUMBER_ID: &str = "1";
pub const LIST_BULLET_ID: &str = "2";

/// `word/numbering.xml`: a decimal and a bullet list definition
pub fn numbering() -> Result<Element> {
    let mut numbering = Element::new("numbering")?;
    for (abstract_id, format, text, font) in [
        ("0", "decimal", "%1.", None),
        ("1", "bullet", "\u{F0B7}", Some("Symbol")),
    ] {
        let mut level = Element::new("lvl")?
            .with_attr("ilvl", "0")?
            .with_child(Element::new("start")?.with_attr("val", "1")?)
            .with_child(Element::new("numFmt")?.with_attr("val", format)?)
            .with_child(Element::new("lvlText")?.with_attr("val", text)?)
            .with_child(Element::new("lvlJc")?.with_attr("val", "left")?)
            .with_child(
                Element::new("pPr")?.with_child(
                    Element::new("ind")?
                        .with_attr("left", "720")?
                        .with_attr("hanging", "360")?,
                ),
            );
        if let Some(font) = font {
            level.push(
                Element::new("rPr")?.with_child(
                    Element::new("rFonts")?
                        .with_attr("ascii", font)?
                        .with_attr("hAnsi", font)?
                        .with_attr("hint", "default")?,
                ),
            );
        }
        numbering.push(
            Element::new("abstractNum")?
                .with_attr("abstractNumId", abstract_id)?
                .with_child(Element::new("multiLevelType")?.with_attr("val", "singleLevel")?)
                .with_child(level),
        );
    }
    for (num_id, abstract_id) in [(LIST_NUMBER_ID, "0"), (LIST_BULLET_ID, "1")] {
        numbering.push(
            Element::new("num")?
                .with_attr("numId", num_id)?
                .with_child(Element::new("abstractNumId")?.with_attr("val", abstract_id)?),
        );
    }
    Ok(numbering)
}

/// `word/styles.xml`: the styles the content builders refer to
pub fn styles() -> Result<Element> {
    let mut styles = Element::new("styles")?.with_child(
        Element::new("docDefaults")?
            .with_child(
                Element::new("rPrDefault")?.with_child(
                    Element::new("rPr")?
                        .with_child(
                            Element::new("rFonts")?
                                .with_attr("ascii", "Calibri")?
                                .with_attr("hAnsi", "Calibri")?,
                        )
                        .with_child(Element::new("sz")?.with_attr("val", "22")?),
                ),
            )
            .with_child(
                Element::new("pPrDefault")?.with_child(
                    Element::new("pPr")?.with_child(
                        Element::new("spacing")?
                            .with_attr("after", "160")?
                            .with_attr("line", "259")?
                            .with_attr("lineRule", "auto")?,
                    ),
                ),
            ),
    );

    styles.push(
        paragraph_style("Normal", "Normal", None)?
            .with_attr("default", "1")?
            .with_child(Element::new("qFormat")?),
    );
    styles.push(paragraph_style("BodyText", "Body Text", Some("Normal"))?);
    styles.push(
        paragraph_style("Title", "Title", Some("Normal"))?
            .with_child(run_properties(true, 56)?),
    );

    for level in 1..=9u8 {
        // 16pt for level 1 down to 11pt from level 6 on
        let size = 32u32.saturating_sub(2 * u32::from(level - 1)).max(22);
        let id = format!("Heading{}", level);
        let name = format!("heading {}", level);
        styles.push(
            paragraph_style(&id, &name, Some("Normal"))?
                .with_child(Element::new("qFormat")?)
                .with_child(
                    Element::new("pPr")?
                        .with_child(Element::new("keepNext")?)
                        .with_child(
                            Element::new("outlineLvl")?.with_attr("val", (level - 1).to_string())?,
                        ),
                )
                .with_child(run_properties(true, size)?),
        );
    }

    for (id, name, num_id) in [
        ("ListNumber", "List Number", LIST_NUMBER_ID),
        ("ListBullet", "List Bullet", LIST_BULLET_ID),
    ] {
        styles.push(
            paragraph_style(id, name, Some("Normal"))?.with_child(
                Element::new("pPr")?.with_child(
                    Element::new("numPr")?
                        .with_child(Element::new("ilvl")?.with_attr("val", "0")?)
                        .with_child(Element::new("numId")?.with_attr("val", num_id)?),
                ),
            ),
        );
    }

    let border = |edge: &str| -> Result<Element> {
        Element::new(edge)?
            .with_attr("val", "single")?
            .with_attr("sz", "4")?
            .with_attr("space", "0")?
            .with_attr("color", "auto")
    };
    let mut borders = Element::new("tblBorders")?;
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        borders.push(border(edge)?);
    }
    styles.push(
        Element::new("style")?
            .with_attr("type", "table")?
            .with_attr("styleId", "TableGrid")?
            .with_child(Element::new("name")?.with_attr("val", "Table Grid")?)
            .with_child(Element::new("tblPr")?.with_child(borders)),
    );

    Ok(styles)
}

fn paragraph_style(id: &str, name: &str, based_on: Option<&str>) -> Result<Element> {
    let mut style = Element::new("style")?
        .with_attr("type", "paragraph")?
        .with_attr("styleId", id)?
        .with_child(Element::new("name")?.with_attr("val", name)?);
    if let Some(base) = based_on {
        style.push(Element::new("basedOn")?.with_attr("val", base)?);
    }
    Ok(style)
}

fn run_properties(bold: bool, half_points: u32) -> Result<Element> {
    let mut props = Element::new("rPr")?;
    if bold {
        props.push(Element::new("b")?);
    }
    props.push(Element::new("sz")?.with_attr("val", half_points.to_string())?);
    Ok(props)
}

/// Content type overrides for the parts the serializer writes
pub const PART_CONTENT_TYPES: [(&str, &str); 8] = [
    (
        "/word/document.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    ),
    (
        "/word/styles.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
    ),
    (
        "/word/numbering.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
    ),
    (
        "/word/settings.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
    ),
    (
        "/word/webSettings.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.webSettings+xml",
    ),
    (
        "/word/fontTable.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.fontTable+xml",
    ),
    ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml"),
    ("/docProps/app.xml", "application/vnd.openxmlformats-officedocument.extended-properties+xml"),
];

/// Content types by file extension
pub const EXTENSION_CONTENT_TYPES: [(&str, &str); 7] = [
    ("gif", "image/gif"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("png", "image/png"),
    ("bmp", "image/bmp"),
    ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
    ("xml", "application/xml"),
];
