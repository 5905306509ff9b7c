//! XML namespaces used in OOXML
//!
//! Every tag and attribute built by this crate is resolved through [`NAMESPACES`].

/// WordprocessingML main namespace
pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office document relationships namespace (`r:embed`, `r:id`)
pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Drawing namespace
pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// DrawingML main namespace
pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// Pictures namespace
pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
/// Content Types namespace
pub const CT: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
/// Package Relationships namespace
pub const REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
/// Core Properties namespace
pub const CP: &str = "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
/// Dublin Core namespace
pub const DC: &str = "http://purl.org/dc/elements/1.1/";
/// Dublin Core Terms namespace
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
/// Dublin Core types namespace
pub const DCMITYPE: &str = "http://purl.org/dc/dcmitype/";
/// Extended (app) properties namespace
pub const EP: &str = "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";
/// Variant types used by extended properties
pub const VT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes";
/// XML Schema instance namespace
pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// Office math namespace
pub const M: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";
/// VML namespace
pub const V: &str = "urn:schemas-microsoft-com:vml";
/// Office VML extensions
pub const O: &str = "urn:schemas-microsoft-com:office:office";
/// Word VML extensions
pub const W10: &str = "urn:schemas-microsoft-com:office:word";
/// Word 2006 extensions
pub const WNE: &str = "http://schemas.microsoft.com/office/word/2006/wordml";
/// Markup compatibility namespace
pub const VE: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
/// The implicitly bound `xml` namespace (`xml:space`)
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

/// A bound namespace: short prefix plus URI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub prefix: &'static str,
    pub uri: &'static str,
}

/// The fixed prefix table
pub static NAMESPACES: &[Namespace] = &[
    Namespace { prefix: "w", uri: W },
    Namespace { prefix: "r", uri: R },
    Namespace { prefix: "wp", uri: WP },
    Namespace { prefix: "a", uri: A },
    Namespace { prefix: "pic", uri: PIC },
    Namespace { prefix: "rel", uri: REL },
    Namespace { prefix: "ct", uri: CT },
    Namespace { prefix: "cp", uri: CP },
    Namespace { prefix: "dc", uri: DC },
    Namespace { prefix: "dcterms", uri: DCTERMS },
    Namespace { prefix: "dcmitype", uri: DCMITYPE },
    Namespace { prefix: "ep", uri: EP },
    Namespace { prefix: "vt", uri: VT },
    Namespace { prefix: "xsi", uri: XSI },
    Namespace { prefix: "m", uri: M },
    Namespace { prefix: "v", uri: V },
    Namespace { prefix: "o", uri: O },
    Namespace { prefix: "w10", uri: W10 },
    Namespace { prefix: "wne", uri: WNE },
    Namespace { prefix: "ve", uri: VE },
    Namespace { prefix: "xml", uri: XML },
];

/// Prefix used when a name carries none
pub const DEFAULT_PREFIX: &str = "w";

impl Namespace {
    /// Look up a namespace by prefix
    pub fn by_prefix(prefix: &str) -> Option<Namespace> {
        NAMESPACES.iter().copied().find(|ns| ns.prefix == prefix)
    }

    /// Look up a namespace by URI
    pub fn by_uri(uri: &str) -> Option<Namespace> {
        NAMESPACES.iter().copied().find(|ns| ns.uri == uri)
    }

    /// Whether an `xmlns` declaration is needed for this namespace
    pub fn needs_declaration(&self) -> bool {
        self.uri != XML
    }

    /// Package-level namespaces written as the default namespace of their part
    pub fn is_package_default(&self) -> bool {
        matches!(self.uri, CT | REL | EP)
    }
}
