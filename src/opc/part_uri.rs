//! Part names inside a DOCX package

use crate::error::{Error, Result};
use std::fmt;

/// Absolute name of a package part, e.g. `/word/document.xml`.
///
/// Zip entry names are the same path without the leading `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartUri {
    path: String,
}

impl PartUri {
    /// Normalize `path` to an absolute part name (leading `/`, no trailing
    /// `/`, no `.` or `..` segments).
    pub fn new(path: &str) -> Result<Self> {
        let path = path.trim();
        let mut segments: Vec<&str> = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => {
                    if segments.pop().is_none() {
                        return Err(Error::InvalidPartUri(format!(
                            "'{}' climbs above the package root",
                            path
                        )));
                    }
                }
                s => segments.push(s),
            }
        }
        if segments.is_empty() {
            return Err(Error::InvalidPartUri(format!("'{}' names no part", path)));
        }
        Ok(Self {
            path: format!("/{}", segments.join("/")),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Entry name inside the zip archive
    pub fn zip_path(&self) -> &str {
        &self.path[1..]
    }

    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    /// Directory holding the part, `/` for root-level parts
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.path[..pos],
        }
    }

    /// Relationships part of this part.
    ///
    /// For `/word/document.xml`, returns `/word/_rels/document.xml.rels`
    pub fn relationships_uri(&self) -> PartUri {
        let dir = self.directory().trim_end_matches('/');
        PartUri {
            path: format!("{}/_rels/{}.rels", dir, self.file_name()),
        }
    }

    /// Resolve a relationship target found in this part's relationships.
    ///
    /// For `/word/document.xml` and `media/rId6_a.png`, returns
    /// `/word/media/rId6_a.png`
    pub fn resolve(&self, target: &str) -> Result<PartUri> {
        if target.starts_with('/') {
            return PartUri::new(target);
        }
        PartUri::new(&format!("{}/{}", self.directory(), target))
    }
}

impl fmt::Display for PartUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl std::str::FromStr for PartUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartUri::new(s)
    }
}

/// Names of the parts a generated document consists of
pub mod well_known {
    pub const CONTENT_TYPES: &str = "/[Content_Types].xml";
    pub const PACKAGE_RELS: &str = "/_rels/.rels";
    pub const CORE_PROPERTIES: &str = "/docProps/core.xml";
    pub const APP_PROPERTIES: &str = "/docProps/app.xml";
    pub const DOCUMENT: &str = "/word/document.xml";
    pub const WEB_SETTINGS: &str = "/word/webSettings.xml";
    pub const STYLES: &str = "/word/styles.xml";
    pub const NUMBERING: &str = "/word/numbering.xml";
    pub const SETTINGS: &str = "/word/settings.xml";
    pub const FONT_TABLE: &str = "/word/fontTable.xml";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes() {
        let uri = PartUri::new("word/./document.xml").unwrap();
        assert_eq!(uri.as_str(), "/word/document.xml");
        assert_eq!(uri.zip_path(), "word/document.xml");
        assert_eq!(uri.file_name(), "document.xml");
    }

    #[test]
    fn test_rejects_empty_and_escaping() {
        assert!(matches!(PartUri::new(""), Err(Error::InvalidPartUri(_))));
        assert!(matches!(PartUri::new("/"), Err(Error::InvalidPartUri(_))));
        assert!(PartUri::new("../secret.xml").is_err());
    }

    #[test]
    fn test_directory() {
        assert_eq!(PartUri::new("/word/document.xml").unwrap().directory(), "/word");
        assert_eq!(PartUri::new("/[Content_Types].xml").unwrap().directory(), "/");
    }

    #[test]
    fn test_relationships_uri() {
        let uri = PartUri::new("/word/document.xml").unwrap();
        assert_eq!(uri.relationships_uri().as_str(), "/word/_rels/document.xml.rels");
        let root = PartUri::new("/x.xml").unwrap();
        assert_eq!(root.relationships_uri().as_str(), "/_rels/x.xml.rels");
    }

    #[test]
    fn test_resolve_targets() {
        let doc = PartUri::new(well_known::DOCUMENT).unwrap();
        assert_eq!(
            doc.resolve("media/rId6_image1.png").unwrap().as_str(),
            "/word/media/rId6_image1.png"
        );
        assert_eq!(doc.resolve("../docProps/core.xml").unwrap().as_str(), "/docProps/core.xml");
        assert_eq!(doc.resolve("/word/styles.xml").unwrap().as_str(), "/word/styles.xml");
    }
}
