//! Error types for docx-tree

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML encoding error: {0}")]
    XmlEncoding(#[from] quick_xml::encoding::EncodingError),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// A tag or attribute used a prefix missing from the namespace table
    #[error("Unknown namespace prefix in '{0}'")]
    UnknownNamespacePrefix(String),

    #[error("Page break type '{0}' not implemented, valid types: page, section")]
    UnsupportedBreakType(String),

    #[error("Page orientation '{0}' not implemented, valid orientations: portrait, landscape")]
    UnsupportedOrientation(String),

    #[error("Cannot read image {}: {source}", path.display())]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Missing required part: {0}")]
    MissingPart(String),

    #[error("Invalid part URI: {0}")]
    InvalidPartUri(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
