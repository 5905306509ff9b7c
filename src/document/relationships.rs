//! Relationship accumulator for the main document part
//!
//! Collects the `(id, type, target)` entries projected into
//! `word/_rels/document.xml.rels`, together with the media bytes that the
//! image relationships point at.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single relationship
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path, relative to `word/`
    pub target: String,
}

/// Media file embedded in the package under `word/`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaFile {
    /// Target path relative to `word/` (e.g., "media/rId6_logo.png")
    pub target: String,
    pub data: Vec<u8>,
}

/// Ordered relationship list owned by one assembly session
#[derive(Clone, Debug)]
pub struct RelationshipList {
    items: Vec<Relationship>,
    /// Images registered without an [`ImageFileDict`]
    media: Vec<MediaFile>,
    /// Next auto-generated ID number
    next_id: u32,
}

impl Default for RelationshipList {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipList {
    /// Create a list holding the intrinsic document relationships
    /// (`rId1`..`rId5`); every later entry is numbered after them.
    pub fn new() -> Self {
        let mut rels = Self::empty();
        for (rel_type, target) in INTRINSIC {
            rels.add(rel_type, target);
        }
        rels
    }

    /// Create a list without intrinsic relationships
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            media: Vec::new(),
            next_id: 1, // Start from 1, not 0
        }
    }

    /// Add a relationship (auto-generates ID)
    pub fn add(&mut self, rel_type: &str, target: &str) -> String {
        let id = self.generate_id();
        log::debug!("registered relationship {} -> {}", id, target);
        self.items.push(Relationship {
            id: id.clone(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
        });
        id
    }

    /// The ID the next [`RelationshipList::add`] will hand out
    pub fn peek_id(&self) -> String {
        format!("rId{}", self.next_id)
    }

    /// Get a relationship by ID
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Get all relationships of a given type
    pub fn all_by_type<'a>(
        &'a self,
        rel_type: &'a str,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.items.iter().filter(move |r| r.rel_type == rel_type)
    }

    /// Iterate over all relationships in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }

    /// Number of relationships
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Media copied into the package on save
    pub fn media(&self) -> &[MediaFile] {
        &self.media
    }

    pub(crate) fn add_media(&mut self, target: String, data: Vec<u8>) {
        self.media.push(MediaFile { target, data });
    }

    /// Generate a new unique ID
    fn generate_id(&mut self) -> String {
        let id = self.peek_id();
        self.next_id += 1;
        id
    }
}

/// An image already registered through an [`ImageFileDict`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// Relationship ID shared by every reference to the image
    pub rel_id: String,
    pub media: MediaFile,
}

/// Source path -> registered image, so one file is read and embedded once
#[derive(Clone, Debug, Default)]
pub struct ImageFileDict {
    entries: BTreeMap<PathBuf, EmbeddedImage>,
}

impl ImageFileDict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, source: &Path) -> Option<&EmbeddedImage> {
        self.entries.get(source)
    }

    pub fn contains(&self, source: &Path) -> bool {
        self.entries.contains_key(source)
    }

    pub(crate) fn insert(&mut self, source: PathBuf, image: EmbeddedImage) {
        self.entries.insert(source, image);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered images ordered by source path
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &EmbeddedImage)> {
        self.entries.iter().map(|(k, v)| (k.as_path(), v))
    }
}

const INTRINSIC: [(&str, &str); 5] = [
    (rel_types::STYLES, "styles.xml"),
    (rel_types::NUMBERING, "numbering.xml"),
    (rel_types::SETTINGS, "settings.xml"),
    (rel_types::WEB_SETTINGS, "webSettings.xml"),
    (rel_types::FONT_TABLE, "fontTable.xml"),
];

// Well-known relationship types
pub mod rel_types {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const SETTINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    pub const WEB_SETTINGS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/webSettings";
    pub const NUMBERING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
    pub const FONT_TABLE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/fontTable";
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
}
