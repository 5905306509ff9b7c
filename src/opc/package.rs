//! DOCX package writing and reading
//!
//! A package is a zip archive of XML parts plus the media files the document
//! relationships point to.

use crate::document::{
    fonttable, numbering, package_relationships, rel_types, settings, styles, ImageFileDict,
    RelationshipList,
};
use crate::error::{Error, Result};
use crate::opc::part_uri::{well_known, PartUri};
use crate::xml::{Element, REL};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;
use zip::read::ZipArchive;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// The caller-assembled parts of a document
#[derive(Clone, Copy, Debug)]
pub struct DocxParts<'a> {
    /// `w:document` root
    pub document: &'a Element,
    pub core_properties: &'a Element,
    pub app_properties: &'a Element,
    pub content_types: &'a Element,
    pub web_settings: &'a Element,
    pub word_relationships: &'a Element,
}

/// Write a complete .docx file at `path`
pub fn savedocx<P: AsRef<Path>>(
    parts: &DocxParts<'_>,
    relationships: &RelationshipList,
    images: Option<&ImageFileDict>,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    log::debug!("saving document to {}", path.display());
    let file = File::create(path)?;
    write_docx(parts, relationships, images, BufWriter::new(file))
}

/// Write a complete .docx package to `writer`.
///
/// Besides the given parts this writes the package relationships, the
/// styles, numbering, settings and font table parts, and every media file
/// registered in `relationships` or `images`. Each media target is written
/// once.
pub fn write_docx<W: Write + Seek>(
    parts: &DocxParts<'_>,
    relationships: &RelationshipList,
    images: Option<&ImageFileDict>,
    writer: W,
) -> Result<()> {
    let mut zip = ZipWriter::new(writer);
    let options: FileOptions<()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    let generated = [
        (well_known::PACKAGE_RELS, package_relationships()?),
        (well_known::STYLES, styles()?),
        (well_known::NUMBERING, numbering()?),
        (well_known::SETTINGS, settings()?),
        (well_known::FONT_TABLE, fonttable()?),
    ];
    let document_uri = PartUri::new(well_known::DOCUMENT)?;
    let word_rels_uri = document_uri.relationships_uri();

    let xml_parts = [
        (well_known::CONTENT_TYPES, parts.content_types),
        (well_known::CORE_PROPERTIES, parts.core_properties),
        (well_known::APP_PROPERTIES, parts.app_properties),
        (well_known::DOCUMENT, parts.document),
        (well_known::WEB_SETTINGS, parts.web_settings),
        (word_rels_uri.as_str(), parts.word_relationships),
    ];

    for (name, element) in xml_parts
        .into_iter()
        .chain(generated.iter().map(|(name, element)| (*name, element)))
    {
        let uri = PartUri::new(name)?;
        log::debug!("writing part {}", uri);
        zip.start_file(uri.zip_path(), options)?;
        element.write_part(&mut zip)?;
    }

    let media = relationships.media().iter().chain(
        images
            .into_iter()
            .flat_map(|dict| dict.iter().map(|(_, image)| &image.media)),
    );
    let mut written = BTreeSet::new();
    for file in media {
        let uri = document_uri.resolve(&file.target)?;
        if !written.insert(uri.clone()) {
            continue;
        }
        log::debug!("writing media {} ({} bytes)", uri, file.data.len());
        zip.start_file(uri.zip_path(), options)?;
        zip.write_all(&file.data)?;
    }

    zip.finish()?;
    Ok(())
}

/// Open a .docx file and parse its main document part
pub fn opendocx<P: AsRef<Path>>(path: P) -> Result<Element> {
    let path = path.as_ref();
    log::debug!("opening document {}", path.display());
    let file = File::open(path)?;
    read_docx(BufReader::new(file))
}

/// Parse the main document part of a .docx package.
///
/// The part is located through the office-document relationship in
/// `_rels/.rels`, falling back to `word/document.xml`.
pub fn read_docx<R: Read + Seek>(reader: R) -> Result<Element> {
    let mut archive = ZipArchive::new(reader)?;
    let main = main_document_uri(&mut archive)?;
    log::debug!("reading main document {}", main);

    let xml = read_part(&mut archive, &main)?
        .ok_or_else(|| Error::MissingPart(main.as_str().to_string()))?;
    Element::parse(&xml)
}

fn main_document_uri<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<PartUri> {
    let package_rels = PartUri::new(well_known::PACKAGE_RELS)?;
    let Some(xml) = read_part(archive, &package_rels)? else {
        return PartUri::new(well_known::DOCUMENT);
    };

    let rels = Element::parse(&xml)?;
    let target = rels
        .children_named(REL, "Relationship")
        .find(|rel| rel.attr("Type") == Some(rel_types::OFFICE_DOCUMENT))
        .and_then(|rel| rel.attr("Target"));

    match target {
        // package relationship targets are relative to the root
        Some(target) => PartUri::new(target),
        None => PartUri::new(well_known::DOCUMENT),
    }
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, uri: &PartUri) -> Result<Option<String>> {
    let mut file = match archive.by_name(uri.zip_path()) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}
