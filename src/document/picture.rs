//! Inline pictures (w:drawing)

use std::ffi::OsStr;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use crate::document::parts::EXTENSION_CONTENT_TYPES;
use crate::document::relationships::{
    rel_types, EmbeddedImage, ImageFileDict, MediaFile, RelationshipList,
};
use crate::error::{Error, Result};
use crate::xml::Element;

/// English Metric Units per pixel (at 72 dpi)
pub const EMU_PER_PIXEL: u64 = 12700;

/// Settings for [`picture_with`]
#[derive(Clone, Debug)]
pub struct PictureOptions {
    /// Size in pixels; read from the image when `None`
    pub pixel_size: Option<(u32, u32)>,
    pub no_change_aspect: bool,
    pub no_change_arrowheads: bool,
}

impl Default for PictureOptions {
    fn default() -> Self {
        Self {
            pixel_size: None,
            no_change_aspect: true,
            no_change_arrowheads: true,
        }
    }
}

/// Register `source` as an image of the document and return the paragraph
/// that displays it.
///
/// With an [`ImageFileDict`], a source already registered in it reuses its
/// relationship ID and nothing new is appended. Without one, every call reads
/// the file and registers a fresh relationship.
pub fn picture(
    relationships: &mut RelationshipList,
    source: impl AsRef<Path>,
    description: &str,
    images: Option<&mut ImageFileDict>,
) -> Result<Element> {
    picture_with(
        relationships,
        source,
        description,
        &PictureOptions::default(),
        images,
    )
}

/// [`picture`] with explicit size and lock settings
pub fn picture_with(
    relationships: &mut RelationshipList,
    source: impl AsRef<Path>,
    description: &str,
    options: &PictureOptions,
    images: Option<&mut ImageFileDict>,
) -> Result<Element> {
    let source = source.as_ref();

    let (rel_id, size) = match images {
        Some(images) => match images.get(source) {
            Some(embedded) => {
                log::debug!("reusing {} for {}", embedded.rel_id, source.display());
                let (_, size) = inspect_image(options, source, &embedded.media.data)?;
                (embedded.rel_id.clone(), size)
            }
            None => {
                let data = read_image(source)?;
                let (format, size) = inspect_image(options, source, &data)?;
                let target = media_target(&relationships.peek_id(), source, format);
                let rel_id = relationships.add(rel_types::IMAGE, &target);
                images.insert(
                    source.to_path_buf(),
                    EmbeddedImage {
                        rel_id: rel_id.clone(),
                        media: MediaFile { target, data },
                    },
                );
                (rel_id, size)
            }
        },
        None => {
            let data = read_image(source)?;
            let (format, size) = inspect_image(options, source, &data)?;
            let target = media_target(&relationships.peek_id(), source, format);
            let rel_id = relationships.add(rel_types::IMAGE, &target);
            relationships.add_media(target, data);
            (rel_id, size)
        }
    };

    drawing_paragraph(&rel_id, source, description, size, options)
}

/// Guessed format and pixel size; the image is only decoded when no size is
/// configured.
fn inspect_image(
    options: &PictureOptions,
    source: &Path,
    data: &[u8],
) -> Result<(Option<ImageFormat>, (u32, u32))> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| Error::ImageRead {
            path: source.to_path_buf(),
            source: e,
        })?;
    let format = reader.format();
    let size = match options.pixel_size {
        Some(size) => size,
        None => reader.into_dimensions().map_err(|e| Error::ImageDecode {
            path: source.to_path_buf(),
            source: e,
        })?,
    };
    Ok((format, size))
}

fn read_image(source: &Path) -> Result<Vec<u8>> {
    std::fs::read(source).map_err(|e| Error::ImageRead {
        path: source.to_path_buf(),
        source: e,
    })
}

/// `media/{rId}_{file name}`, unique per relationship.
///
/// A file name whose extension has no image content type takes the
/// extension of the guessed format instead.
fn media_target(rel_id: &str, source: &Path, format: Option<ImageFormat>) -> String {
    let file_name = source.file_name().unwrap_or(OsStr::new("image"));
    let mut name = Path::new(file_name).to_path_buf();
    let known = name
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(has_image_content_type);
    if !known {
        if let Some(ext) = format.and_then(|f| f.extensions_str().first().copied()) {
            name.set_extension(ext);
        }
    }
    format!("media/{}_{}", rel_id, name.to_string_lossy())
}

fn has_image_content_type(ext: &str) -> bool {
    EXTENSION_CONTENT_TYPES.iter().any(|(known, content_type)| {
        content_type.starts_with("image/") && known.eq_ignore_ascii_case(ext)
    })
}

fn drawing_paragraph(
    rel_id: &str,
    source: &Path,
    description: &str,
    (width_px, height_px): (u32, u32),
    options: &PictureOptions,
) -> Result<Element> {
    let cx = (u64::from(width_px) * EMU_PER_PIXEL).to_string();
    let cy = (u64::from(height_px) * EMU_PER_PIXEL).to_string();
    let flag = |b: bool| if b { "1" } else { "0" };

    // how the image fills the picture area
    let blip_fill = Element::new("pic:blipFill")?
        .with_child(Element::new("a:blip")?.with_attr("r:embed", rel_id)?)
        .with_child(Element::new("a:srcRect")?)
        .with_child(Element::new("a:stretch")?.with_child(Element::new("a:fillRect")?));

    let non_visual = Element::new("pic:nvPicPr")?
        .with_child(
            Element::new("pic:cNvPr")?
                .with_attr("id", "0")?
                .with_attr("name", "Picture 1")?
                .with_attr("descr", source.to_string_lossy())?,
        )
        .with_child(
            Element::new("pic:cNvPicPr")?.with_child(
                Element::new("a:picLocks")?
                    .with_attr("noChangeAspect", flag(options.no_change_aspect))?
                    .with_attr("noChangeArrowheads", flag(options.no_change_arrowheads))?,
            ),
        );

    let shape = Element::new("pic:spPr")?
        .with_attr("bwMode", "auto")?
        .with_child(
            Element::new("a:xfrm")?
                .with_child(Element::new("a:off")?.with_attr("x", "0")?.with_attr("y", "0")?)
                .with_child(
                    Element::new("a:ext")?
                        .with_attr("cx", cx.as_str())?
                        .with_attr("cy", cy.as_str())?,
                ),
        )
        .with_child(
            Element::new("a:prstGeom")?
                .with_attr("prst", "rect")?
                .with_child(Element::new("a:avLst")?),
        );

    let graphic = Element::new("a:graphic")?.with_child(
        Element::new("a:graphicData")?
            .with_attr("uri", crate::xml::PIC)?
            .with_child(
                Element::new("pic:pic")?
                    .with_child(non_visual)
                    .with_child(blip_fill)
                    .with_child(shape),
            ),
    );

    let inline = Element::new("wp:inline")?
        .with_attr("distT", "0")?
        .with_attr("distB", "0")?
        .with_attr("distL", "0")?
        .with_attr("distR", "0")?
        .with_child(
            Element::new("wp:extent")?
                .with_attr("cx", cx.as_str())?
                .with_attr("cy", cy.as_str())?,
        )
        .with_child(
            Element::new("wp:effectExtent")?
                .with_attr("l", "25400")?
                .with_attr("t", "0")?
                .with_attr("r", "0")?
                .with_attr("b", "0")?,
        )
        .with_child(
            Element::new("wp:docPr")?
                .with_attr("id", "2")?
                .with_attr("name", "Picture 1")?
                .with_attr("descr", description)?,
        )
        .with_child(
            Element::new("wp:cNvGraphicFramePr")?.with_child(
                Element::new("a:graphicFrameLocks")?.with_attr("noChangeAspect", "1")?,
            ),
        )
        .with_child(graphic);

    Ok(Element::new("p")?.with_child(
        Element::new("r")?.with_child(Element::new("drawing")?.with_child(inline)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::{A, R};

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        image::RgbImage::new(w, h).save(&path).unwrap();
        path
    }

    fn blip_id(para: &Element) -> String {
        let blip = para.descendants().find(|e| e.is(A, "blip")).unwrap();
        assert_eq!(blip.attributes[0].0.namespace_uri(), Some(R));
        blip.attr("r:embed").unwrap().to_string()
    }

    #[test]
    fn test_picture_registers_relationship() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_png(dir.path(), "image1.png", 4, 3);
        let mut rels = RelationshipList::new();

        let para = picture(&mut rels, &png, "This is a test description", None).unwrap();
        let id = blip_id(&para);
        assert_eq!(id, "rId6");
        assert_eq!(rels.get(&id).unwrap().target, "media/rId6_image1.png");
        assert_eq!(rels.media().len(), 1);

        let ext = para.descendants().find(|e| e.is(crate::xml::WP, "extent")).unwrap();
        assert_eq!(ext.attr("cx"), Some("50800"));
        assert_eq!(ext.attr("cy"), Some("38100"));
    }

    #[test]
    fn test_dictionary_deduplicates() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_png(dir.path(), "image1.png", 2, 2);

        let mut rels = RelationshipList::new();
        let mut images = ImageFileDict::new();
        let first = picture(&mut rels, &png, "one", Some(&mut images)).unwrap();
        let second = picture(&mut rels, &png, "two", Some(&mut images)).unwrap();
        assert_eq!(blip_id(&first), blip_id(&second));
        assert_eq!(rels.all_by_type(rel_types::IMAGE).count(), 1);
        assert_eq!(images.len(), 1);
        assert!(images.contains(&png));
        assert!(rels.media().is_empty());

        let mut rels = RelationshipList::new();
        let first = picture(&mut rels, &png, "one", None).unwrap();
        let second = picture(&mut rels, &png, "two", None).unwrap();
        assert_ne!(blip_id(&first), blip_id(&second));
        assert_eq!(rels.all_by_type(rel_types::IMAGE).count(), 2);
    }

    #[test]
    fn test_missing_image_registers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut rels = RelationshipList::new();
        let mut images = ImageFileDict::new();
        let before = rels.len();

        let err = picture(&mut rels, dir.path().join("nope.png"), "x", Some(&mut images));
        assert!(matches!(err, Err(Error::ImageRead { .. })));
        assert_eq!(rels.len(), before);
        assert!(images.is_empty());
    }

    #[test]
    fn test_undecodable_image() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.png");
        std::fs::write(&bogus, b"not an image").unwrap();
        let mut rels = RelationshipList::new();

        let before = rels.len();

        let err = picture(&mut rels, &bogus, "x", None);
        assert!(matches!(err, Err(Error::ImageDecode { .. })));
        assert_eq!(rels.len(), before);
        assert!(rels.media().is_empty());
    }

    #[test]
    fn test_media_name_takes_guessed_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut rels = RelationshipList::new();
        for name in ["logo", "scan.dat"] {
            let path = dir.path().join(name);
            image::RgbImage::new(3, 2)
                .save_with_format(&path, ImageFormat::Png)
                .unwrap();
            picture(&mut rels, &path, "no extension", None).unwrap();
        }

        let targets: Vec<_> = rels
            .all_by_type(rel_types::IMAGE)
            .map(|r| r.target.as_str())
            .collect();
        assert_eq!(targets, ["media/rId6_logo.png", "media/rId7_scan.png"]);
        for target in targets {
            let ext = Path::new(target).extension().unwrap().to_str().unwrap();
            assert!(has_image_content_type(ext));
        }
    }

    #[test]
    fn test_known_extension_kept() {
        assert_eq!(
            media_target("rId9", Path::new("/tmp/photo.JPG"), Some(ImageFormat::Png)),
            "media/rId9_photo.JPG"
        );
        assert_eq!(media_target("rId9", Path::new("/tmp/blob"), None), "media/rId9_blob");
    }

    #[test]
    fn test_explicit_size_and_locks() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_png(dir.path(), "pic.png", 1, 1);
        let mut rels = RelationshipList::new();
        let options = PictureOptions {
            pixel_size: Some((10, 20)),
            no_change_aspect: false,
            ..Default::default()
        };

        let para = picture_with(&mut rels, &png, "sized", &options, None).unwrap();
        let ext = para.descendants().find(|e| e.is(A, "ext")).unwrap();
        assert_eq!(ext.attr("cx"), Some("127000"));
        let locks = para.descendants().find(|e| e.is(A, "picLocks")).unwrap();
        assert_eq!(locks.attr("noChangeAspect"), Some("0"));
        assert_eq!(locks.attr("noChangeArrowheads"), Some("1"));
    }
}
