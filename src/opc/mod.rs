//! Open Packaging Convention (OPC) container
//!
//! A DOCX file is a zip archive of parts; this module writes and reads it.

mod package;
mod part_uri;

pub use package::{opendocx, read_docx, savedocx, write_docx, DocxParts};
pub use part_uri::{well_known, PartUri};
