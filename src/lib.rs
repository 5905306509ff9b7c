//! # docx-tree
//!
//! Build Office Open XML word-processing documents as namespaced element
//! trees, and search and rewrite their text across run boundaries.
//!
//! ## Features
//!
//! - Builders for headings, paragraphs, tables, breaks and inline pictures
//! - Generated package parts (properties, content types, styles, ...)
//! - Run-aware search and replace over any subtree
//! - Writing and reading `.docx` packages
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docx_tree::document::{body_mut, heading, newdocument, paragraph};
//! use docx_tree::text::{replace, search};
//!
//! let mut doc = newdocument()?;
//! let body = body_mut(&mut doc)?;
//! body.push(heading("Welcome", 1)?);
//! body.push(paragraph("Hello World!", None)?);
//!
//! replace(body, "World", "docx");
//! assert!(search(body, "Hello docx!"));
//! ```

pub mod document;
pub mod error;
pub mod opc;
pub mod text;
pub mod xml;

pub use document::{newdocument, RelationshipList};
pub use error::{Error, Result};
pub use opc::{opendocx, savedocx, DocxParts};
pub use text::{getdocumenttext, replace, search};
pub use xml::{make_element, Element};
