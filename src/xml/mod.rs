//! XML element tree, namespace table and codec

mod codec;
mod element;
mod namespace;

pub use element::{make_element, Descendants, Element, QName};
pub use namespace::*;

/// Parse a boolean value from OOXML (handles "1", "true", "on", or missing val)
pub fn parse_bool(element: &Element) -> bool {
    match element.attr("val") {
        None => true, // No val attribute means true (e.g., <w:b/>)
        Some(v) => matches!(v, "1" | "true" | "on"),
    }
}
