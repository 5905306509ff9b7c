//! Text over document trees: the run-text index, search/replace and
//! plain-text extraction

mod extract;
mod index;
mod search;

pub use extract::{getdocumenttext, paragraph_text};
pub use index::{run_text, RunSpan, RunTextIndex};
pub use search::{replace, replace_first, search, TextMatch};
