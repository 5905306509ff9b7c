//! Run-aware search and replace
//!
//! Matching runs over the flattened run text of a subtree, so a target may
//! span several runs. When a replacement spans runs, the inserted text takes
//! the formatting of the first run: that run keeps its text before the match
//! followed by the replacement, every later run it touched keeps only the text
//! after the match, and runs left empty are removed.

use crate::document::needs_preserve;
use crate::text::index::RunTextIndex;
use crate::xml::{Element, Namespace, QName, W, XML};

/// Byte range of a replaced match in the subtree's flattened run text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextMatch {
    pub start: usize,
    pub end: usize,
}

/// Whether `target` occurs in the run text of `subtree`
pub fn search(subtree: &Element, target: &str) -> bool {
    RunTextIndex::build(subtree).text().contains(target)
}

/// Replace the first occurrence of `target` under `subtree`.
///
/// A missing target leaves the tree untouched.
pub fn replace<'a>(
    subtree: &'a mut Element,
    target: &str,
    replacement: &str,
) -> &'a mut Element {
    replace_first(subtree, target, replacement);
    subtree
}

/// Like [`replace`], reporting where the match was, or `None` when nothing
/// was replaced. An empty target matches no run and replaces nothing.
pub fn replace_first(subtree: &mut Element, target: &str, replacement: &str) -> Option<TextMatch> {
    if target.is_empty() {
        return None;
    }

    let index = RunTextIndex::build(subtree);
    let start = index.text().find(target)?;
    let end = start + target.len();

    let spans: Vec<_> = index.overlapping(start, end).collect();
    let (first, rest) = spans.split_first()?;
    let first_text = index.span_text(first);
    let prefix = &first_text[..start - first.start];

    if rest.is_empty() {
        let suffix = &first_text[end - first.start..];
        set_text_at(subtree, &first.path, &format!("{}{}{}", prefix, replacement, suffix));
    } else {
        set_text_at(subtree, &first.path, &format!("{}{}", prefix, replacement));
        // back to front so earlier paths stay valid
        for span in rest.iter().rev() {
            if span.end() > end {
                set_text_at(subtree, &span.path, &index.text()[end..span.end()]);
            } else {
                subtree.remove_at(&span.path);
            }
        }
    }

    log::debug!(
        "replaced {:?} at {}..{} across {} run(s)",
        target,
        start,
        end,
        spans.len()
    );
    Some(TextMatch { start, end })
}

fn set_text_at(subtree: &mut Element, path: &[usize], text: &str) {
    if let Some(run) = subtree.node_at_mut(path) {
        set_run_text(run, text);
    }
}

/// Make `text` the whole text of a run: the first `w:t` takes it and any
/// other `w:t` is dropped.
fn set_run_text(run: &mut Element, text: &str) {
    let mut first = true;
    run.children.retain(|c| {
        if !c.is(W, "t") {
            return true;
        }
        std::mem::replace(&mut first, false)
    });

    let Some(t) = run.child_mut(W, "t") else {
        return;
    };
    t.text = Some(text.to_string());
    t.attributes.retain(|(name, _)| !name.is(XML, "space"));
    if needs_preserve(text) {
        let space = QName::new(Namespace::by_uri(XML), "space");
        t.attributes.push((space, "preserve".to_string()));
    }
}
