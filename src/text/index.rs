//! Run-Text Index: a subtree's run text flattened into one string

use crate::xml::{Element, W};

/// One run's slice of the index text
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSpan {
    /// Child-index path from the indexed subtree root to the `w:r`
    pub path: Vec<usize>,
    /// Byte offset into [`RunTextIndex::text`]
    pub start: usize,
    /// Length in bytes, never zero
    pub len: usize,
}

impl RunSpan {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Concatenated text of every run under a subtree, with the span each
/// non-empty run covers.
///
/// Spans are in document order, contiguous and non-overlapping, and cover
/// the text exactly. The index borrows nothing; it goes stale as soon as the
/// tree is mutated and must be rebuilt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunTextIndex {
    text: String,
    spans: Vec<RunSpan>,
}

impl RunTextIndex {
    /// Index the runs under `root` (or `root` itself when it is a run)
    pub fn build(root: &Element) -> Self {
        let mut index = Self::default();
        visit_runs(root, &mut Vec::new(), &mut |path, run| {
            let text = run_text(run);
            if text.is_empty() {
                return;
            }
            index.spans.push(RunSpan {
                path: path.to_vec(),
                start: index.text.len(),
                len: text.len(),
            });
            index.text.push_str(&text);
        });
        log::trace!(
            "indexed {} runs, {} bytes of text",
            index.spans.len(),
            index.text.len()
        );
        index
    }

    /// The flattened text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[RunSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Text covered by one span
    pub fn span_text(&self, span: &RunSpan) -> &str {
        &self.text[span.start..span.end()]
    }

    /// Spans intersecting the byte range `start..end`, in document order
    pub fn overlapping(&self, start: usize, end: usize) -> impl Iterator<Item = &RunSpan> {
        self.spans
            .iter()
            .skip_while(move |s| s.end() <= start)
            .take_while(move |s| s.start < end)
    }
}

/// Text of a run: its `w:t` children concatenated
pub fn run_text(run: &Element) -> String {
    run.children_named(W, "t")
        .filter_map(|t| t.text.as_deref())
        .collect()
}

/// Call `f` with the path and node of every `w:r` under `node`, in document
/// order. Runs are not descended into.
pub(crate) fn visit_runs<'a, F>(node: &'a Element, path: &mut Vec<usize>, f: &mut F)
where
    F: FnMut(&[usize], &'a Element),
{
    if node.is(W, "r") {
        f(path, node);
        return;
    }
    for (i, child) in node.children.iter().enumerate() {
        path.push(i);
        visit_runs(child, path, f);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{paragraph, paragraph_with, run, table, ParagraphOptions, RunFormat};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_index_across_runs() {
        let para = paragraph_with(
            &[("Hello ", RunFormat::PLAIN), ("World", RunFormat::from_flags("b"))],
            &ParagraphOptions::default(),
        )
        .unwrap();
        let index = RunTextIndex::build(&para);

        assert_eq!(index.text(), "Hello World");
        assert_eq!(
            index.spans(),
            [
                RunSpan { path: vec![1], start: 0, len: 6 },
                RunSpan { path: vec![2], start: 6, len: 5 },
            ]
        );
        assert_eq!(index.span_text(&index.spans()[1]), "World");
    }

    #[test]
    fn test_empty_runs_have_no_span() {
        let mut para = paragraph("a", None).unwrap();
        para.push(run("", RunFormat::PLAIN).unwrap());
        para.push(Element::new("r").unwrap());
        para.push(run("b", RunFormat::PLAIN).unwrap());

        let index = RunTextIndex::build(&para);
        assert_eq!(index.text(), "ab");
        assert_eq!(index.spans().len(), 2);
        assert_eq!(index.spans()[1].path, [4]);
    }

    #[test]
    fn test_nested_paths_address_runs() {
        let tbl = table(&[vec!["A1", "A2"], vec!["B1", "B2"]]).unwrap();
        let index = RunTextIndex::build(&tbl);
        assert_eq!(index.text(), "A1A2B1B2");

        for span in index.spans() {
            let node = tbl.node_at(&span.path).unwrap();
            assert!(node.is(W, "r"));
            assert_eq!(run_text(node), index.span_text(span));
        }
    }

    #[test]
    fn test_run_root_and_multiple_texts() {
        let r = Element::new("r")
            .unwrap()
            .with_child(Element::new("t").unwrap().with_text("ab"))
            .with_child(Element::new("tab").unwrap())
            .with_child(Element::new("t").unwrap().with_text("cd"));
        let index = RunTextIndex::build(&r);
        assert_eq!(index.text(), "abcd");
        assert_eq!(index.spans()[0].path, Vec::<usize>::new());
    }

    #[test]
    fn test_overlapping() {
        let para = paragraph_with(
            &[("ab", RunFormat::PLAIN), ("cd", RunFormat::PLAIN), ("ef", RunFormat::PLAIN)],
            &ParagraphOptions::default(),
        )
        .unwrap();
        let index = RunTextIndex::build(&para);
        let starts: Vec<_> = index.overlapping(1, 4).map(|s| s.start).collect();
        assert_eq!(starts, [0, 2]);
        let starts: Vec<_> = index.overlapping(2, 3).map(|s| s.start).collect();
        assert_eq!(starts, [2]);
    }

    proptest! {
        #[test]
        fn prop_spans_are_contiguous(texts in prop::collection::vec("[a-zé ]{0,6}", 0..8)) {
            let runs: Vec<_> = texts.iter().map(|t| (t.as_str(), RunFormat::PLAIN)).collect();
            let para = paragraph_with(&runs, &ParagraphOptions::default()).unwrap();
            let index = RunTextIndex::build(&para);

            let mut offset = 0;
            for span in index.spans() {
                prop_assert_eq!(span.start, offset);
                prop_assert!(span.len > 0);
                offset = span.end();
            }
            prop_assert_eq!(offset, index.text().len());
            prop_assert_eq!(index.text(), texts.concat());
        }
    }
}
