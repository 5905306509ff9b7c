//! Table nodes (w:tbl, w:tr, w:tc)

use crate::document::paragraph::{paragraph_with, Justification, ParagraphOptions, RunFormat};
use crate::error::Result;
use crate::xml::Element;

/// Grid column width used when no widths are given (twips)
pub const DEFAULT_COLUMN_WIDTH: u32 = 2390;

/// One border edge (w:top, w:insideH, ...)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BorderSpec {
    /// Line style, e.g. "single"
    pub val: String,
    /// Width in eighths of a point
    pub size: u32,
    pub space: u32,
    pub color: String,
}

impl Default for BorderSpec {
    fn default() -> Self {
        Self {
            val: "single".to_string(),
            size: 4,
            space: 0,
            color: "auto".to_string(),
        }
    }
}

/// Table borders. `all` applies to every edge that has no explicit spec.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableBorders {
    pub all: Option<BorderSpec>,
    pub top: Option<BorderSpec>,
    pub left: Option<BorderSpec>,
    pub bottom: Option<BorderSpec>,
    pub right: Option<BorderSpec>,
    pub inside_h: Option<BorderSpec>,
    pub inside_v: Option<BorderSpec>,
}

impl TableBorders {
    /// Same border on every edge
    pub fn all(spec: BorderSpec) -> Self {
        Self {
            all: Some(spec),
            ..Default::default()
        }
    }

    fn is_empty(&self) -> bool {
        self.edges().all(|(_, spec)| spec.is_none())
    }

    fn edges(&self) -> impl Iterator<Item = (&'static str, Option<&BorderSpec>)> {
        let fallback = self.all.as_ref();
        [
            ("top", self.top.as_ref()),
            ("left", self.left.as_ref()),
            ("bottom", self.bottom.as_ref()),
            ("right", self.right.as_ref()),
            ("insideH", self.inside_h.as_ref()),
            ("insideV", self.inside_v.as_ref()),
        ]
        .into_iter()
        .map(move |(name, spec)| (name, spec.or(fallback)))
    }
}

/// Layout settings for [`table_with`]
#[derive(Clone, Debug)]
pub struct TableOptions {
    /// Render the first row as a shaded, centred heading row
    pub heading: bool,
    /// Column widths; `None` leaves cell widths to auto-fit
    pub column_widths: Option<Vec<u32>>,
    /// Unit of `column_widths` (w:tcW type)
    pub column_width_unit: String,
    pub table_width: u32,
    /// Unit of `table_width` (w:tblW type)
    pub table_width_unit: String,
    pub borders: TableBorders,
    /// Per-column alignment of body cells; missing columns are left aligned
    pub column_alignment: Vec<Justification>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            heading: true,
            column_widths: None,
            column_width_unit: "dxa".to_string(),
            table_width: 0,
            table_width_unit: "auto".to_string(),
            borders: TableBorders::default(),
            column_alignment: Vec::new(),
        }
    }
}

/// Table with default layout (first row is the heading row)
pub fn table<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Element> {
    table_with(rows, &TableOptions::default())
}

/// Table from rectangular string rows. The column count is taken from the
/// first row.
pub fn table_with<S: AsRef<str>>(rows: &[Vec<S>], options: &TableOptions) -> Result<Element> {
    let columns = rows.first().map(Vec::len).unwrap_or(0);
    let mut tbl = Element::new("tbl")?
        .with_child(table_properties(options)?)
        .with_child(table_grid(columns, options)?);

    for (i, row) in rows.iter().enumerate() {
        let heading = options.heading && i == 0;
        let mut tr = Element::new("tr")?;
        if heading {
            tr.push(
                Element::new("trPr")?
                    .with_child(Element::new("cnfStyle")?.with_attr("val", "000000100000")?),
            );
        }
        for (col, text) in row.iter().enumerate() {
            tr.push(table_cell(text.as_ref(), col, heading, options)?);
        }
        tbl.push(tr);
    }

    Ok(tbl)
}

fn table_properties(options: &TableOptions) -> Result<Element> {
    let mut props = Element::new("tblPr")?
        .with_child(Element::new("tblStyle")?.with_attr("val", "TableGrid")?)
        .with_child(
            Element::new("tblW")?
                .with_attr("w", options.table_width.to_string())?
                .with_attr("type", options.table_width_unit.as_str())?,
        );

    if !options.borders.is_empty() {
        let mut borders = Element::new("tblBorders")?;
        for (edge, spec) in options.borders.edges() {
            let Some(spec) = spec else { continue };
            borders.push(
                Element::new(edge)?
                    .with_attr("val", spec.val.as_str())?
                    .with_attr("sz", spec.size.to_string())?
                    .with_attr("space", spec.space.to_string())?
                    .with_attr("color", spec.color.as_str())?,
            );
        }
        props.push(borders);
    }

    props.push(Element::new("tblLook")?.with_attr("val", "0400")?);
    Ok(props)
}

fn table_grid(columns: usize, options: &TableOptions) -> Result<Element> {
    let mut grid = Element::new("tblGrid")?;
    for col in 0..columns {
        let width = column_width(options, col).unwrap_or(DEFAULT_COLUMN_WIDTH);
        grid.push(Element::new("gridCol")?.with_attr("w", width.to_string())?);
    }
    Ok(grid)
}

fn column_width(options: &TableOptions, col: usize) -> Option<u32> {
    options.column_widths.as_ref()?.get(col).copied()
}

fn table_cell(text: &str, col: usize, heading: bool, options: &TableOptions) -> Result<Element> {
    let width = match column_width(options, col) {
        Some(w) => Element::new("tcW")?
            .with_attr("w", w.to_string())?
            .with_attr("type", options.column_width_unit.as_str())?,
        None => Element::new("tcW")?.with_attr("w", "0")?.with_attr("type", "auto")?,
    };
    let mut props = Element::new("tcPr")?.with_child(width);

    let justification = if heading {
        props.push(
            Element::new("shd")?
                .with_attr("val", "clear")?
                .with_attr("color", "auto")?
                .with_attr("fill", "FFFFFF")?
                .with_attr("themeFill", "text2")?
                .with_attr("themeFillTint", "99")?,
        );
        Justification::Center
    } else {
        options
            .column_alignment
            .get(col)
            .copied()
            .unwrap_or_default()
    };

    let para = paragraph_with(
        &[(text, RunFormat::PLAIN)],
        &ParagraphOptions::default().justification(justification),
    )?;
    Ok(Element::new("tc")?.with_child(props).with_child(para))
}
