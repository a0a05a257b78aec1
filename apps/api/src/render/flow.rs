//! Flow layout: places a sequence of blocks onto pages.
//!
//! Blocks are laid out top to bottom inside the page frame. Paragraphs and list
//! items break between lines, banner and grid rows move whole to the next page.
//! A banner or grid row taller than an entire frame is continued across pages,
//! its box redrawn on each. Every finished page gets a centered `Page N` footer.
//!
//! Coordinates in the output are PDF user space: origin bottom-left, points.

use crate::render::font_metrics::{get_metrics, FontFace};
use crate::render::theme::{palette, Align, Color, PageGeometry, Stroke, TextStyle, FOOTER_SIZE};

/// Horizontal offset of a list bullet from the frame edge.
const BULLET_OFFSET: f32 = 4.0;
const BULLET_GLYPH: &str = "\u{2022}";
/// Breathing room above and below a horizontal rule.
const RULE_SPACING: f32 = 1.0;

// ────────────────────────────────────────────────────────────────────────────
// Output model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        /// Baseline.
        y: f32,
        text: String,
        face: FontFace,
        size: f32,
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A fully laid-out document, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text runs in reading order, footers included.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::texts)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Input model
// ────────────────────────────────────────────────────────────────────────────

/// Centered colored box holding one or more text rows (document title).
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub rows: Vec<(String, TextStyle)>,
    pub width: f32,
    /// Applied above and below every row.
    pub padding: f32,
    pub background: Color,
    pub border: Stroke,
}

/// Fixed-width table of text cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<String>>,
    pub col_width: f32,
    pub style: TextStyle,
    pub padding: f32,
    pub fill: Color,
    pub lines: Stroke,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph { text: String, style: TextStyle },
    Spacer(f32),
    Rule(Stroke),
    Banner(Banner),
    Grid(Grid),
    BulletList {
        items: Vec<String>,
        style: TextStyle,
        bullet_color: Color,
    },
}

impl Block {
    pub fn paragraph(text: impl Into<String>, style: TextStyle) -> Self {
        Block::Paragraph {
            text: text.into(),
            style,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout engine
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `blocks` into pages. Always yields at least one page.
pub fn layout(geometry: PageGeometry, blocks: &[Block]) -> RenderedDocument {
    let mut flow = FlowLayout::new(geometry);
    for block in blocks {
        flow.push(block);
    }
    flow.finish()
}

struct FlowLayout {
    geometry: PageGeometry,
    pages: Vec<Page>,
    ops: Vec<DrawOp>,
    /// Top of the remaining free space on the current page.
    cursor: f32,
}

impl FlowLayout {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor: geometry.frame_top(),
        }
    }

    fn at_top(&self) -> bool {
        self.cursor >= self.geometry.frame_top() - 0.01
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.geometry.frame_bottom()
    }

    fn page_break(&mut self) {
        let number = self.pages.len() + 1;
        let footer = format!("Page {number}");
        let width = get_metrics(FontFace::Regular).width_pt(&footer, FOOTER_SIZE);
        self.ops.push(DrawOp::Text {
            x: (self.geometry.width - width) / 2.0,
            y: self.geometry.footer_baseline,
            text: footer,
            face: FontFace::Regular,
            size: FOOTER_SIZE,
            color: palette::FOOTER,
        });
        self.pages.push(Page {
            number,
            ops: std::mem::take(&mut self.ops),
        });
        self.cursor = self.geometry.frame_top();
    }

    /// Starts a new page unless `height` fits or the page is still empty.
    fn reserve(&mut self, height: f32) {
        if height > self.remaining() + 0.01 && !self.at_top() {
            self.page_break();
        }
    }

    /// Vertical whitespace. Dropped at the top of a page.
    fn gap(&mut self, height: f32) {
        if height <= 0.0 || self.at_top() {
            return;
        }
        self.cursor = (self.cursor - height).max(self.geometry.frame_bottom());
    }

    fn push(&mut self, block: &Block) {
        match block {
            Block::Paragraph { text, style } => self.paragraph(text, style),
            Block::Spacer(height) => self.gap(*height),
            Block::Rule(stroke) => self.rule(stroke),
            Block::Banner(banner) => self.banner(banner),
            Block::Grid(grid) => self.grid(grid),
            Block::BulletList {
                items,
                style,
                bullet_color,
            } => self.bullet_list(items, style, *bullet_color),
        }
    }

    fn finish(mut self) -> RenderedDocument {
        self.page_break();
        RenderedDocument {
            geometry: self.geometry,
            pages: self.pages,
        }
    }

    fn baseline(top: f32, style: &TextStyle) -> f32 {
        top - style.leading / 2.0 - 0.25 * style.size
    }

    fn text_run(&mut self, x: f32, y: f32, text: &str, style: &TextStyle, color: Color) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            face: style.face,
            size: style.size,
            color,
        });
    }

    /// Places one wrapped line at the cursor, breaking the page first if needed.
    fn line(&mut self, line: &str, style: &TextStyle, x0: f32, avail: f32) {
        self.reserve(style.leading);
        let x = match style.align {
            Align::Left => x0,
            Align::Center => {
                let width = get_metrics(style.face).width_pt(line, style.size);
                x0 + (avail - width) / 2.0
            }
        };
        let y = Self::baseline(self.cursor, style);
        self.text_run(x, y, line, style, style.color);
        self.cursor -= style.leading;
    }

    fn paragraph(&mut self, text: &str, style: &TextStyle) {
        let x0 = self.geometry.margin + style.left_indent;
        let avail = self.geometry.frame_width() - style.left_indent;
        let lines = get_metrics(style.face).wrap_lines(text, style.size, avail);
        if lines.is_empty() {
            return;
        }
        self.gap(style.space_before);
        for line in &lines {
            self.line(line, style, x0, avail);
        }
        self.gap(style.space_after);
    }

    fn rule(&mut self, stroke: &Stroke) {
        self.reserve(stroke.width + 2.0 * RULE_SPACING);
        self.gap(RULE_SPACING);
        let y = self.cursor - stroke.width / 2.0;
        let left = self.geometry.margin;
        self.ops.push(DrawOp::Line {
            from: (left, y),
            to: (left + self.geometry.frame_width(), y),
            stroke: *stroke,
        });
        self.cursor -= stroke.width;
        self.gap(RULE_SPACING);
    }

    fn bullet_list(&mut self, items: &[String], style: &TextStyle, bullet_color: Color) {
        let bullet_x = self.geometry.margin + BULLET_OFFSET;
        let x0 = bullet_x + style.left_indent;
        let avail = self.geometry.frame_width() - BULLET_OFFSET - style.left_indent;
        let metrics = get_metrics(style.face);

        for item in items {
            let lines = metrics.wrap_lines(item, style.size, avail);
            let Some((first, rest)) = lines.split_first() else {
                continue;
            };
            self.reserve(style.leading);
            let y = Self::baseline(self.cursor, style);
            self.text_run(bullet_x, y, BULLET_GLYPH, style, bullet_color);
            self.text_run(x0, y, first, style, style.color);
            self.cursor -= style.leading;

            for line in rest {
                self.line(line, style, x0, avail);
            }
            self.gap(style.space_after);
        }
    }

    fn banner(&mut self, banner: &Banner) {
        let inner = banner.width - 2.0 * banner.padding;
        // Padding slots carry no text; line slots carry one wrapped line.
        let mut slots: Vec<(Option<(String, &TextStyle)>, f32)> = Vec::new();
        for (text, style) in &banner.rows {
            slots.push((None, banner.padding));
            for line in get_metrics(style.face).wrap_lines(text, style.size, inner) {
                slots.push((Some((line, style)), style.leading));
            }
            slots.push((None, banner.padding));
        }
        let x = self.geometry.margin + (self.geometry.frame_width() - banner.width) / 2.0;

        // Whole banner if it fits on one frame, otherwise one box per page.
        let mut rest = slots.as_slice();
        while !rest.is_empty() {
            let height: f32 = rest.iter().map(|(_, h)| h).sum();
            self.reserve(height);

            let mut take = 0;
            let mut used = 0.0_f32;
            for &(_, h) in rest {
                if take > 0 && used + h > self.remaining() + 0.01 {
                    break;
                }
                used += h;
                take += 1;
            }
            let (chunk, tail) = rest.split_at(take);

            self.ops.push(DrawOp::Rect {
                x,
                y: self.cursor - used,
                width: banner.width,
                height: used,
                fill: Some(banner.background),
                stroke: Some(banner.border),
            });
            let mut top = self.cursor;
            for (slot, h) in chunk {
                if let Some((line, style)) = slot {
                    let width = get_metrics(style.face).width_pt(line, style.size);
                    let line_x = match style.align {
                        Align::Left => x + banner.padding,
                        Align::Center => x + (banner.width - width) / 2.0,
                    };
                    self.text_run(line_x, Self::baseline(top, style), line, style, style.color);
                }
                top -= *h;
            }
            self.cursor -= used;

            rest = tail;
            if !rest.is_empty() {
                self.page_break();
            }
        }
    }

    fn grid(&mut self, grid: &Grid) {
        let style = &grid.style;
        let metrics = get_metrics(style.face);
        let inner = grid.col_width - 2.0 * grid.padding;

        for row in &grid.rows {
            let cells: Vec<Vec<String>> = row
                .iter()
                .map(|cell| metrics.wrap_lines(cell, style.size, inner))
                .collect();
            let max_lines = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);

            // A row moves whole when it fits on a fresh page. A taller row is
            // continued on following pages, with the cell boxes redrawn.
            let mut offset = 0;
            loop {
                let pending = max_lines - offset;
                self.reserve(pending as f32 * style.leading + 2.0 * grid.padding);
                let fit = ((self.remaining() - 2.0 * grid.padding) / style.leading + 1e-4)
                    .floor()
                    .max(1.0) as usize;
                let take = pending.min(fit);
                let slice_height = take as f32 * style.leading + 2.0 * grid.padding;
                let row_bottom = self.cursor - slice_height;

                for (col, lines) in cells.iter().enumerate() {
                    let cell_x = self.geometry.margin + col as f32 * grid.col_width;
                    self.ops.push(DrawOp::Rect {
                        x: cell_x,
                        y: row_bottom,
                        width: grid.col_width,
                        height: slice_height,
                        fill: Some(grid.fill),
                        stroke: Some(grid.lines),
                    });

                    let start = offset.min(lines.len());
                    let end = (offset + take).min(lines.len());
                    let slice = &lines[start..end];
                    let text_height = slice.len() as f32 * style.leading;
                    let mut top = self.cursor - (slice_height - text_height) / 2.0;
                    for line in slice {
                        let line_x = match style.align {
                            Align::Left => cell_x + grid.padding,
                            Align::Center => {
                                cell_x + (grid.col_width - metrics.width_pt(line, style.size)) / 2.0
                            }
                        };
                        self.text_run(line_x, Self::baseline(top, style), line, style, style.color);
                        top -= style.leading;
                    }
                }
                self.cursor = row_bottom;

                offset += take;
                if offset >= max_lines {
                    break;
                }
                self.page_break();
            }
        }
    }
}
