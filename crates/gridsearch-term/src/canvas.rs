//! An owned character buffer ([`Canvas`]) and the diff ([`Frame`]) that a
//! driver flushes to the screen.
//!
//! Canvas positions use [`Point`] with `row` as the terminal line and `col`
//! as the column, the same orientation as the search grid.

use gridsearch_core::Point;

use crate::style::Style;

/// A styled character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    pub ch: char,
    pub style: Style,
}

impl Glyph {
    #[inline]
    pub const fn new(ch: char, style: Style) -> Self {
        Self { ch, style }
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self::new(' ', Style::default())
    }
}

/// A fixed-size, row-major grid of glyphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    glyphs: Vec<Glyph>,
    rows: i32,
    cols: i32,
}

impl Canvas {
    /// A blank canvas. Negative sizes are treated as zero.
    pub fn new(rows: i32, cols: i32) -> Self {
        let (rows, cols) = (rows.max(0), cols.max(0));
        Self {
            glyphs: vec![Glyph::default(); rows as usize * cols as usize],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.cols {
            Some((p.row * self.cols + p.col) as usize)
        } else {
            None
        }
    }

    /// The glyph at `p`; blank outside the canvas.
    pub fn at(&self, p: Point) -> Glyph {
        self.index(p).map(|i| self.glyphs[i]).unwrap_or_default()
    }

    /// Set the glyph at `p`. Ignored outside the canvas.
    pub fn set(&mut self, p: Point, glyph: Glyph) {
        if let Some(i) = self.index(p) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Write `text` on one line starting at `p`, clipped at the right edge.
    /// Returns the column after the last character written.
    pub fn print(&mut self, p: Point, text: &str, style: Style) -> i32 {
        let mut col = p.col;
        for ch in text.chars() {
            if col >= self.cols {
                break;
            }
            self.set(Point::new(p.row, col), Glyph::new(ch, style));
            col += 1;
        }
        col
    }

    /// The cells of `self` that differ from `prev`. A canvas of another size
    /// is diffed as if it were blank.
    pub fn diff(&self, prev: &Canvas) -> Frame {
        let same_size = prev.rows == self.rows && prev.cols == self.cols;
        let mut cells = Vec::new();
        for (i, &glyph) in self.glyphs.iter().enumerate() {
            let before = if same_size {
                prev.glyphs[i]
            } else {
                Glyph::default()
            };
            if glyph != before {
                let (row, col) = (i as i32 / self.cols, i as i32 % self.cols);
                cells.push(FrameCell {
                    pos: Point::new(row, col),
                    glyph,
                });
            }
        }
        Frame { cells }
    }

    /// Make `self` an exact copy of `src`, reusing the allocation.
    pub fn copy_from(&mut self, src: &Canvas) {
        self.clone_from(src);
    }
}

/// One glyph that changed between two canvases.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub pos: Point,
    pub glyph: Glyph,
}

/// The changes between two canvases, in row-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
}

impl Frame {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
