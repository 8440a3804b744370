//! The [`Grid`] type: a fixed-size arena of [`SearchCell`]s.
//!
//! Cells are stored row-major in a flat `Vec`; everything outside this
//! module refers to them by arena index. START sits at `(0, 0)` and END at
//! `(rows - 1, cols - 1)` for the lifetime of the grid.

use crate::cell::{Classification, SearchCell};
use crate::error::ConfigError;
use crate::geom::Point;

/// A 2D grid of search cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<SearchCell>,
    rows: i32,
    cols: i32,
    start: usize,
    end: usize,
}

impl Grid {
    /// Create a wall-free grid with START and END in opposite corners.
    pub fn new(rows: i32, cols: i32) -> Result<Self, ConfigError> {
        if rows <= 0 || cols <= 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }
        let len = rows as usize * cols as usize;
        let mut cells = Vec::with_capacity(len);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(SearchCell::new(Point::new(row, col)));
            }
        }
        let mut grid = Self {
            cells,
            rows,
            cols,
            start: 0,
            end: len - 1,
        };
        grid.place_endpoints();
        Ok(grid)
    }

    /// Build a grid from a wall layout: one line per row, `#` for a wall and
    /// any other character for open floor. Leading and trailing whitespace
    /// on each line is indentation, not floor, and blank lines are skipped;
    /// use `.` for floor at the edges. The corners are always START and END,
    /// whatever the layout says there.
    pub fn from_ascii(layout: &str) -> Result<Self, ConfigError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        let mut grid = Self::new(rows, cols)?;
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() as i32 != cols {
                return Err(ConfigError::RaggedLayout {
                    row: row as i32,
                    expected: cols,
                    got: line.chars().count() as i32,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                if ch == '#' {
                    grid.toggle_wall(row as i32, col as i32);
                }
            }
        }
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Dimensions and coordinates
    // -----------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of cells (`rows * cols`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.row >= 0 && p.row < self.rows && p.col >= 0 && p.col < self.cols
    }

    /// Convert a `Point` to an arena index. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.cols as usize + p.col as usize)
    }

    /// Convert an arena index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.cells[idx].pos
    }

    /// Arena index of START.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Arena index of END.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    // -----------------------------------------------------------------------
    // Cell access
    // -----------------------------------------------------------------------

    #[inline]
    pub fn cell(&self, idx: usize) -> &SearchCell {
        &self.cells[idx]
    }

    #[inline]
    pub fn cell_mut(&mut self, idx: usize) -> &mut SearchCell {
        &mut self.cells[idx]
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<&SearchCell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Classification of the cell at `(row, col)`, or `None` if out of bounds.
    pub fn classification(&self, row: i32, col: i32) -> Option<Classification> {
        self.at(Point::new(row, col)).map(|c| c.class)
    }

    /// Classification of the cell at arena index `idx`.
    #[inline]
    pub fn class(&self, idx: usize) -> Classification {
        self.cells[idx].class
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, SearchCell> {
        self.cells.iter()
    }

    /// Number of cells currently classified as `class`.
    pub fn count(&self, class: Classification) -> usize {
        self.cells.iter().filter(|c| c.class == class).count()
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Append the traversable orthogonal neighbours of `idx` into `buf`, in
    /// up, down, left, right order. The caller clears `buf` before calling.
    pub fn neighbors(&self, idx: usize, buf: &mut Vec<usize>) {
        for n in self.point(idx).neighbors_4() {
            let Some(ni) = self.idx(n) else {
                continue;
            };
            if self.cells[ni].class.is_traversable() {
                buf.push(ni);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Flip EMPTY ↔ WALL at `(row, col)`. Returns whether anything changed;
    /// every other classification and out-of-bounds positions are left alone.
    pub fn toggle_wall(&mut self, row: i32, col: i32) -> bool {
        let Some(i) = self.idx(Point::new(row, col)) else {
            return false;
        };
        let cell = &mut self.cells[i];
        cell.class = match cell.class {
            Classification::Empty => Classification::Wall,
            Classification::Wall => Classification::Empty,
            _ => return false,
        };
        true
    }

    /// Reclassify `idx` as `class`. START and END are never overwritten;
    /// returns `false` when the mark was refused.
    #[inline]
    pub fn mark(&mut self, idx: usize, class: Classification) -> bool {
        let cell = &mut self.cells[idx];
        if cell.class.is_endpoint() {
            return false;
        }
        cell.class = class;
        true
    }

    /// Erase the traces of a search: metadata back to defaults and every
    /// VISITED, FRONTIER or PATH cell back to EMPTY. Walls are kept.
    pub fn clear_search(&mut self) {
        for c in &mut self.cells {
            c.clear_metadata();
            if matches!(
                c.class,
                Classification::Visited | Classification::Frontier | Classification::Path
            ) {
                c.class = Classification::Empty;
            }
        }
    }

    /// Clear every cell (walls included) and restore START and END.
    pub fn clear(&mut self) {
        for c in &mut self.cells {
            c.clear_metadata();
            c.class = Classification::Empty;
        }
        self.place_endpoints();
    }

    /// Classify the corner cells as START and END. On a 1×1 grid the single
    /// cell ends up as END.
    pub(crate) fn place_endpoints(&mut self) {
        self.cells[self.start].class = Classification::Start;
        self.cells[self.end].class = Classification::End;
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    /// Render the classification of every cell, one line per row, using
    /// [`Classification::symbol`].
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows as usize);
        for (i, c) in self.cells.iter().enumerate() {
            out.push(c.class.symbol());
            if (i + 1) % self.cols as usize == 0 {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_places_endpoints_in_corners() {
        let g = Grid::new(20, 30).unwrap();
        assert_eq!(g.cell_count(), 600);
        assert_eq!(g.classification(0, 0), Some(Classification::Start));
        assert_eq!(g.classification(19, 29), Some(Classification::End));
        assert_eq!(g.count(Classification::Start), 1);
        assert_eq!(g.count(Classification::End), 1);
        assert_eq!(g.count(Classification::Empty), 598);
    }

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 5),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 5 })
        );
        assert!(Grid::new(3, -1).is_err());
    }

    #[test]
    fn single_cell_grid_is_end() {
        let g = Grid::new(1, 1).unwrap();
        assert_eq!(g.start(), g.end());
        assert_eq!(g.classification(0, 0), Some(Classification::End));
    }

    #[test]
    fn idx_and_point_round_trip() {
        let g = Grid::new(4, 7).unwrap();
        for i in 0..g.cell_count() {
            assert_eq!(g.idx(g.point(i)), Some(i));
        }
        assert_eq!(g.idx(Point::new(4, 0)), None);
        assert_eq!(g.idx(Point::new(0, -1)), None);
    }

    #[test]
    fn out_of_bounds_queries_are_none() {
        let g = Grid::new(3, 3).unwrap();
        assert_eq!(g.classification(-1, 0), None);
        assert_eq!(g.classification(0, 3), None);
        assert!(g.at(Point::new(3, 3)).is_none());
    }

    #[test]
    fn neighbors_skip_walls_and_bounds() {
        let mut g = Grid::new(3, 3).unwrap();
        let center = g.idx(Point::new(1, 1)).unwrap();
        let mut buf = Vec::new();
        g.neighbors(center, &mut buf);
        let pts: Vec<Point> = buf.iter().map(|&i| g.point(i)).collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ]
        );

        g.toggle_wall(0, 1);
        g.toggle_wall(1, 2);
        buf.clear();
        g.neighbors(center, &mut buf);
        let pts: Vec<Point> = buf.iter().map(|&i| g.point(i)).collect();
        assert_eq!(pts, vec![Point::new(2, 1), Point::new(1, 0)]);

        buf.clear();
        g.neighbors(g.start(), &mut buf);
        assert_eq!(buf, vec![g.idx(Point::new(1, 0)).unwrap()]);
    }

    #[test]
    fn toggle_wall_only_flips_empty_and_wall() {
        let mut g = Grid::new(3, 3).unwrap();
        assert!(g.toggle_wall(1, 1));
        assert_eq!(g.classification(1, 1), Some(Classification::Wall));
        assert!(g.toggle_wall(1, 1));
        assert_eq!(g.classification(1, 1), Some(Classification::Empty));

        assert!(!g.toggle_wall(0, 0));
        assert!(!g.toggle_wall(2, 2));
        assert!(!g.toggle_wall(5, 5));

        let i = g.idx(Point::new(0, 1)).unwrap();
        g.mark(i, Classification::Visited);
        assert!(!g.toggle_wall(0, 1));
        assert_eq!(g.class(i), Classification::Visited);
    }

    #[test]
    fn mark_never_overwrites_endpoints() {
        let mut g = Grid::new(2, 2).unwrap();
        let (s, e) = (g.start(), g.end());
        assert!(!g.mark(s, Classification::Visited));
        assert!(!g.mark(e, Classification::Path));
        assert_eq!(g.class(s), Classification::Start);
        assert_eq!(g.class(e), Classification::End);
        assert!(g.mark(1, Classification::Frontier));
        assert_eq!(g.class(1), Classification::Frontier);
    }

    #[test]
    fn clear_search_keeps_walls() {
        let mut g = Grid::new(3, 3).unwrap();
        g.toggle_wall(1, 1);
        g.mark(1, Classification::Visited);
        g.mark(3, Classification::Path);
        g.mark(5, Classification::Frontier);
        g.cell_mut(1).dist = 1.0;
        g.cell_mut(1).parent = Some(0);

        g.clear_search();
        assert_eq!(g.classification(1, 1), Some(Classification::Wall));
        assert_eq!(g.count(Classification::Empty), 6);
        assert_eq!(g.cell(1).parent, None);
        assert!(g.cell(1).dist.is_infinite());
    }

    #[test]
    fn clear_removes_walls() {
        let mut g = Grid::new(3, 3).unwrap();
        g.toggle_wall(1, 1);
        g.clear();
        assert_eq!(g.count(Classification::Wall), 0);
        assert_eq!(g.classification(0, 0), Some(Classification::Start));
    }

    #[test]
    fn ascii_round_trip() {
        let layout = "\
            ..#\n\
            .##\n\
            ...\n";
        let g = Grid::from_ascii(layout).unwrap();
        assert_eq!(g.to_ascii(), "S.#\n.##\n..E\n");
    }

    #[test]
    fn ascii_layout_must_be_rectangular() {
        let err = Grid::from_ascii("...\n..\n").unwrap_err();
        assert_eq!(
            err,
            ConfigError::RaggedLayout {
                row: 1,
                expected: 3,
                got: 2
            }
        );
        assert!(Grid::from_ascii("").is_err());
    }

    #[test]
    fn ascii_lines_are_trimmed() {
        let g = Grid::from_ascii("  .#.\n  . .  \n\n  ...\r\n").unwrap();
        assert_eq!((g.rows(), g.cols()), (3, 3));
        assert_eq!(g.to_ascii(), "S#.\n...\n..E\n");

        let err = Grid::from_ascii(".#.\n .\n...\n").unwrap_err();
        assert_eq!(
            err,
            ConfigError::RaggedLayout {
                row: 1,
                expected: 3,
                got: 1
            }
        );
    }
}
