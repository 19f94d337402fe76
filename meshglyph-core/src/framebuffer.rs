/// Glyph and depth grids the rasterizer draws into
use std::fmt;

use crate::projection::screen_aspect;

/// Glyph of a cell nothing was drawn to
pub const BLANK_GLYPH: char = ' ';

/// Depth of an empty cell.
///
/// Cells store inverse depth, so larger values are nearer and anything drawn
/// in front of the near plane beats this.
pub const FAR_DEPTH: f32 = 0.0;

/// Largest number of cells a resize may ask for
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    aspect: f32,
    glyphs: Vec<char>,
    depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            aspect: screen_aspect(width, height),
            glyphs: vec![BLANK_GLYPH; size],
            depth: vec![FAR_DEPTH; size],
        }
    }

    /// Reset every cell to blank and far
    pub fn clear(&mut self) {
        self.glyphs.fill(BLANK_GLYPH);
        self.depth.fill(FAR_DEPTH);
    }

    /// Reallocate both grids at a new size.
    ///
    /// Non-positive sizes and sizes above [`MAX_CELLS`] are ignored and leave
    /// the buffer as it was; returns whether the buffer was replaced.
    pub fn resize(&mut self, width: i64, height: i64) -> bool {
        let (Ok(width), Ok(height)) = (usize::try_from(width), usize::try_from(height)) else {
            log::debug!("ignoring resize to {width}x{height}");
            return false;
        };
        let cells = width.checked_mul(height).unwrap_or(usize::MAX);
        if cells == 0 || cells > MAX_CELLS {
            log::debug!("ignoring resize to {width}x{height}");
            return false;
        }

        *self = Self::new(width, height);
        true
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Aspect correction of the character grid
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        self.index(x, y).map(|index| self.glyphs[index])
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        self.index(x, y).map(|index| self.depth[index])
    }

    /// Row-major glyph cells
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// One row of glyphs, `None` below the last row
    pub fn row(&self, y: usize) -> Option<&[char]> {
        let start = self.index(0, y)?;
        Some(&self.glyphs[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        // chunks() panics on zero, and an empty grid has no rows anyway
        self.glyphs.chunks(self.width.max(1))
    }

    /// Number of cells holding something other than a blank
    pub fn covered(&self) -> usize {
        self.glyphs.iter().filter(|&&c| c != BLANK_GLYPH).count()
    }

    /// Write `glyph` if `depth` is strictly nearer than what the cell holds
    pub fn test_and_set(&mut self, x: usize, y: usize, depth: f32, glyph: char) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        if self.depth[index] < depth {
            self.depth[index] = depth;
            self.glyphs[index] = glyph;
            true
        } else {
            false
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_blank() {
        let buffer = FrameBuffer::new(80, 24);
        assert_eq!(buffer.glyphs().len(), 80 * 24);
        assert_eq!(buffer.covered(), 0);
        assert_eq!(buffer.depth(79, 23), Some(FAR_DEPTH));
        assert_eq!(buffer.glyph(80, 0), None);
    }

    #[test]
    fn test_depth_test_keeps_nearer() {
        let mut buffer = FrameBuffer::new(4, 4);
        assert!(buffer.test_and_set(1, 2, 0.5, '#'));
        assert!(!buffer.test_and_set(1, 2, 0.25, '!'));
        assert_eq!(buffer.glyph(1, 2), Some('#'));
        assert!(buffer.test_and_set(1, 2, 0.75, '!'));
        assert_eq!(buffer.glyph(1, 2), Some('!'));
    }

    #[test]
    fn test_tie_keeps_first_writer() {
        let mut buffer = FrameBuffer::new(4, 4);
        assert!(buffer.test_and_set(0, 0, 0.5, 'a'));
        assert!(!buffer.test_and_set(0, 0, 0.5, 'b'));
        assert_eq!(buffer.glyph(0, 0), Some('a'));
    }

    #[test]
    fn test_clear() {
        let mut buffer = FrameBuffer::new(3, 2);
        buffer.test_and_set(2, 1, 1.0, 'x');
        buffer.clear();
        assert_eq!(buffer, FrameBuffer::new(3, 2));
    }

    #[test]
    fn test_resize() {
        let mut buffer = FrameBuffer::new(80, 24);
        assert!(buffer.resize(100, 30));
        assert_eq!((buffer.width(), buffer.height()), (100, 30));
        assert!((buffer.aspect() - 100.0 / 30.0 * 0.5).abs() < 1e-6);
        assert_eq!(buffer.glyphs().len(), 3000);
    }

    #[test]
    fn test_invalid_resize_ignored() {
        let mut buffer = FrameBuffer::new(80, 24);
        buffer.test_and_set(5, 5, 1.0, '#');
        let before = buffer.clone();
        assert!(!buffer.resize(0, 24));
        assert!(!buffer.resize(80, -3));
        assert!(!buffer.resize(-1, -1));
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_oversized_resize_ignored() {
        let mut buffer = FrameBuffer::new(80, 24);
        let before = buffer.clone();
        assert!(!buffer.resize(4_294_967_296, 4_294_967_296));
        assert!(!buffer.resize(i64::MAX, 2));
        assert!(!buffer.resize(MAX_CELLS as i64 + 1, 1));
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_display_rows() {
        let mut buffer = FrameBuffer::new(3, 2);
        buffer.test_and_set(0, 0, 1.0, 'a');
        buffer.test_and_set(2, 1, 1.0, 'b');
        assert_eq!(buffer.to_string(), "a  \n  b\n");
        assert_eq!(buffer.row(1), Some(&[' ', ' ', 'b'][..]));
        assert_eq!(buffer.row(2), None);
    }
}
