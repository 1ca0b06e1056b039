//! In-memory framebuffer for SH1106.

use crate::{
    font::{self, BASIC_FONT_COLS, BASIC_FONT_ID},
    protocol::{HEIGHT, PAGE_HEIGHT, PAGES, WIDTH},
};

/// 1bpp paged framebuffer for the panel.
///
/// One byte covers eight vertical pixels of a page; bit 0 is the top row.
/// Drawing outside the panel is a layout bug and panics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Creates a new blank framebuffer.
    pub const fn new() -> Self {
        Self {
            pages: [[0u8; WIDTH]; PAGES],
        }
    }

    /// Returns all page payloads.
    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }

    /// Returns one page payload, or `None` for an invalid page.
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        self.pages.get(page)
    }

    /// Clears the framebuffer to dark (`on = false`) or lit (`on = true`).
    pub fn clear(&mut self, on: bool) {
        let fill = if on { 0xFF } else { 0x00 };
        for page in self.pages.iter_mut() {
            page.fill(fill);
        }
    }

    /// Sets a pixel state.
    ///
    /// Returns `true` when the pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        let mask = 1u8 << (y % PAGE_HEIGHT);
        let byte = &mut self.pages[y / PAGE_HEIGHT][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }

        true
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        let mask = 1u8 << (y % PAGE_HEIGHT);
        Some(self.pages[y / PAGE_HEIGHT][x] & mask != 0)
    }

    /// Draws one pixel.
    pub fn put_point(&mut self, x: usize, y: usize, on: bool) {
        assert!(self.set_pixel(x, y, on), "point ({x}, {y}) is off-panel");
    }

    /// Draws a horizontal line of `len` pixels starting at `(x, y)`.
    pub fn put_hline(&mut self, x: usize, y: usize, len: usize, on: bool) {
        assert!(
            len > 0 && x + len <= WIDTH && y < HEIGHT,
            "hline at ({x}, {y}) len {len} is off-panel"
        );
        for col in x..x + len {
            self.set_pixel(col, y, on);
        }
    }

    /// Draws a vertical line of `len` pixels starting at `(x, y)`.
    pub fn put_vline(&mut self, x: usize, y: usize, len: usize, on: bool) {
        assert!(
            len > 0 && x < WIDTH && y + len <= HEIGHT,
            "vline at ({x}, {y}) len {len} is off-panel"
        );
        for row in y..y + len {
            self.set_pixel(x, row, on);
        }
    }

    /// Draws the rectangle spanned by two inclusive corners.
    pub fn put_rect(&mut self, start: (usize, usize), end: (usize, usize), on: bool, filled: bool) {
        let (x0, x1) = (start.0.min(end.0), start.0.max(end.0));
        let (y0, y1) = (start.1.min(end.1), start.1.max(end.1));
        assert!(x1 < WIDTH && y1 < HEIGHT, "rect to ({x1}, {y1}) is off-panel");

        let width = x1 - x0 + 1;
        let height = y1 - y0 + 1;
        if filled {
            for row in y0..=y1 {
                self.put_hline(x0, row, width, on);
            }
        } else {
            self.put_hline(x0, y0, width, on);
            self.put_hline(x0, y1, width, on);
            self.put_vline(x0, y0, height, on);
            self.put_vline(x1, y0, height, on);
        }
    }

    /// Writes one glyph cell at a page and column, replacing what was there.
    ///
    /// Unsupported font ids are ignored.
    pub fn put_char(&mut self, c: char, page: usize, col: usize, font_id: u8) {
        if font_id != BASIC_FONT_ID {
            return;
        }
        assert!(page < PAGES, "page {page} is off-panel");
        assert!(col + BASIC_FONT_COLS <= WIDTH, "char at column {col} is off-panel");

        self.pages[page][col..col + BASIC_FONT_COLS].copy_from_slice(&font::basic_cell(c));
    }

    /// Writes a string of glyph cells starting at a page and column.
    ///
    /// Unsupported font ids are ignored.
    pub fn put_string(&mut self, text: &str, page: usize, col: usize, font_id: u8) {
        let Some(cell) = font::font_width(font_id) else {
            return;
        };
        let len = text.chars().count();
        assert!(page < PAGES, "page {page} is off-panel");
        assert!(col + len * cell <= WIDTH, "text {text:?} at column {col} is off-panel");

        for (i, c) in text.chars().enumerate() {
            self.put_char(c, page, col + i * cell, font_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_bit_mapping_is_top_row_lsb() {
        let mut fb = FrameBuffer::new();

        assert!(fb.set_pixel(0, 0, true));
        assert!(fb.set_pixel(0, 7, true));
        assert!(fb.set_pixel(1, 9, true));

        assert_eq!(fb.page(0).unwrap()[0], 0b1000_0001);
        assert_eq!(fb.page(1).unwrap()[1], 0b0000_0010);
    }

    #[test]
    fn out_of_bounds_pixel_is_rejected() {
        let mut fb = FrameBuffer::new();

        assert!(!fb.set_pixel(WIDTH, 0, true));
        assert!(!fb.set_pixel(0, HEIGHT, true));
        assert_eq!(fb.pixel(WIDTH, HEIGHT), None);
    }

    #[test]
    #[should_panic]
    fn off_panel_point_panics() {
        FrameBuffer::new().put_point(WIDTH, 0, true);
    }

    #[test]
    fn outline_rect_leaves_interior_dark() {
        let mut fb = FrameBuffer::new();
        fb.put_rect((2, 2), (125, 61), true, false);

        assert_eq!(fb.pixel(2, 2), Some(true));
        assert_eq!(fb.pixel(125, 61), Some(true));
        assert_eq!(fb.pixel(60, 2), Some(true));
        assert_eq!(fb.pixel(2, 40), Some(true));
        assert_eq!(fb.pixel(60, 30), Some(false));
        assert_eq!(fb.pixel(1, 1), Some(false));
    }

    #[test]
    fn filled_rect_covers_interior() {
        let mut fb = FrameBuffer::new();
        fb.put_rect((10, 10), (4, 4), true, true);

        assert_eq!(fb.pixel(7, 7), Some(true));
        assert_eq!(fb.pixel(11, 7), Some(false));
    }

    #[test]
    fn char_overwrites_existing_cell() {
        let mut fb = FrameBuffer::new();
        fb.put_rect((0, 0), (20, 7), true, true);
        fb.put_char(' ', 0, 6, BASIC_FONT_ID);

        assert_eq!(&fb.page(0).unwrap()[6..12], &[0u8; 6]);
        assert_eq!(fb.page(0).unwrap()[5], 0xFF);
    }

    #[test]
    fn string_with_unknown_font_is_ignored() {
        let mut fb = FrameBuffer::new();
        fb.put_string("HELLO", 2, 0, 9);

        assert!(fb.pages().iter().all(|page| page.iter().all(|b| *b == 0)));
    }

    #[test]
    fn string_places_cells_side_by_side() {
        let mut fb = FrameBuffer::new();
        fb.put_string("AB", 3, 12, BASIC_FONT_ID);

        let page = fb.page(3).unwrap();
        assert_eq!(&page[12..18], &font::basic_cell('A'));
        assert_eq!(&page[18..24], &font::basic_cell('B'));
    }

    #[test]
    #[should_panic]
    fn string_past_right_edge_panics() {
        FrameBuffer::new().put_string("PEDOMETER", 0, 100, BASIC_FONT_ID);
    }
}
