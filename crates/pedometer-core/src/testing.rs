//! Text-level surface used by the unit tests.

use std::string::String;

use crate::graphics::{BASIC_FONT, Color, DisplayAttributes, FontId, Point, Surface};

const COLUMNS: usize = 128;
const ROWS: usize = 64;
const PAGES: usize = 8;
const CELL: usize = 6;

/// Records glyphs per column and pixels per coordinate.
pub struct CellSurface {
    chars: [[Option<char>; COLUMNS]; PAGES],
    pixels: [[bool; COLUMNS]; ROWS],
    renders: usize,
    fail_render: bool,
}

impl CellSurface {
    pub fn new() -> Self {
        Self {
            chars: [[None; COLUMNS]; PAGES],
            pixels: [[false; COLUMNS]; ROWS],
            renders: 0,
            fail_render: false,
        }
    }

    /// Text of one page row. Gaps wider than a cell read as one space.
    pub fn line(&self, page: u8) -> String {
        let mut text = String::new();
        let mut last_col: Option<usize> = None;
        for (col, c) in self.chars[page as usize].iter().enumerate() {
            let Some(c) = c else {
                continue;
            };
            if last_col.is_some_and(|last| col - last > CELL) {
                text.push(' ');
            }
            text.push(*c);
            last_col = Some(col);
        }
        text.trim().to_string()
    }

    pub fn pixel(&self, x: u8, y: u8) -> bool {
        self.pixels[y as usize][x as usize]
    }

    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn fail_render(&mut self) {
        self.fail_render = true;
    }

    fn set(&mut self, x: usize, y: usize, color: Color) {
        assert!(x < COLUMNS && y < ROWS, "({x}, {y}) is off-panel");
        self.pixels[y][x] = color.is_on();
    }
}

impl Surface for CellSurface {
    type Error = &'static str;

    fn attributes(&self) -> DisplayAttributes {
        DisplayAttributes::new(COLUMNS as u8, ROWS as u8, (ROWS / PAGES) as u8)
    }

    fn font_width(&self, font: FontId) -> Option<u8> {
        (font == BASIC_FONT).then_some(CELL as u8)
    }

    fn clear(&mut self) {
        *self = Self {
            renders: self.renders,
            fail_render: self.fail_render,
            ..Self::new()
        };
    }

    fn put_point(&mut self, at: Point, color: Color) {
        self.set(at.x as usize, at.y as usize, color);
    }

    fn put_hline(&mut self, origin: Point, len: u8, color: Color) {
        for x in origin.x as usize..origin.x as usize + len as usize {
            self.set(x, origin.y as usize, color);
        }
    }

    fn put_vline(&mut self, origin: Point, len: u8, color: Color) {
        for y in origin.y as usize..origin.y as usize + len as usize {
            self.set(origin.x as usize, y, color);
        }
    }

    fn put_rect(&mut self, start: Point, end: Point, color: Color, filled: bool) {
        let (x0, x1) = (start.x.min(end.x) as usize, start.x.max(end.x) as usize);
        let (y0, y1) = (start.y.min(end.y) as usize, start.y.max(end.y) as usize);
        for y in y0..=y1 {
            for x in x0..=x1 {
                if filled || x == x0 || x == x1 || y == y0 || y == y1 {
                    self.set(x, y, color);
                }
            }
        }
    }

    fn put_char(&mut self, c: char, page: u8, col: u8, font: FontId) {
        if font != BASIC_FONT {
            return;
        }
        let (page, col) = (page as usize, col as usize);
        assert!(page < PAGES && col + CELL <= COLUMNS, "char at {page}/{col} is off-panel");

        let row = &mut self.chars[page];
        for slot in &mut row[col.saturating_sub(CELL - 1)..col + CELL] {
            *slot = None;
        }
        row[col] = Some(c);
    }

    fn put_string(&mut self, text: &str, page: u8, col: u8, font: FontId) {
        if font != BASIC_FONT {
            return;
        }
        for (i, c) in text.chars().enumerate() {
            self.put_char(c, page, col + (i * CELL) as u8, font);
        }
    }

    fn render(&mut self) -> Result<(), Self::Error> {
        if self.fail_render {
            return Err("flush failed");
        }
        self.renders += 1;
        Ok(())
    }
}
