//! Retained graphic primitives and the surface they draw on.

use core::fmt::Write;

use heapless::String;

use crate::{
    error::Result,
    store::{DataField, Store, Value},
};

/// Font id of the fixed-width font every surface supports.
pub const BASIC_FONT: FontId = 0;

pub type FontId = u8;

/// Longest rendered value: `u32::MAX` in decimal.
pub const VALUE_TEXT_BYTES: usize = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    /// Lit pixel.
    White,
    /// Dark pixel.
    Black,
}

impl Color {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::White)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// Panel geometry as seen by layouts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DisplayAttributes {
    pub rows: u8,
    pub first_row: u8,
    pub last_row: u8,
    pub columns: u8,
    pub first_col: u8,
    pub last_col: u8,
    pub pages: u8,
    pub first_page: u8,
    pub last_page: u8,
}

impl DisplayAttributes {
    pub const fn new(columns: u8, rows: u8, page_height: u8) -> Self {
        let pages = rows / page_height;
        Self {
            rows,
            first_row: 0,
            last_row: rows - 1,
            columns,
            first_col: 0,
            last_col: columns - 1,
            pages,
            first_page: 0,
            last_page: pages - 1,
        }
    }
}

/// Paged monochrome drawing target.
///
/// Geometry outside the panel is a layout bug; implementations panic on it.
/// Text with an unsupported font id is silently skipped.
pub trait Surface {
    type Error;

    fn attributes(&self) -> DisplayAttributes;

    /// Cell width in columns, or `None` for an unsupported font.
    fn font_width(&self, font: FontId) -> Option<u8>;

    fn clear(&mut self);

    fn put_point(&mut self, at: Point, color: Color);

    fn put_hline(&mut self, origin: Point, len: u8, color: Color);

    fn put_vline(&mut self, origin: Point, len: u8, color: Color);

    fn put_rect(&mut self, start: Point, end: Point, color: Color, filled: bool);

    fn put_char(&mut self, c: char, page: u8, col: u8, font: FontId);

    fn put_string(&mut self, text: &str, page: u8, col: u8, font: FontId);

    /// Pushes the composed frame to the panel.
    fn render(&mut self) -> core::result::Result<(), Self::Error>;
}

/// Pixel coordinate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

impl Point {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Single lit or dark pixel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Dot {
    pub at: Point,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Line {
    pub origin: Point,
    pub length: u8,
    pub direction: Direction,
    pub color: Color,
}

/// Rectangle spanned by two inclusive corners.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rectangle {
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub filled: bool,
}

impl Rectangle {
    pub const fn outline(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            color: Color::White,
            filled: false,
        }
    }
}

/// Static text anchored to a page row and a column.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextLine {
    pub text: &'static str,
    pub page: u8,
    pub col: u8,
    pub font: FontId,
}

impl TextLine {
    pub const fn new(text: &'static str, page: u8, col: u8, font: FontId) -> Self {
        Self {
            text,
            page,
            col,
            font,
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.put_string(self.text, self.page, self.col, self.font);
    }
}

/// Text showing the cached value of a store field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DataLine {
    field: DataField,
    page: u8,
    col: u8,
    font: FontId,
    value: Option<Value>,
}

impl DataLine {
    pub const fn new(field: DataField, page: u8, col: u8, font: FontId) -> Self {
        Self {
            field,
            page,
            col,
            font,
            value: None,
        }
    }

    pub fn field(&self) -> DataField {
        self.field
    }

    pub fn value(&self) -> Option<Value> {
        self.value
    }

    /// Pulls the current value of the bound field.
    pub fn refresh(&mut self, store: &Store) -> Result<()> {
        self.value = Some(pull(self.field, self.value, store)?);
        Ok(())
    }

    /// Draws the cached value; nothing is drawn before the first refresh.
    pub fn draw<S: Surface>(&self, surface: &mut S) {
        if let Some(value) = self.value {
            surface.put_string(&value_text(value), self.page, self.col, self.font);
        }
    }
}

/// Reads `field` and checks it still carries the cached tag.
pub(crate) fn pull(field: DataField, cached: Option<Value>, store: &Store) -> Result<Value> {
    let fresh = store.read(field)?;
    if let Some(cached) = cached
        && cached.kind() != fresh.kind()
    {
        return Err(crate::Error::TypeMismatch {
            expected: cached.kind(),
            found: fresh.kind(),
        });
    }
    Ok(fresh)
}

/// Decimal text of a number, `YES`/`NO` for a flag.
pub fn value_text(value: Value) -> String<VALUE_TEXT_BYTES> {
    let mut text = String::new();
    // Every value fits the buffer.
    let _ = write!(text, "{value}");
    text
}

/// Left column that centers `text` on a panel `columns` wide.
pub fn centered_column(text: &str, columns: u8, cell: Option<u8>) -> u8 {
    let Some(cell) = cell else {
        return 0;
    };
    let width = text.chars().count().saturating_mul(cell as usize);
    ((columns as usize).saturating_sub(width) / 2) as u8
}

/// Drawable element of a page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Graphic {
    Point(Dot),
    Line(Line),
    Rectangle(Rectangle),
    Text(TextLine),
    Data(DataLine),
}

impl Graphic {
    /// Re-reads data-bound content; static shapes are untouched.
    pub fn refresh(&mut self, store: &Store) -> Result<()> {
        match self {
            Self::Data(line) => line.refresh(store),
            Self::Point(_) | Self::Line(_) | Self::Rectangle(_) | Self::Text(_) => Ok(()),
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        match self {
            Self::Point(dot) => surface.put_point(dot.at, dot.color),
            Self::Line(line) => match line.direction {
                Direction::Horizontal => surface.put_hline(line.origin, line.length, line.color),
                Direction::Vertical => surface.put_vline(line.origin, line.length, line.color),
            },
            Self::Rectangle(rect) => surface.put_rect(rect.start, rect.end, rect.color, rect.filled),
            Self::Text(text) => text.draw(surface),
            Self::Data(line) => line.draw(surface),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, store::ValueKind, testing::CellSurface};

    fn store() -> Store {
        let mut store = Store::new();
        store.initialize().unwrap();
        store
    }

    #[test]
    fn data_line_draws_after_refresh_only() {
        let mut store = store();
        let mut surface = CellSurface::new();
        let mut line = Graphic::Data(DataLine::new(DataField::TargetSteps, 2, 12, BASIC_FONT));

        line.draw(&mut surface);
        assert_eq!(surface.line(2), "");

        line.refresh(&store).unwrap();
        line.draw(&mut surface);
        assert_eq!(surface.line(2), "1000");

        store.write(DataField::TargetSteps, Value::U32(4_500)).unwrap();
        line.draw(&mut surface);
        assert_eq!(surface.line(2), "1000");

        line.refresh(&store).unwrap();
        line.draw(&mut surface);
        assert_eq!(surface.line(2), "4500");
    }

    #[test]
    fn flag_renders_yes_no() {
        let mut store = store();
        let mut line = DataLine::new(DataField::GoalAlert, 0, 0, BASIC_FONT);

        line.refresh(&store).unwrap();
        assert_eq!(value_text(line.value().unwrap()), "NO");

        store.write(DataField::GoalAlert, Value::Bool(true)).unwrap();
        line.refresh(&store).unwrap();
        assert_eq!(value_text(line.value().unwrap()), "YES");
    }

    #[test]
    fn refresh_rejects_tag_change() {
        let store = store();
        let mut line = DataLine::new(DataField::Hours, 0, 0, BASIC_FONT);
        line.value = Some(Value::Bool(true));

        assert_eq!(
            line.refresh(&store),
            Err(Error::TypeMismatch {
                expected: ValueKind::Bool,
                found: ValueKind::U8,
            })
        );
    }

    #[test]
    fn refresh_of_unknown_field_fails() {
        let store = Store::new();
        let mut line = DataLine::new(DataField::Steps, 0, 0, BASIC_FONT);

        assert_eq!(
            line.refresh(&store),
            Err(Error::UnknownField(DataField::Steps))
        );
    }

    #[test]
    fn shapes_composite_in_order() {
        let mut surface = CellSurface::new();
        let shapes = [
            Graphic::Rectangle(Rectangle {
                start: Point::new(0, 0),
                end: Point::new(9, 9),
                color: Color::White,
                filled: true,
            }),
            Graphic::Point(Dot {
                at: Point::new(4, 4),
                color: Color::Black,
            }),
            Graphic::Line(Line {
                origin: Point::new(20, 0),
                length: 5,
                direction: Direction::Vertical,
                color: Color::White,
            }),
        ];
        for shape in &shapes {
            shape.draw(&mut surface);
        }

        assert!(surface.pixel(9, 9));
        assert!(!surface.pixel(4, 4));
        assert!(surface.pixel(20, 4));
        assert!(!surface.pixel(20, 5));
    }

    #[test]
    fn unsupported_font_draws_nothing() {
        let mut surface = CellSurface::new();
        TextLine::new("HIDDEN", 3, 0, 7).draw(&mut surface);

        assert_eq!(surface.line(3), "");
    }

    #[test]
    fn centering_uses_cell_width() {
        assert_eq!(centered_column("PEDOMETER", 128, Some(6)), 37);
        assert_eq!(centered_column("CONFIG", 128, Some(6)), 46);
        assert_eq!(centered_column("CONFIG", 128, None), 0);
    }
}
