use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use sh1106::{
    FrameBuffer,
    font::BASIC_FONT_ID,
    protocol::{HEIGHT, WIDTH},
};

const SPLASH_TEXT: &str = "PEDOMETER";
const SPLASH_PAGE: usize = 4;
const SPLASH_COL: usize = 10;

/// Boot screen shown while the rest of the system comes up.
pub fn splash_frame() -> FrameBuffer {
    let mut frame = FrameBuffer::new();

    let border = Rectangle::new(Point::zero(), Size::new(WIDTH as u32, HEIGHT as u32))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1));
    // FrameBuffer clips, drawing cannot fail.
    let _ = border.draw(&mut frame);

    frame.put_string(SPLASH_TEXT, SPLASH_PAGE, SPLASH_COL, BASIC_FONT_ID);
    frame
}

#[cfg(test)]
mod tests {
    use sh1106::font;

    use super::*;

    #[test]
    fn splash_has_border_and_title() {
        let frame = splash_frame();
        let page = frame.page(SPLASH_PAGE).unwrap();

        assert_eq!(&page[SPLASH_COL..SPLASH_COL + 6], &font::basic_cell('P'));
        assert_eq!(frame.pixel(0, 0), Some(true));
        assert_eq!(frame.pixel(WIDTH - 1, HEIGHT - 1), Some(true));
        assert_eq!(frame.pixel(64, 20), Some(false));
    }
}
