use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

use crate::{FrameBuffer, protocol};

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        // Off-panel pixels are clipped here; the primitive API asserts instead.
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            let _ = self.set_pixel(x, y, color.is_on());
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        FrameBuffer::clear(self, color.is_on());
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(protocol::WIDTH as u32, protocol::HEIGHT as u32)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_core::geometry::Point;

    use super::*;

    #[test]
    fn negative_and_off_panel_pixels_are_clipped() {
        let mut fb = FrameBuffer::new();
        let pixels = [
            Pixel(Point::new(-1, 0), BinaryColor::On),
            Pixel(Point::new(0, 64), BinaryColor::On),
            Pixel(Point::new(3, 9), BinaryColor::On),
        ];

        fb.draw_iter(pixels).unwrap();
        assert_eq!(fb.pixel(3, 9), Some(true));
        assert_eq!(fb.pages().iter().flatten().filter(|b| **b != 0).count(), 1);
    }

    #[test]
    fn clear_fills_every_page() {
        let mut fb = FrameBuffer::new();
        DrawTarget::clear(&mut fb, BinaryColor::On).unwrap();

        assert_eq!(fb.pixel(127, 63), Some(true));
    }
}
