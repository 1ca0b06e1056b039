use embedded_hal::{digital::OutputPin, spi::SpiDevice};
use pedometer_core::graphics::{Color, DisplayAttributes, FontId, Point, Surface};
use sh1106::{
    FrameBuffer, Sh1106, font,
    protocol::{HEIGHT, PAGE_HEIGHT, WIDTH},
};

/// Destination of composed frames.
pub trait FrameSink {
    type Error;

    fn flush_frame(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}

impl<SPI, DC, RST> FrameSink for Sh1106<SPI, DC, RST>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    type Error = sh1106::Error<SPI::Error, DC::Error, RST::Error>;

    fn flush_frame(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        self.flush(frame)
    }
}

/// Menu surface backed by an SH1106 framebuffer.
///
/// Drawing only touches the in-memory frame; [`Surface::render`] pushes it
/// to the sink.
#[derive(Debug)]
pub struct OledSurface<T> {
    sink: T,
    frame: FrameBuffer,
    frames: u32,
}

impl<T: FrameSink> OledSurface<T> {
    pub fn new(sink: T) -> Self {
        Self {
            sink,
            frame: FrameBuffer::new(),
            frames: 0,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn sink_mut(&mut self) -> &mut T {
        &mut self.sink
    }

    /// Number of frames flushed successfully.
    pub fn frames_rendered(&self) -> u32 {
        self.frames
    }

    pub fn release(self) -> T {
        self.sink
    }
}

impl<T: FrameSink> Surface for OledSurface<T> {
    type Error = T::Error;

    fn attributes(&self) -> DisplayAttributes {
        DisplayAttributes::new(WIDTH as u8, HEIGHT as u8, PAGE_HEIGHT as u8)
    }

    fn font_width(&self, font: FontId) -> Option<u8> {
        font::font_width(font).map(|cols| cols as u8)
    }

    fn clear(&mut self) {
        self.frame.clear(false);
    }

    fn put_point(&mut self, at: Point, color: Color) {
        self.frame
            .put_point(at.x as usize, at.y as usize, color.is_on());
    }

    fn put_hline(&mut self, origin: Point, len: u8, color: Color) {
        self.frame.put_hline(
            origin.x as usize,
            origin.y as usize,
            len as usize,
            color.is_on(),
        );
    }

    fn put_vline(&mut self, origin: Point, len: u8, color: Color) {
        self.frame.put_vline(
            origin.x as usize,
            origin.y as usize,
            len as usize,
            color.is_on(),
        );
    }

    fn put_rect(&mut self, start: Point, end: Point, color: Color, filled: bool) {
        self.frame.put_rect(
            (start.x as usize, start.y as usize),
            (end.x as usize, end.y as usize),
            color.is_on(),
            filled,
        );
    }

    fn put_char(&mut self, c: char, page: u8, col: u8, font: FontId) {
        self.frame.put_char(c, page as usize, col as usize, font);
    }

    fn put_string(&mut self, text: &str, page: u8, col: u8, font: FontId) {
        self.frame.put_string(text, page as usize, col as usize, font);
    }

    fn render(&mut self) -> Result<(), Self::Error> {
        self.sink.flush_frame(&self.frame)?;
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }
}
