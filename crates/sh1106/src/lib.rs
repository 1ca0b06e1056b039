#![cfg_attr(not(test), no_std)]

//! SH1106 (1.3" 128x64 monochrome OLED) driver primitives.

pub mod font;
mod framebuffer;
pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use framebuffer::FrameBuffer;

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// Expected SPI clock in Hz (documented for board glue).
    pub spi_hz: u32,
    /// Column RAM offset of the visible area.
    pub column_offset: u8,
    /// Contrast written during init.
    pub contrast: u8,
    /// Duration of each reset phase in milliseconds.
    pub reset_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spi_hz: 8_000_000,
            column_offset: protocol::DEFAULT_COLUMN_OFFSET,
            contrast: protocol::DEFAULT_CONTRAST,
            reset_ms: 100,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, DcErr, RstErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// D/C pin operation failed.
    Dc(DcErr),
    /// RST pin operation failed.
    Rst(RstErr),
    /// Input parameters are outside supported bounds.
    InvalidInput,
}

pub type DriverResult<SpiErr, DcErr, RstErr> = Result<(), Error<SpiErr, DcErr, RstErr>>;

/// SH1106 driver over a 4-wire SPI link.
///
/// `DC` low selects the command register, high selects display RAM.
#[derive(Debug)]
pub struct Sh1106<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
    config: Config,
}

impl<SPI, DC, RST> Sh1106<SPI, DC, RST>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Creates a new driver instance.
    pub fn new(spi: SPI, dc: DC, rst: RST, config: Config) -> Self {
        Self {
            spi,
            dc,
            rst,
            config,
        }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }

    /// Pulses the reset line.
    pub fn reset<D>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, DC::Error, RST::Error>
    where
        D: DelayNs,
    {
        self.rst.set_low().map_err(Error::Rst)?;
        delay.delay_ms(self.config.reset_ms);
        self.rst.set_high().map_err(Error::Rst)?;
        delay.delay_ms(self.config.reset_ms);
        Ok(())
    }

    /// Sends the power-up configuration and turns the panel on.
    pub fn init(&mut self) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.send_commands(&protocol::init_sequence(self.config.contrast))
    }

    /// Writes raw command bytes.
    pub fn send_commands(&mut self, commands: &[u8]) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.dc.set_low().map_err(Error::Dc)?;
        self.spi.write(commands).map_err(Error::Spi)
    }

    /// Changes the contrast level.
    pub fn set_contrast(&mut self, contrast: u8) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.config.contrast = contrast;
        self.send_commands(&[protocol::SET_CONTRAST, contrast])
    }

    /// Turns the panel off; display RAM is retained.
    pub fn sleep(&mut self) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.send_commands(&[protocol::DISPLAY_OFF])
    }

    /// Turns the panel back on.
    pub fn wake(&mut self) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        self.send_commands(&[protocol::DISPLAY_ON])
    }

    /// Writes one page payload (0..=7).
    pub fn write_page(
        &mut self,
        page: u8,
        data: &[u8; protocol::WIDTH],
    ) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        let select = protocol::page_select_packet(page, self.config.column_offset)
            .ok_or(Error::InvalidInput)?;

        self.send_commands(&select)?;
        self.dc.set_high().map_err(Error::Dc)?;
        self.spi.write(data).map_err(Error::Spi)
    }

    /// Flushes a full framebuffer.
    pub fn flush(&mut self, frame: &FrameBuffer) -> DriverResult<SPI::Error, DC::Error, RST::Error> {
        for (page, data) in frame.pages().iter().enumerate() {
            self.write_page(page as u8, data)?;
        }

        Ok(())
    }
}
