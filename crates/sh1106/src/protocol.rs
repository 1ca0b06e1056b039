//! Wire-level protocol helpers for SH1106.

/// Visible panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 64;
/// Rows covered by one page byte.
pub const PAGE_HEIGHT: usize = 8;
/// Number of display pages.
pub const PAGES: usize = HEIGHT / PAGE_HEIGHT;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// Offset between the 132-column controller RAM and the 128-column glass.
pub const DEFAULT_COLUMN_OFFSET: u8 = 0x02;
/// Default contrast level.
pub const DEFAULT_CONTRAST: u8 = 0xBF;

pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const DISPLAY_FOLLOWS_RAM: u8 = 0xA4;
pub const NORMAL_DISPLAY: u8 = 0xA6;
pub const SET_CLOCK_DIVIDE: u8 = 0xD5;
pub const SET_MULTIPLEX_RATIO: u8 = 0xA8;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_START_LINE: u8 = 0x40;
pub const SET_DC_DC: u8 = 0xAD;
pub const SEGMENT_REMAP_NORMAL: u8 = 0xA0;
pub const COM_SCAN_INCREMENT: u8 = 0xC0;
pub const SET_COM_PINS: u8 = 0xDA;
pub const SET_CONTRAST: u8 = 0x81;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_VCOM_DESELECT: u8 = 0xDB;
/// Charge pump output, 8.0 V.
pub const SET_PUMP_VOLTAGE_8V: u8 = 0x32;

pub const PAGE_ADDRESS_BASE: u8 = 0xB0;
pub const COLUMN_ADDRESS_LOW: u8 = 0x00;
pub const COLUMN_ADDRESS_HIGH: u8 = 0x10;

/// Length of the power-up command sequence.
pub const INIT_SEQUENCE_LEN: usize = 24;

/// Builds the power-up command sequence.
///
/// The panel is switched off while it is configured and switched on last.
pub const fn init_sequence(contrast: u8) -> [u8; INIT_SEQUENCE_LEN] {
    [
        DISPLAY_OFF,
        DISPLAY_FOLLOWS_RAM,
        SET_CLOCK_DIVIDE,
        0x80,
        SET_MULTIPLEX_RATIO,
        (HEIGHT - 1) as u8,
        SET_DISPLAY_OFFSET,
        0x00,
        SET_START_LINE,
        SET_DC_DC,
        0x8B,
        SEGMENT_REMAP_NORMAL,
        COM_SCAN_INCREMENT,
        SET_COM_PINS,
        0x12,
        SET_CONTRAST,
        contrast,
        SET_PRECHARGE,
        0x11,
        SET_VCOM_DESELECT,
        0x40,
        SET_PUMP_VOLTAGE_8V,
        NORMAL_DISPLAY,
        DISPLAY_ON,
    ]
}

/// Encodes the page address command for page 0..=7.
///
/// Returns `None` for invalid pages.
#[inline]
pub fn page_address_command(page: u8) -> Option<u8> {
    if page as usize >= PAGES {
        return None;
    }

    Some(PAGE_ADDRESS_BASE | page)
}

/// Encodes the high/low column address command pair for a visible column.
///
/// Returns `None` when `column` is outside the glass.
#[inline]
pub fn column_address_commands(column: u8, offset: u8) -> Option<[u8; 2]> {
    if column as usize >= WIDTH {
        return None;
    }

    let address = column.checked_add(offset)?;
    Some([
        COLUMN_ADDRESS_HIGH | (address >> 4),
        COLUMN_ADDRESS_LOW | (address & 0x0F),
    ])
}

/// Builds the command prefix that precedes one page of pixel data.
#[inline]
pub fn page_select_packet(page: u8, column_offset: u8) -> Option<[u8; 3]> {
    let page_cmd = page_address_command(page)?;
    let [high, low] = column_address_commands(0, column_offset)?;

    Some([page_cmd, high, low])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_sequence_matches_module_datasheet() {
        let seq = init_sequence(DEFAULT_CONTRAST);
        assert_eq!(seq[0], DISPLAY_OFF);
        assert_eq!(seq[INIT_SEQUENCE_LEN - 1], DISPLAY_ON);
        assert_eq!(&seq[4..6], &[0xA8, 0x3F]);
        assert_eq!(&seq[15..17], &[0x81, 0xBF]);
        assert_eq!(init_sequence(0x10)[16], 0x10);
    }

    #[test]
    fn page_addresses_cover_all_pages() {
        assert_eq!(page_address_command(0), Some(0xB0));
        assert_eq!(page_address_command(7), Some(0xB7));
        assert_eq!(page_address_command(8), None);
    }

    #[test]
    fn column_address_applies_ram_offset() {
        assert_eq!(column_address_commands(0, DEFAULT_COLUMN_OFFSET), Some([0x10, 0x02]));
        assert_eq!(column_address_commands(127, DEFAULT_COLUMN_OFFSET), Some([0x18, 0x01]));
        assert_eq!(column_address_commands(128, DEFAULT_COLUMN_OFFSET), None);
    }

    #[test]
    fn page_select_packet_shape_is_fixed() {
        assert_eq!(page_select_packet(3, DEFAULT_COLUMN_OFFSET), Some([0xB3, 0x10, 0x02]));
        assert_eq!(page_select_packet(9, DEFAULT_COLUMN_OFFSET), None);
    }
}
