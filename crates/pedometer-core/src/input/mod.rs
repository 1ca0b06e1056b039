//! Input abstraction layer.

pub mod mock;

use crate::error::Error;

/// Discrete actions consumed by the menu.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuAction {
    Enter,
    Up,
    Down,
}

impl MenuAction {
    /// Raw action code, the inverse of `TryFrom<u8>`.
    pub const fn code(self) -> u8 {
        match self {
            Self::Enter => 0,
            Self::Up => 1,
            Self::Down => 2,
        }
    }
}

impl TryFrom<u8> for MenuAction {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Enter),
            1 => Ok(Self::Up),
            2 => Ok(Self::Down),
            other => Err(Error::InvalidAction(other)),
        }
    }
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_action(&mut self) -> Result<Option<MenuAction>, Self::Error>;
}

/// Three-sample press detector for one button.
///
/// Fires once when the two newest samples are active and the one before
/// them was not.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EdgeDetector {
    active_high: bool,
    prev_prev: bool,
    prev: bool,
    current: bool,
}

impl EdgeDetector {
    /// Starts from an idle (inactive) history.
    pub const fn new(active_high: bool) -> Self {
        Self::primed(active_high, !active_high)
    }

    /// Starts from a history filled with `level_high`, so a button already
    /// held at start-up does not fire.
    pub const fn primed(active_high: bool, level_high: bool) -> Self {
        Self {
            active_high,
            prev_prev: level_high,
            prev: level_high,
            current: level_high,
        }
    }

    /// Pushes a new sample and reports whether it completed a press.
    pub fn shift(&mut self, level_high: bool) -> bool {
        self.prev_prev = self.prev;
        self.prev = self.current;
        self.current = level_high;
        self.rising_edge()
    }

    pub fn rising_edge(&self) -> bool {
        let active = self.active_high;
        self.prev_prev != active && self.prev == active && self.current == active
    }

    /// Samples oldest first.
    pub fn history(&self) -> [bool; 3] {
        [self.prev_prev, self.prev, self.current]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut EdgeDetector, samples: &[bool]) -> usize {
        samples
            .iter()
            .filter(|level| detector.shift(**level))
            .count()
    }

    #[test]
    fn codes_round_trip_and_reject_unknown() {
        for action in [MenuAction::Enter, MenuAction::Up, MenuAction::Down] {
            assert_eq!(MenuAction::try_from(action.code()), Ok(action));
        }
        assert_eq!(MenuAction::try_from(3), Err(Error::InvalidAction(3)));
        assert_eq!(MenuAction::try_from(255), Err(Error::InvalidAction(255)));
    }

    #[test]
    fn fresh_press_fires_exactly_once() {
        let mut detector = EdgeDetector::new(true);

        assert!(!detector.shift(true));
        assert!(detector.shift(true));
        assert_eq!(detector.history(), [false, true, true]);
        assert_eq!(feed(&mut detector, &[true, true, true]), 0);
    }

    #[test]
    fn release_pattern_does_not_fire() {
        let mut detector = EdgeDetector::primed(true, true);

        assert!(!detector.shift(false));
        assert_eq!(detector.history(), [true, true, false]);
        assert!(!detector.rising_edge());
    }

    #[test]
    fn single_sample_glitch_is_ignored() {
        let mut detector = EdgeDetector::new(true);

        assert_eq!(feed(&mut detector, &[true, false, false, true, false]), 0);
    }

    #[test]
    fn held_at_boot_needs_release_first() {
        let mut detector = EdgeDetector::primed(true, true);
        assert_eq!(feed(&mut detector, &[true, true, true]), 0);

        assert_eq!(feed(&mut detector, &[false, true, true]), 1);
    }

    #[test]
    fn active_low_buttons_fire_on_low_level() {
        let mut detector = EdgeDetector::new(false);

        assert_eq!(feed(&mut detector, &[false, false, false, true, false, false]), 2);
    }
}
