use embedded_hal::digital::InputPin;
use heapless::{Deque, Vec};
use log::{debug, warn};

use pedometer_core::input::{EdgeDetector, InputProvider, MenuAction};

const PENDING_ACTIONS: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct ButtonConfig {
    active_high: bool,
    prime_from_pins: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active_high: true,
            prime_from_pins: true,
        }
    }
}

impl ButtonConfig {
    pub const fn with_active_high(mut self, active_high: bool) -> Self {
        self.active_high = active_high;
        self
    }

    /// Seeds each detector with the level read at start-up.
    pub const fn with_prime_from_pins(mut self, prime_from_pins: bool) -> Self {
        self.prime_from_pins = prime_from_pins;
        self
    }
}

#[derive(Debug)]
pub enum ButtonInputError<E> {
    /// Reading the pin bound to this action failed.
    Pin(MenuAction, E),
    /// More buttons than the scanner was sized for.
    TooManyButtons,
}

#[derive(Debug)]
struct Button<P> {
    pin: P,
    action: MenuAction,
    edge: EdgeDetector,
}

/// Scans GPIO buttons and turns presses into menu actions.
///
/// Each poll samples every pin once. Presses completed in the same scan are
/// queued and handed out in pin order on the following polls.
#[derive(Debug)]
pub struct ButtonInput<P, const N: usize> {
    buttons: Vec<Button<P>, N>,
    pending: Deque<MenuAction, PENDING_ACTIONS>,
}

impl<P, const N: usize> ButtonInput<P, N>
where
    P: InputPin,
{
    pub fn new<I>(pins: I, config: ButtonConfig) -> Result<Self, ButtonInputError<P::Error>>
    where
        I: IntoIterator<Item = (P, MenuAction)>,
    {
        let mut buttons = Vec::new();
        for (mut pin, action) in pins {
            let edge = if config.prime_from_pins {
                let level = pin
                    .is_high()
                    .map_err(|err| ButtonInputError::Pin(action, err))?;
                EdgeDetector::primed(config.active_high, level)
            } else {
                EdgeDetector::new(config.active_high)
            };
            buttons
                .push(Button { pin, action, edge })
                .map_err(|_| ButtonInputError::TooManyButtons)?;
        }

        Ok(Self {
            buttons,
            pending: Deque::new(),
        })
    }

    /// Samples every pin once and queues completed presses.
    pub fn scan(&mut self) -> Result<(), ButtonInputError<P::Error>> {
        for button in self.buttons.iter_mut() {
            let level = button
                .pin
                .is_high()
                .map_err(|err| ButtonInputError::Pin(button.action, err))?;

            if button.edge.shift(level) {
                debug!("buttons: {:?} pressed", button.action);
                if self.pending.push_back(button.action).is_err() {
                    warn!("buttons: queue full, dropping {:?}", button.action);
                }
            }
        }

        Ok(())
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<P, const N: usize> InputProvider for ButtonInput<P, N>
where
    P: InputPin,
{
    type Error = ButtonInputError<P::Error>;

    fn poll_action(&mut self) -> Result<Option<MenuAction>, Self::Error> {
        self.scan()?;
        Ok(self.pending.pop_front())
    }
}
