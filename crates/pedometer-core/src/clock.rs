//! Wall clock advanced by periodic ticks.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::{
    error::{Component, Error, Result},
    store::{DataField, Store},
};

/// Flag raised from timer context and consumed by the control loop.
///
/// This is the only state shared with interrupt context.
#[derive(Debug, Default)]
pub struct TickFlag(AtomicBool);

impl TickFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns whether a tick was pending and clears it.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

/// Divides ticks down to seconds and rolls the time fields over.
#[derive(Debug)]
pub struct ClockCounter {
    prescaler: u32,
    ticks: u32,
    initialized: bool,
}

impl Default for ClockCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockCounter {
    pub const fn new() -> Self {
        Self {
            prescaler: 1,
            ticks: 0,
            initialized: false,
        }
    }

    /// Sets how many ticks make one second. Allowed once.
    pub fn init(&mut self, prescaler: u32) -> Result<()> {
        if self.initialized {
            return Err(Error::AlreadyInitialized(Component::Clock));
        }
        self.prescaler = prescaler.max(1);
        self.ticks = 0;
        self.initialized = true;
        info!("clock: {} ticks per second", self.prescaler);
        Ok(())
    }

    /// Counts one tick. Returns `true` when the time fields changed.
    pub fn process_tick(&mut self, store: &mut Store) -> Result<bool> {
        if !self.initialized {
            return Err(Error::NotInitialized(Component::Clock));
        }

        self.ticks += 1;
        if self.ticks < self.prescaler {
            return Ok(false);
        }
        self.ticks = 0;

        advance_second(store)?;
        Ok(true)
    }
}

/// Adds one second, carrying into minutes and hours.
pub fn advance_second(store: &mut Store) -> Result<()> {
    if !roll(store, DataField::Seconds)? || !roll(store, DataField::Minutes)? {
        return Ok(());
    }
    if roll(store, DataField::Hours)? {
        debug!("clock: day rollover");
    }
    Ok(())
}

/// Steps `field` up, wrapping to its minimum. Returns `true` on wrap.
fn roll(store: &mut Store, field: DataField) -> Result<bool> {
    let (value, min, max) = {
        let param = store.parameter(field)?;
        (param.value(), param.min(), param.max())
    };

    if value == max {
        store.write(field, min)?;
        Ok(true)
    } else {
        store.adjust(field, true)?;
        Ok(false)
    }
}
