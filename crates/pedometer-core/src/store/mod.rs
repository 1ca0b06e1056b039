//! Typed key/value registry shared by the clock and the menu.

mod param;

use heapless::LinearMap;
use log::debug;

pub use param::{Param, Parameter, Step, Value, ValueKind};

use crate::error::{Component, Error, Result};

/// Fixed set of fields known at build time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataField {
    Steps,
    TargetSteps,
    Hours,
    Minutes,
    Seconds,
    GoalAlert,
}

impl DataField {
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Steps,
        Self::TargetSteps,
        Self::Hours,
        Self::Minutes,
        Self::Seconds,
        Self::GoalAlert,
    ];

    /// Design-time default, minimum and maximum of the field.
    pub fn default_parameter(self) -> Parameter {
        match self {
            Self::Steps => Param::new(0u32, 0, u32::MAX).into(),
            Self::TargetSteps => Param::new(1_000u32, 0, 99_999).into(),
            Self::Hours => Param::new(0u8, 0, 23).into(),
            Self::Minutes | Self::Seconds => Param::new(0u8, 0, 59).into(),
            Self::GoalAlert => Param::new(false, false, true).into(),
        }
    }
}

/// Owner of every field value.
///
/// Empty until [`Store::initialize`] registers the defaults.
#[derive(Debug)]
pub struct Store {
    params: LinearMap<DataField, Parameter, { DataField::COUNT }>,
    initialized: bool,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub const fn new() -> Self {
        Self {
            params: LinearMap::new(),
            initialized: false,
        }
    }

    /// Registers all fields with their defaults. Allowed once.
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Err(Error::AlreadyInitialized(Component::Store));
        }

        for field in DataField::ALL {
            self.params
                .insert(field, field.default_parameter())
                .map_err(|_| Error::CapacityExceeded)?;
        }
        self.initialized = true;
        debug!("store: {} fields registered", self.params.len());
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn parameter(&self, field: DataField) -> Result<&Parameter> {
        self.params.get(&field).ok_or(Error::UnknownField(field))
    }

    pub fn read(&self, field: DataField) -> Result<Value> {
        self.parameter(field).map(Parameter::value)
    }

    pub fn read_u8(&self, field: DataField) -> Result<u8> {
        self.read(field)?.as_u8()
    }

    pub fn read_u32(&self, field: DataField) -> Result<u32> {
        self.read(field)?.as_u32()
    }

    pub fn read_bool(&self, field: DataField) -> Result<bool> {
        self.read(field)?.as_bool()
    }

    /// Stores a value, clamped into the field range.
    pub fn write(&mut self, field: DataField, value: Value) -> Result<()> {
        let param = self
            .params
            .get_mut(&field)
            .ok_or(Error::UnknownField(field))?;
        param.set(value)?;
        debug!("store: {:?} <- {}", field, param.value());
        Ok(())
    }

    /// Steps a field up or down and returns the new value.
    pub fn adjust(&mut self, field: DataField, increase: bool) -> Result<Value> {
        let param = self
            .params
            .get_mut(&field)
            .ok_or(Error::UnknownField(field))?;
        if increase {
            param.increase();
        } else {
            param.decrease();
        }
        debug!("store: {:?} -> {}", field, param.value());
        Ok(param.value())
    }

    /// True once the step counter reached the target.
    pub fn goal_reached(&self) -> Result<bool> {
        Ok(self.read_u32(DataField::Steps)? >= self.read_u32(DataField::TargetSteps)?)
    }
}
