//! Clamped typed values backing the store fields.

use core::fmt;

use crate::error::{Error, Result};

/// Tag of a stored value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    U8,
    U32,
    Bool,
}

/// A stored value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Value {
    U8(u8),
    U32(u32),
    Bool(bool),
}

impl Value {
    pub const fn kind(self) -> ValueKind {
        match self {
            Self::U8(_) => ValueKind::U8,
            Self::U32(_) => ValueKind::U32,
            Self::Bool(_) => ValueKind::Bool,
        }
    }

    pub fn as_u8(self) -> Result<u8> {
        match self {
            Self::U8(value) => Ok(value),
            other => Err(mismatch(ValueKind::U8, other.kind())),
        }
    }

    pub fn as_u32(self) -> Result<u32> {
        match self {
            Self::U32(value) => Ok(value),
            other => Err(mismatch(ValueKind::U32, other.kind())),
        }
    }

    pub fn as_bool(self) -> Result<bool> {
        match self {
            Self::Bool(value) => Ok(value),
            other => Err(mismatch(ValueKind::Bool, other.kind())),
        }
    }
}

/// Numbers print in decimal, flags as `YES`/`NO`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U8(value) => write!(f, "{value}"),
            Self::U32(value) => write!(f, "{value}"),
            Self::Bool(true) => f.write_str("YES"),
            Self::Bool(false) => f.write_str("NO"),
        }
    }
}

pub(crate) const fn mismatch(expected: ValueKind, found: ValueKind) -> Error {
    Error::TypeMismatch { expected, found }
}

/// Unit step of a parameter type.
pub trait Step: Copy + Ord {
    fn step_up(self) -> Self;
    fn step_down(self) -> Self;

    /// Normalizes caller-supplied bounds.
    fn bounds(min: Self, max: Self) -> (Self, Self) {
        if min <= max { (min, max) } else { (max, min) }
    }
}

impl Step for u8 {
    fn step_up(self) -> Self {
        self.saturating_add(1)
    }

    fn step_down(self) -> Self {
        self.saturating_sub(1)
    }
}

impl Step for u32 {
    fn step_up(self) -> Self {
        self.saturating_add(1)
    }

    fn step_down(self) -> Self {
        self.saturating_sub(1)
    }
}

impl Step for bool {
    fn step_up(self) -> Self {
        true
    }

    fn step_down(self) -> Self {
        false
    }

    /// Flags always span the whole domain.
    fn bounds(_min: Self, _max: Self) -> (Self, Self) {
        (false, true)
    }
}

/// A value kept inside `[min, max]`.
///
/// Writes clamp and steps saturate; nothing ever wraps around.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Param<T> {
    value: T,
    min: T,
    max: T,
}

impl<T: Step> Param<T> {
    pub fn new(value: T, min: T, max: T) -> Self {
        let (min, max) = T::bounds(min, max);
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    pub fn set(&mut self, value: T) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn increase(&mut self) {
        self.set(self.value.step_up());
    }

    pub fn decrease(&mut self) {
        self.set(self.value.step_down());
    }
}

/// Clamped value behind one data field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Parameter {
    U8(Param<u8>),
    U32(Param<u32>),
    Bool(Param<bool>),
}

impl Parameter {
    /// Builds a parameter from untyped parts.
    ///
    /// All three parts must carry the same tag.
    pub fn new(value: Value, min: Value, max: Value) -> Result<Self> {
        match (value, min, max) {
            (Value::U8(value), Value::U8(min), Value::U8(max)) => {
                Ok(Self::U8(Param::new(value, min, max)))
            }
            (Value::U32(value), Value::U32(min), Value::U32(max)) => {
                Ok(Self::U32(Param::new(value, min, max)))
            }
            (Value::Bool(value), Value::Bool(min), Value::Bool(max)) => {
                Ok(Self::Bool(Param::new(value, min, max)))
            }
            (value, min, max) => {
                let found = if min.kind() != value.kind() {
                    min.kind()
                } else {
                    max.kind()
                };
                Err(mismatch(value.kind(), found))
            }
        }
    }

    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::U8(_) => ValueKind::U8,
            Self::U32(_) => ValueKind::U32,
            Self::Bool(_) => ValueKind::Bool,
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Self::U8(param) => Value::U8(param.value()),
            Self::U32(param) => Value::U32(param.value()),
            Self::Bool(param) => Value::Bool(param.value()),
        }
    }

    pub fn min(&self) -> Value {
        match self {
            Self::U8(param) => Value::U8(param.min()),
            Self::U32(param) => Value::U32(param.min()),
            Self::Bool(param) => Value::Bool(param.min()),
        }
    }

    pub fn max(&self) -> Value {
        match self {
            Self::U8(param) => Value::U8(param.max()),
            Self::U32(param) => Value::U32(param.max()),
            Self::Bool(param) => Value::Bool(param.max()),
        }
    }

    /// Assigns a clamped value; the tag must match.
    pub fn set(&mut self, value: Value) -> Result<()> {
        match (self, value) {
            (Self::U8(param), Value::U8(value)) => param.set(value),
            (Self::U32(param), Value::U32(value)) => param.set(value),
            (Self::Bool(param), Value::Bool(value)) => param.set(value),
            (param, value) => return Err(mismatch(param.kind(), value.kind())),
        }
        Ok(())
    }

    pub fn increase(&mut self) {
        match self {
            Self::U8(param) => param.increase(),
            Self::U32(param) => param.increase(),
            Self::Bool(param) => param.increase(),
        }
    }

    pub fn decrease(&mut self) {
        match self {
            Self::U8(param) => param.decrease(),
            Self::U32(param) => param.decrease(),
            Self::Bool(param) => param.decrease(),
        }
    }
}

impl From<Param<u8>> for Parameter {
    fn from(param: Param<u8>) -> Self {
        Self::U8(param)
    }
}

impl From<Param<u32>> for Parameter {
    fn from(param: Param<u32>) -> Self {
        Self::U32(param)
    }
}

impl From<Param<bool>> for Parameter {
    fn from(param: Param<bool>) -> Self {
        Self::Bool(param)
    }
}
