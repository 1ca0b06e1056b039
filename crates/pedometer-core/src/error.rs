//! Error types shared by the core modules.

use crate::{
    menu::PageName,
    store::{DataField, ValueKind},
};

/// Component guarded against double initialization.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Component {
    Store,
    Menu,
    Clock,
}

/// Configuration and wiring faults.
///
/// None of these are transient; each one points at a static wiring bug.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// `init` was called a second time.
    AlreadyInitialized(Component),
    /// Component used before `init`.
    NotInitialized(Component),
    /// Field is not registered in the store.
    UnknownField(DataField),
    /// Value tag differs from the stored tag.
    TypeMismatch { expected: ValueKind, found: ValueKind },
    /// Page name is not part of the page graph.
    UnknownPage(PageName),
    /// Page name was inserted twice.
    DuplicatePage(PageName),
    /// Parameter page without any parameter.
    EmptyParamPage(PageName),
    /// Fixed-capacity storage is full.
    CapacityExceeded,
    /// Raw action code outside ENTER/UP/DOWN.
    InvalidAction(u8),
}

pub type Result<T> = core::result::Result<T, Error>;

/// Error returned by menu operations that end in a display flush.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MenuError<E> {
    Config(Error),
    Display(E),
}

impl<E> MenuError<E> {
    /// True for configuration faults, false for flush errors.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl<E> From<Error> for MenuError<E> {
    fn from(err: Error) -> Self {
        Self::Config(err)
    }
}
