#![cfg_attr(not(test), no_std)]

//! Display and menu core of the pedometer firmware.
//!
//! Everything here is hardware independent: the data store, the retained
//! graphic model, the page graph and its navigation rules, button edge
//! detection and the wall clock. Rendering goes through [`graphics::Surface`].

pub mod clock;
pub mod error;
pub mod graphics;
pub mod input;
pub mod menu;
pub mod store;

#[cfg(test)]
mod testing;

pub use error::{Component, Error, MenuError, Result};
