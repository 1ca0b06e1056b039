#![cfg_attr(not(test), no_std)]

//! `embedded-hal` glue for the pedometer board: the OLED surface and the
//! button scanner.

pub mod input;
pub mod platform;
