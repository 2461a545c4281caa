//! Platform abstraction layer
//!
//! Keeps the core independent of any windowing or audio backend:
//! - Time (`Clock`)
//! - Input events

pub mod input;
pub mod time;

pub use input::{InputEvent, Key, PointerButton};
pub use time::{Clock, ManualClock, SystemClock};
