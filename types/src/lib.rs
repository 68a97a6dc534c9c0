//! Core domain types for fx.
//!
//! This crate contains the window geometry and record types shared by the
//! windowing engine, the configuration layer and the command-line tool. It has
//! no IO and holds no iteration state.

mod key;
mod sliding;
mod window;

pub use key::WindowKey;
pub use sliding::{SlidingSpec, SlidingSpecError};
pub use window::{DiffRecord, WindowSnapshot, WindowSpec, WindowSpecError};
