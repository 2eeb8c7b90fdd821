//! glyphcam library crate.
//!
//! Live camera frames are sampled onto a small RGBA surface, mapped to
//! glyphs by luminance, and shown in the terminal. The binary wires these
//! modules together; they are public for integration testing.

pub mod ascii;
pub mod camera;
pub mod cli;
pub mod config;
pub mod display;
pub mod event_loop;
pub mod export;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod terminal;
