//! Procedural renderer for the Verum Omnis logo.

pub mod draw;
pub mod font;
pub mod logging;
pub mod logo;
pub mod models;
pub mod utils;

pub use logo::{RenderError, render, render_with_font};

/// Edge length of the logo written by the binary.
pub const LOGO_SIZE: u32 = 512;
