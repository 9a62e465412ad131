//! TUI widget modules

pub mod burn;
pub mod header;
pub mod resources;
pub mod shortcuts;

pub use burn::*;
pub use header::*;
pub use resources::*;
pub use shortcuts::*;
