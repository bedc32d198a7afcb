use penrose::{core::bindings::KeyEventHandler, x11rb::RustConn};

pub mod actions;
pub mod bar;
pub mod bindings;
pub mod color;
pub mod config;
pub mod error;
pub mod groups;
pub mod hooks;
pub mod layouts;
pub mod rice;
pub mod rules;
pub mod terminal;

#[cfg(test)]
pub(crate) mod testing;

pub use color::Rgb;
pub use config::RiceConfig;
pub use error::{Error, Result};
pub use rice::Rice;

pub const MOD_KEY: bindings::Modifier = bindings::Modifier::Alt;
pub const MAX_MAIN: u32 = 1;

pub type KeyHandler = Box<dyn KeyEventHandler<RustConn>>;
