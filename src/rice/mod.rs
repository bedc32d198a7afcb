//! The rices: palettes, layouts and bars that can be switched between.
use crate::{bar::BarConfig, bindings::Command, layouts::LayoutConfig, Result};
use clap::ValueEnum;
use std::fmt;

pub mod atarashii;
pub mod tl;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Rice {
    /// Light blue and orange, three layouts and a compact bar
    #[default]
    Tl,
    /// Dark purple with pastel accents and a bar full of telemetry
    Atarashii,
}

impl Rice {
    pub fn spec(self) -> Result<RiceSpec> {
        match self {
            Self::Tl => tl::spec(),
            Self::Atarashii => atarashii::spec(),
        }
    }
}

impl fmt::Display for Rice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tl => write!(f, "tl"),
            Self::Atarashii => write!(f, "atarashii"),
        }
    }
}

/// The parts of the configuration that differ between rices.
#[derive(Debug, Clone, PartialEq)]
pub struct RiceSpec {
    pub launcher: Command,
    pub layouts: Vec<LayoutConfig>,
    pub bar: BarConfig,
}

fn rofi(args: &[&str]) -> Command {
    Command::new("rofi").args(args.iter().copied())
}
