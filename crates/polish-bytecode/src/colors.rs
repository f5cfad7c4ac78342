//! ANSI color codes for dumps, traces and error lines.
//!
//! - Blue: mnemonics
//! - Green: literal values, string contents
//! - Red: error prefixes
//! - Dim: offsets, raw cells, stack bytes

/// ANSI color palette for terminal output.
///
/// Only standard 16-color codes are used so output stays legible on light
/// and dark themes alike.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        red: "\x1b[31m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        red: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
