//! Color values returned from switch-case expressions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An RGB triple rendered as a WCPS struct literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self { red, green, blue }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{red: {}; green: {}; blue: {}}}",
            self.red, self.green, self.blue
        )
    }
}
