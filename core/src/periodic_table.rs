use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The elements this crate knows how to treat. Only s-type basis functions are
/// supported, so the table stops at helium.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum ElementType {
    H = 1,
    He = 2,
}

impl ElementType {
    pub fn atomic_number(self) -> u32 {
        self as u32
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ElementType::H => "H",
            ElementType::He => "He",
        }
    }
}

impl FromStr for ElementType {
    type Err = ConfigError;

    /// Accepts element symbols (case insensitive) as well as atomic numbers, since basis set
    /// exchange files key their elements by atomic number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "1" => Ok(ElementType::H),
            "he" | "2" => Ok(ElementType::He),
            _ => Err(ConfigError::UnknownElement(s.to_owned())),
        }
    }
}

impl TryFrom<String> for ElementType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ElementType> for String {
    fn from(value: ElementType) -> Self {
        value.symbol().to_owned()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
