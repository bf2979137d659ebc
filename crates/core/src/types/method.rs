//! Logo application method.

use serde::{Deserialize, Serialize};

/// How a customer logo is applied to a garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogoMethod {
    /// Printed directly onto the garment.
    #[default]
    Print,
    /// Stitched design.
    Embroidery,
}

impl std::fmt::Display for LogoMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Print => write!(f, "print"),
            Self::Embroidery => write!(f, "embroidery"),
        }
    }
}

impl std::str::FromStr for LogoMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "print" => Ok(Self::Print),
            "embroidery" => Ok(Self::Embroidery),
            _ => Err(format!("invalid logo method: {s}")),
        }
    }
}
