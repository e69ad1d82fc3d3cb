//! Price tier of a visit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// How expensive a visit was.
///
/// Wire format: the euro-sign string (`"€"` to `"€€€€"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    #[serde(rename = "€")]
    Inexpensive,
    #[serde(rename = "€€")]
    Moderate,
    #[serde(rename = "€€€")]
    Expensive,
    #[serde(rename = "€€€€")]
    VeryExpensive,
}

impl PriceTier {
    pub const ALL: [PriceTier; 4] = [
        Self::Inexpensive,
        Self::Moderate,
        Self::Expensive,
        Self::VeryExpensive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inexpensive => "€",
            Self::Moderate => "€€",
            Self::Expensive => "€€€",
            Self::VeryExpensive => "€€€€",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inexpensive => "Inexpensive",
            Self::Moderate => "Moderate",
            Self::Expensive => "Expensive",
            Self::VeryExpensive => "Very Expensive",
        }
    }

    /// Parse optional form input. Blank input means "not given".
    pub fn parse_optional(input: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match input.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl FromStr for PriceTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or(ValidationError::InvalidPriceTier)
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
