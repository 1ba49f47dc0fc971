//! Supported currencies and amount formatting for reports.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "SAR")]
    Sar,
    #[serde(rename = "EGP")]
    Egp,
    #[serde(rename = "USD")]
    Usd,
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Sar
    }
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Sar => "SAR",
            Currency::Egp => "EGP",
            Currency::Usd => "USD",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Sar => "Saudi Riyal",
            Currency::Egp => "Egyptian Pound",
            Currency::Usd => "US Dollar",
        }
    }

    /// Formats an amount for display, e.g. `"12.50 USD"`.
    pub fn format(&self, amount: f64) -> String {
        format!("{amount:.2} {}", self.code())
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SAR" => Ok(Currency::Sar),
            "EGP" => Ok(Currency::Egp),
            "USD" => Ok(Currency::Usd),
            _ => Err(anyhow::anyhow!("Unsupported currency: {}", s)),
        }
    }
}
