//! Asset ticker identifier.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// An asset ticker symbol such as `AAPL` or `INFY.NS`.
///
/// Construction trims surrounding whitespace and quote characters, so
/// `" 'INFY.NS' "` and `INFY.NS` name the same asset. Case is preserved.
///
/// # Example
///
/// ```rust
/// use vantage_core::types::Ticker;
///
/// let t = Ticker::new(" \"RELIANCE.NS\" ").unwrap();
/// assert_eq!(t.as_str(), "RELIANCE.NS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Creates a ticker from raw user input.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] if nothing remains after trimming.
    pub fn new(raw: impl AsRef<str>) -> RiskResult<Self> {
        let cleaned = raw
            .as_ref()
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .trim();
        if cleaned.is_empty() {
            return Err(RiskError::invalid_input(format!(
                "ticker '{}' is empty",
                raw.as_ref()
            )));
        }
        Ok(Self(cleaned.to_string()))
    }

    /// The ticker symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses a comma-separated ticker list, e.g. `"AAA, BBB"`.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is empty.
    pub fn parse_list(s: &str) -> RiskResult<Vec<Self>> {
        s.split(',').map(Self::new).collect()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = RiskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Ticker {
    fn borrow(&self) -> &str {
        &self.0
    }
}
